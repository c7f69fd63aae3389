use serde::{Deserialize, Serialize};

/// 矩形边界框 - 用于表示R-tree中的最小边界矩形(MBR)
///
/// 空矩形 `EMPTY` 为 `(+∞, +∞, -∞, -∞)`，是并集运算的单位元。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: [f64; 2], // [x_min, y_min]
    pub max: [f64; 2], // [x_max, y_max]
}

impl Rectangle {
    /// 不包含任何条目的空矩形
    pub const EMPTY: Rectangle = Rectangle {
        min: [f64::INFINITY, f64::INFINITY],
        max: [f64::NEG_INFINITY, f64::NEG_INFINITY],
    };

    /// 创建新的矩形
    ///
    /// 不检查边界顺序：反向的矩形可以表示，查询时按"不匹配任何条目"处理，
    /// 需要时用 `is_valid` 判断。
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }

    /// 创建一个点矩形
    pub fn from_point(x: f64, y: f64) -> Self {
        Rectangle {
            min: [x, y],
            max: [x, y],
        }
    }

    /// 计算一组矩形的并集，空迭代器返回 `EMPTY`
    pub fn of<'a, I>(rects: I) -> Self
    where
        I: IntoIterator<Item = &'a Rectangle>,
    {
        rects.into_iter().fold(Rectangle::EMPTY, |acc, r| acc.union(r))
    }

    pub fn min_x(&self) -> f64 {
        self.min[0]
    }

    pub fn min_y(&self) -> f64 {
        self.min[1]
    }

    pub fn max_x(&self) -> f64 {
        self.max[0]
    }

    pub fn max_y(&self) -> f64 {
        self.max[1]
    }

    pub fn mid_x(&self) -> f64 {
        (self.min[0] + self.max[0]) / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        (self.min[1] + self.max[1]) / 2.0
    }

    /// 计算矩形中心点
    pub fn center(&self) -> [f64; 2] {
        [self.mid_x(), self.mid_y()]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// 计算矩形面积
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// 半周长（margin），R*-tree 系列算法常用的形状度量
    pub fn half_perimeter(&self) -> f64 {
        self.width() + self.height()
    }

    /// 计算矩形周长
    pub fn perimeter(&self) -> f64 {
        2.0 * self.half_perimeter()
    }

    /// 是否为空矩形（不包含任何条目）
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0] || self.min[1] > self.max[1]
    }

    /// 两个轴的边界都有序且不含 NaN
    pub fn is_valid(&self) -> bool {
        self.min[0] <= self.max[0] && self.min[1] <= self.max[1]
    }

    /// 所有坐标都是有限值
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
    }

    /// 计算两个矩形的并集MBR
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// 原地扩展为与另一个矩形的并集
    pub fn expand(&mut self, other: &Rectangle) {
        *self = self.union(other);
    }

    /// 并集的面积
    pub fn enlarged_area(&self, other: &Rectangle) -> f64 {
        self.union(other).area()
    }

    /// 计算两个矩形的交集面积，不相交时为 0
    pub fn intersection_area(&self, other: &Rectangle) -> f64 {
        let x_overlap = self.max[0].min(other.max[0]) - self.min[0].max(other.min[0]);
        let y_overlap = self.max[1].min(other.max[1]) - self.min[1].max(other.min[1]);

        x_overlap.max(0.0) * y_overlap.max(0.0)
    }

    /// 判断两个矩形是否相交（边界接触也算相交）
    pub fn intersects(&self, other: &Rectangle) -> bool {
        other.min[0] <= self.max[0]
            && other.min[1] <= self.max[1]
            && other.max[0] >= self.min[0]
            && other.max[1] >= self.min[1]
    }

    /// 判断当前矩形是否包含另一个矩形
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.min[0]
            && self.min[1] <= other.min[1]
            && other.max[0] <= self.max[0]
            && other.max[1] <= self.max[1]
    }

    /// 判断当前矩形是否包含一个点
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min[0] <= x && x <= self.max[0] && self.min[1] <= y && y <= self.max[1]
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Rectangle::EMPTY
    }
}
