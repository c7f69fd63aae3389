use crate::rtree::rectangle::Rectangle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// R-tree节点类型
///
/// 用于区分树中的三种节点，主要在可视化导出和调试输出中使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// 矩形数据条目
    Leaf,
    /// 点数据条目（退化矩形，min == max）
    Point,
    /// 索引节点：只包含子节点
    Index,
}

/// R-tree节点
///
/// - `Leaf` / `Point`：用户数据条目，位于第 0 层
/// - `Internal`：索引节点，`mbr` 是所有子节点 MBR 的紧致并集；
///   直接包含数据条目的索引节点高度为 1，往上每层加 1
///
/// 节点由构建算法一次性创建，之后不再修改，所以 `mbr` 只在 `Node::internal` 中计算一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node<T> {
    /// 矩形数据条目
    Leaf { mbr: Rectangle, data: T },

    /// 点数据条目，中点和相交测试直接使用坐标，省去 min/max 运算
    Point { x: f64, y: f64, data: T },

    /// 索引节点
    Internal {
        mbr: Rectangle,
        height: usize,
        children: Vec<Node<T>>,
    },
}

impl<T> Node<T> {
    /// 创建矩形数据条目
    pub fn leaf(mbr: Rectangle, data: T) -> Self {
        Node::Leaf { mbr, data }
    }

    /// 创建点数据条目
    pub fn point(x: f64, y: f64, data: T) -> Self {
        Node::Point { x, y, data }
    }

    /// 创建索引节点并计算其 MBR
    ///
    /// # 参数
    /// * `children` - 子节点，所有子节点应位于同一层
    /// * `height` - 节点高度，等于子节点高度 + 1
    pub fn internal(children: Vec<Node<T>>, height: usize) -> Self {
        debug_assert!(
            children.iter().all(|c| c.height() + 1 == height),
            "children must sit exactly one level below their parent"
        );
        let mbr = Self::union_of(&children);
        Node::Internal {
            mbr,
            height,
            children,
        }
    }

    /// 没有任何子节点的索引节点，空树的根
    pub const fn empty_internal() -> Self {
        Node::Internal {
            mbr: Rectangle::EMPTY,
            height: 1,
            children: Vec::new(),
        }
    }

    /// 计算一组节点的 MBR 并集
    pub(crate) fn union_of(nodes: &[Node<T>]) -> Rectangle {
        nodes
            .iter()
            .fold(Rectangle::EMPTY, |acc, node| acc.union(&node.mbr()))
    }

    /// 获取节点的MBR（最小边界矩形）
    pub fn mbr(&self) -> Rectangle {
        match self {
            Node::Leaf { mbr, .. } | Node::Internal { mbr, .. } => *mbr,
            Node::Point { x, y, .. } => Rectangle::from_point(*x, *y),
        }
    }

    pub fn min_x(&self) -> f64 {
        match self {
            Node::Point { x, .. } => *x,
            _ => self.mbr().min_x(),
        }
    }

    pub fn min_y(&self) -> f64 {
        match self {
            Node::Point { y, .. } => *y,
            _ => self.mbr().min_y(),
        }
    }

    pub fn mid_x(&self) -> f64 {
        match self {
            Node::Point { x, .. } => *x,
            _ => self.mbr().mid_x(),
        }
    }

    pub fn mid_y(&self) -> f64 {
        match self {
            Node::Point { y, .. } => *y,
            _ => self.mbr().mid_y(),
        }
    }

    /// 节点高度，数据条目为 0
    pub fn height(&self) -> usize {
        match self {
            Node::Internal { height, .. } => *height,
            _ => 0,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Leaf { .. } => NodeType::Leaf,
            Node::Point { .. } => NodeType::Point,
            Node::Internal { .. } => NodeType::Index,
        }
    }

    /// 检查是否为数据条目（矩形或点）
    pub fn is_leaf_node(&self) -> bool {
        !self.is_index_node()
    }

    /// 检查是否为索引节点
    pub fn is_index_node(&self) -> bool {
        matches!(self, Node::Internal { .. })
    }

    /// 数据条目的用户数据，索引节点返回 None
    pub fn data(&self) -> Option<&T> {
        match self {
            Node::Leaf { data, .. } | Node::Point { data, .. } => Some(data),
            Node::Internal { .. } => None,
        }
    }

    /// 索引节点的子节点，数据条目返回空切片
    pub fn children(&self) -> &[Node<T>] {
        match self {
            Node::Internal { children, .. } => children,
            _ => &[],
        }
    }

    /// 判断节点是否与查询矩形相交
    pub fn intersects(&self, query: &Rectangle) -> bool {
        match self {
            Node::Point { x, y, .. } => query.contains_point(*x, *y),
            Node::Leaf { mbr, .. } | Node::Internal { mbr, .. } => query.intersects(mbr),
        }
    }

    /// 判断节点是否完全位于查询矩形内
    pub fn is_within(&self, query: &Rectangle) -> bool {
        match self {
            Node::Point { x, y, .. } => query.contains_point(*x, *y),
            Node::Leaf { mbr, .. } | Node::Internal { mbr, .. } => query.contains(mbr),
        }
    }
}

/// 按 min_x 排序，相同时按完整边界决定先后
pub(crate) fn compare_min_x<T>(a: &Node<T>, b: &Node<T>) -> Ordering {
    a.min_x()
        .total_cmp(&b.min_x())
        .then_with(|| compare_bounds(a, b))
}

pub(crate) fn compare_min_y<T>(a: &Node<T>, b: &Node<T>) -> Ordering {
    a.min_y()
        .total_cmp(&b.min_y())
        .then_with(|| compare_bounds(a, b))
}

pub(crate) fn compare_mid_x<T>(a: &Node<T>, b: &Node<T>) -> Ordering {
    a.mid_x()
        .total_cmp(&b.mid_x())
        .then_with(|| compare_bounds(a, b))
}

pub(crate) fn compare_mid_y<T>(a: &Node<T>, b: &Node<T>) -> Ordering {
    a.mid_y()
        .total_cmp(&b.mid_y())
        .then_with(|| compare_bounds(a, b))
}

fn compare_bounds<T>(a: &Node<T>, b: &Node<T>) -> Ordering {
    let (ra, rb) = (a.mbr(), b.mbr());
    ra.min[0]
        .total_cmp(&rb.min[0])
        .then_with(|| ra.min[1].total_cmp(&rb.min[1]))
        .then_with(|| ra.max[0].total_cmp(&rb.max[0]))
        .then_with(|| ra.max[1].total_cmp(&rb.max[1]))
}
