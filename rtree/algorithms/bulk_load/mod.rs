//! 批量构建算法
//!
//! 所有算法的输入都是一批数据条目（`Node::Leaf` / `Node::Point`）和节点最大条目数 M，
//! 输出一棵平衡树的根节点：同一个索引节点的所有子节点高度相同。
//!
//! - omt: Overlap-Minimizing Top-down，自顶向下递归切分，节点最接近正方形、重叠最少
//! - sort_tile_recursive: STR，先按 X 中点切成竖条，再按 Y 中点切成块
//! - curve_sort: Hilbert / Morton 空间填充曲线排序
//! - nearest_x: 只按 X 中点分组
//!
//! 除 OMT 外，其余算法最后都通过 `merge_upwards` 自底向上合并出根节点。

pub mod curve_sort;
pub mod nearest_x;
pub mod omt;
pub mod sort_tile_recursive;

use crate::rtree::error::{IndexError, Result};
use crate::rtree::node::Node;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, trace};

/// 批量构建策略
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    /// 自顶向下、最小化重叠，查询最快，构建最慢
    #[default]
    #[display(fmt = "omt")]
    Omt,
    /// Sort-Tile-Recursive
    #[display(fmt = "str")]
    Str,
    /// Hilbert 曲线排序
    #[display(fmt = "hilbert")]
    Hilbert,
    /// Morton（Z-order）曲线排序
    #[display(fmt = "morton")]
    Morton,
    /// 按 X 中点分组，构建最快，查询局部性最差
    #[display(fmt = "nearest_x")]
    NearestX,
}

impl LoadStrategy {
    /// 全部策略，按查询质量从高到低排列
    pub const ALL: [LoadStrategy; 5] = [
        LoadStrategy::Omt,
        LoadStrategy::Str,
        LoadStrategy::Hilbert,
        LoadStrategy::Morton,
        LoadStrategy::NearestX,
    ];
}

impl FromStr for LoadStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omt" => Ok(LoadStrategy::Omt),
            "str" => Ok(LoadStrategy::Str),
            "hilbert" => Ok(LoadStrategy::Hilbert),
            "morton" => Ok(LoadStrategy::Morton),
            "nearest_x" | "nearest-x" => Ok(LoadStrategy::NearestX),
            other => Err(format!(
                "Invalid load strategy: '{}'. Must be one of: omt, str, hilbert, morton, nearest_x",
                other
            )),
        }
    }
}

/// 批量构建一棵树，返回根节点
///
/// 构建前先检查参数：M 小于 2、没有条目、条目不是数据条目或边界非法都会直接报错，
/// 不会改动任何条目。
pub fn bulk_load<T>(
    items: Vec<Node<T>>,
    max_entries: usize,
    strategy: LoadStrategy,
) -> Result<Node<T>> {
    validate_input(&items, max_entries)?;

    let count = items.len();
    let root = match strategy {
        LoadStrategy::Omt => omt::build(items, max_entries),
        LoadStrategy::Str => sort_tile_recursive::build(items, max_entries),
        LoadStrategy::Hilbert => curve_sort::build(items, max_entries, curve_sort::Curve::Hilbert),
        LoadStrategy::Morton => curve_sort::build(items, max_entries, curve_sort::Curve::Morton),
        LoadStrategy::NearestX => nearest_x::build(items, max_entries),
    };

    debug!(
        "Bulk loaded {} items with strategy {} (max_entries={}, height={})",
        count,
        strategy,
        max_entries,
        root.height()
    );
    Ok(root)
}

/// 检查构建参数
fn validate_input<T>(items: &[Node<T>], max_entries: usize) -> Result<()> {
    if max_entries < 2 {
        return Err(IndexError::InvalidMaxEntries { max_entries });
    }
    if items.is_empty() {
        return Err(IndexError::EmptyInput);
    }

    for (index, item) in items.iter().enumerate() {
        if item.is_index_node() {
            return Err(IndexError::NotALeaf { index });
        }
        let mbr = item.mbr();
        if !mbr.is_finite() || !mbr.is_valid() {
            return Err(IndexError::InvalidLeafBounds { index });
        }
    }

    Ok(())
}

/// 自底向上合并
///
/// 输入已经排好序的一层节点：每连续 M 个组成一个高度为 `height` 的索引节点，
/// 然后对新的一层以 `height + 1` 重复，直到只剩一个根节点。
/// 节点数不超过 M 时直接包成一个节点。
pub(crate) fn merge_upwards<T>(
    mut nodes: Vec<Node<T>>,
    max_entries: usize,
    mut height: usize,
) -> Node<T> {
    loop {
        if nodes.len() <= max_entries {
            return Node::internal(nodes, height);
        }

        trace!("Merging {} nodes into level {}", nodes.len(), height);
        nodes = split_into_runs(nodes, max_entries)
            .into_iter()
            .map(|run| Node::internal(run, height))
            .collect();
        height += 1;
    }
}

/// 把一个有序序列按顺序切成若干段，每段最多 `size` 个元素
pub(crate) fn split_into_runs<E>(items: Vec<E>, size: usize) -> Vec<Vec<E>> {
    debug_assert!(size > 0, "run size must be positive");
    let mut runs = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter();
    loop {
        let mut run = Vec::with_capacity(size);
        run.extend(iter.by_ref().take(size));
        if run.is_empty() {
            break;
        }
        runs.push(run);
    }
    runs
}

/// 向上取整的整数平方根
pub(crate) fn ceil_sqrt(value: usize) -> usize {
    let mut root = (value as f64).sqrt() as usize;
    while root * root < value {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= value {
        root -= 1;
    }
    root
}
