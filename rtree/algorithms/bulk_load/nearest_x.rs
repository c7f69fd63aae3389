use super::merge_upwards;
use crate::rtree::algorithms::partition::partial_sort_by_groups;
use crate::rtree::node::{compare_mid_x, Node};

/// Nearest-X 批量构建
///
/// 只按 X 中点部分排序成每组 M 个，然后自底向上合并。
/// 最简单、最快，但节点在 Y 方向上会很细长，查询局部性最差。
pub(crate) fn build<T>(mut items: Vec<Node<T>>, max_entries: usize) -> Node<T> {
    partial_sort_by_groups(&mut items, max_entries, compare_mid_x);
    merge_upwards(items, max_entries, 1)
}
