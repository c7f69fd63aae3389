use super::{ceil_sqrt, merge_upwards};
use crate::rtree::algorithms::partition::partial_sort_by_groups;
use crate::rtree::node::{compare_mid_x, compare_mid_y, Node};

/// STR（Sort-Tile-Recursive）批量构建
///
/// 1. 按 X 中点部分排序成行组，每组 N1 = ceil(sqrt(M)) * ceil(N / M) 个条目
/// 2. 每个行组再按 Y 中点部分排序成每块 ceil(sqrt(M)) 个的小块
/// 3. 排好的序列从高度 1 开始自底向上合并，每个叶子层节点仍然装 M 个条目
///
/// 只做固定的两轮部分排序，比 OMT 便宜，节点之间的重叠略多。
pub(crate) fn build<T>(mut items: Vec<Node<T>>, max_entries: usize) -> Node<T> {
    if items.len() <= max_entries {
        return Node::internal(items, 1);
    }

    sort_rows_and_tiles(&mut items, max_entries);
    merge_upwards(items, max_entries, 1)
}

/// 两轮部分排序，返回行组大小 N1
fn sort_rows_and_tiles<T>(items: &mut [Node<T>], max_entries: usize) -> usize {
    let tile_size = ceil_sqrt(max_entries);
    let row_size = tile_size * items.len().div_ceil(max_entries);

    partial_sort_by_groups(items, row_size, compare_mid_x);
    for row in items.chunks_mut(row_size) {
        partial_sort_by_groups(row, tile_size, compare_mid_y);
    }

    row_size
}
