use super::{ceil_sqrt, split_into_runs};
use crate::rtree::algorithms::partition::partial_sort_by_groups;
use crate::rtree::node::{compare_min_x, compare_min_y, Node};

/// OMT（Overlap-Minimizing Top-down）批量构建
///
/// 1. 条目数不超过 M：直接包成一个高度为 1 的节点
/// 2. 否则目标高度 h = ceil(log_M(N))，根节点的扇出 M' = ceil(N / M^(h-1))，
///    保证整棵树正好 h 层、每层尽量满
/// 3. 按 min_x 部分排序切成竖条，每个竖条再按 min_y 部分排序切成块，
///    每块递归构建高度为 h-1 的子树
pub(crate) fn build<T>(items: Vec<Node<T>>, max_entries: usize) -> Node<T> {
    let count = items.len();
    if count <= max_entries {
        return Node::internal(items, 1);
    }

    let height = target_height(count, max_entries);
    let fan_out = count.div_ceil(capacity(max_entries, height - 1));
    build_subtree(items, height, fan_out, max_entries)
}

/// 递归构建一棵高度为 `height` 的子树
fn build_subtree<T>(
    mut items: Vec<Node<T>>,
    height: usize,
    fan_out: usize,
    max_entries: usize,
) -> Node<T> {
    let count = items.len();
    if count <= max_entries || height <= 1 {
        debug_assert!(count <= max_entries, "leaf-level tile overflows a node");
        return raise_to(Node::internal(items, 1), height);
    }

    let tile_size = count.div_ceil(fan_out);
    let strip_size = tile_size * ceil_sqrt(fan_out);

    partial_sort_by_groups(&mut items, strip_size, compare_min_x);

    let mut children = Vec::with_capacity(fan_out);
    for mut strip in split_into_runs(items, strip_size) {
        partial_sort_by_groups(&mut strip, tile_size, compare_min_y);

        for tile in split_into_runs(strip, tile_size) {
            children.push(build_subtree(tile, height - 1, max_entries, max_entries));
        }
    }

    Node::internal(children, height)
}

/// 用单子节点的父节点把较矮的子树垫高，保持兄弟节点高度一致
///
/// 竖条或块的最后一段可能很小，刚好能装进一个节点，而它的兄弟还需要更多层。
fn raise_to<T>(mut node: Node<T>, height: usize) -> Node<T> {
    while node.height() < height {
        let next = node.height() + 1;
        node = Node::internal(vec![node], next);
    }
    node
}

/// 容纳 `count` 个条目所需的最小高度：满足 M^h >= count 的最小 h
fn target_height(count: usize, max_entries: usize) -> usize {
    let mut height = 1;
    while capacity(max_entries, height) < count {
        height += 1;
    }
    height
}

/// 高度为 `height` 的满树能容纳的条目数，溢出时饱和
fn capacity(max_entries: usize, height: usize) -> usize {
    (0..height).fold(1usize, |acc, _| acc.saturating_mul(max_entries))
}
