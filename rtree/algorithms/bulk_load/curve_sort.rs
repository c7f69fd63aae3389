use super::merge_upwards;
use crate::rtree::algorithms::curve::{encode_hilbert, encode_morton, quantize};
use crate::rtree::node::Node;

/// 空间填充曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Hilbert,
    Morton,
}

impl Curve {
    fn encode(self, x: u16, y: u16) -> u32 {
        match self {
            Curve::Hilbert => encode_hilbert(x, y),
            Curve::Morton => encode_morton(x, y),
        }
    }
}

/// 空间填充曲线排序批量构建
///
/// 1. 计算所有条目的整体范围
/// 2. 把每个条目的中点量化到 16 位网格，编码成曲线序号
/// 3. 分桶快速排序：只保证大小为 M 的桶之间有序，桶内不排序
/// 4. 自底向上合并
pub(crate) fn build<T>(items: Vec<Node<T>>, max_entries: usize, curve: Curve) -> Node<T> {
    if items.len() <= max_entries {
        return Node::internal(items, 1);
    }

    let extent = Node::union_of(&items);
    let (width, height) = (extent.width(), extent.height());

    let mut keyed: Vec<(u32, Node<T>)> = items
        .into_iter()
        .map(|item| {
            let x = quantize(item.mid_x(), extent.min_x(), width);
            let y = quantize(item.mid_y(), extent.min_y(), height);
            (curve.encode(x, y), item)
        })
        .collect();

    let last = keyed.len() - 1;
    sort_by_bucket(&mut keyed, max_entries, 0, last);

    let sorted = keyed.into_iter().map(|(_, item)| item).collect();
    merge_upwards(sorted, max_entries, 1)
}

/// 分桶快速排序（闭区间 [left, right]）
///
/// Hoare 划分，取中间元素为枢轴。区间完全落在同一个桶内时停止递归，
/// 所以桶与桶之间有序而桶内保持任意顺序。递归较小的一侧、循环处理较大的一侧，
/// 栈深度不超过 O(log n)。
fn sort_by_bucket<E>(entries: &mut [(u32, E)], bucket: usize, mut left: usize, mut right: usize) {
    while left / bucket < right / bucket {
        let pivot = entries[left + (right - left) / 2].0;
        let mut i = left;
        let mut j = right;

        // 划分后 [left, j] 中的序号都 <= pivot，[j + 1, right] 中的序号都 >= pivot，
        // 且 left <= j < right
        loop {
            while entries[i].0 < pivot {
                i += 1;
            }
            while entries[j].0 > pivot {
                j -= 1;
            }
            if i >= j {
                break;
            }
            entries.swap(i, j);
            i += 1;
            j -= 1;
        }

        if j - left < right - j {
            sort_by_bucket(entries, bucket, left, j);
            left = j + 1;
        } else {
            sort_by_bucket(entries, bucket, j + 1, right);
            right = j;
        }
    }
}
