//! k 组部分排序（multi-select）
//!
//! 把切片重排成若干个大小为 `group_size` 的组（最后一组可以不满），保证组与组之间有序：
//! 第 i 组中的每个元素都不大于第 j 组（i < j）中的任何元素，组内顺序不作保证。
//! 比完整排序便宜得多，OMT、STR、Nearest-X 构建算法都只需要这种程度的有序性。

use std::cmp::Ordering;

/// 按组部分排序
///
/// 在组边界上做二分：每次在区间中间的组边界处调用 `select_nth_unstable_by`，
/// 然后分别处理左右两半，直到区间不超过一组。`select_nth_unstable_by` 不含随机性，
/// 同样的输入顺序总是得到同样的输出顺序。
///
/// `group_size` 为 0 时不做任何操作。
pub fn partial_sort_by_groups<E, F>(items: &mut [E], group_size: usize, mut cmp: F)
where
    F: FnMut(&E, &E) -> Ordering,
{
    if group_size == 0 {
        return;
    }

    // 半开区间 [left, right)，left 总是 group_size 的整数倍
    let mut stack = vec![(0usize, items.len())];
    while let Some((left, right)) = stack.pop() {
        let len = right - left;
        if len <= group_size {
            continue;
        }

        let groups = len.div_ceil(group_size);
        let mid = left + (groups / 2) * group_size;
        items[left..right].select_nth_unstable_by(mid - left, &mut cmp);

        stack.push((left, mid));
        stack.push((mid, right));
    }
}
