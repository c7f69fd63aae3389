use crate::rtree::algorithms::traverse::{walk, TraversalMode};
use crate::rtree::node::Node;
use crate::rtree::rectangle::Rectangle;
use crate::rtree::rtree::RTree;

/// 查询操作相关算法
///
/// 每个查询都只基于 `traverse` 写一遍；`*_with` 版本可以选择遍历方式，
/// 不带后缀的版本使用显式栈迭代。
///
/// 非法的查询矩形（min > max 或含 NaN）不报错，统一按"不匹配任何条目"处理。
impl<T> RTree<T> {
    /// 通用遍历
    ///
    /// * `node_pred` - 对每个索引节点调用，返回 false 时跳过该子树
    /// * `leaf_pred` - 对每个数据条目调用，返回 true 时立即停止遍历
    ///
    /// 返回遍历是否被提前终止。
    pub fn traverse<'a, N, L>(&'a self, node_pred: N, leaf_pred: L) -> bool
    where
        N: FnMut(&'a Node<T>) -> bool,
        L: FnMut(&'a Node<T>) -> bool,
    {
        self.traverse_with(TraversalMode::Iterative, node_pred, leaf_pred)
    }

    pub fn traverse_with<'a, N, L>(
        &'a self,
        mode: TraversalMode,
        node_pred: N,
        leaf_pred: L,
    ) -> bool
    where
        N: FnMut(&'a Node<T>) -> bool,
        L: FnMut(&'a Node<T>) -> bool,
    {
        walk(self.root(), mode, node_pred, leaf_pred)
    }

    /// 搜索与查询矩形相交的所有条目（边界接触也算相交）
    pub fn search(&self, query: &Rectangle) -> Vec<&T> {
        self.search_with(TraversalMode::Iterative, query)
    }

    pub fn search_with(&self, mode: TraversalMode, query: &Rectangle) -> Vec<&T> {
        let mut results = Vec::new();
        if !query.is_valid() {
            return results;
        }

        self.traverse_with(
            mode,
            |node| node.intersects(query),
            |leaf| {
                if leaf.intersects(query) {
                    results.extend(leaf.data());
                }
                false
            },
        );
        results
    }

    /// 是否存在与查询矩形相交的条目，找到第一个就返回
    pub fn collides(&self, query: &Rectangle) -> bool {
        self.collides_with(TraversalMode::Iterative, query)
    }

    pub fn collides_with(&self, mode: TraversalMode, query: &Rectangle) -> bool {
        if !query.is_valid() {
            return false;
        }
        self.traverse_with(mode, |node| node.intersects(query), |leaf| leaf.intersects(query))
    }

    /// 完全位于查询矩形内的条目
    pub fn search_contained(&self, query: &Rectangle) -> Vec<&T> {
        self.search_contained_with(TraversalMode::Iterative, query)
    }

    pub fn search_contained_with(&self, mode: TraversalMode, query: &Rectangle) -> Vec<&T> {
        let mut results = Vec::new();
        if !query.is_valid() {
            return results;
        }

        self.traverse_with(
            mode,
            |node| node.intersects(query),
            |leaf| {
                if leaf.is_within(query) {
                    results.extend(leaf.data());
                }
                false
            },
        );
        results
    }

    /// 按深度优先顺序列出所有条目
    pub fn leaves(&self) -> Vec<&T> {
        self.leaves_with(TraversalMode::Iterative)
    }

    pub fn leaves_with(&self, mode: TraversalMode) -> Vec<&T> {
        let mut results = Vec::with_capacity(self.len());
        self.traverse_with(
            mode,
            |_| true,
            |leaf| {
                results.extend(leaf.data());
                false
            },
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtree::algorithms::bulk_load::LoadStrategy;

    const MODES: [TraversalMode; 2] = [TraversalMode::Iterative, TraversalMode::Recursive];

    fn diagonal(count: usize) -> Vec<Node<usize>> {
        (0..count).map(|i| Node::point(i as f64, i as f64, i)).collect()
    }

    fn sorted(mut values: Vec<&usize>) -> Vec<usize> {
        values.sort();
        values.into_iter().copied().collect()
    }

    #[test]
    fn test_nearest_x_diagonal_example() {
        let rtree = RTree::bulk_load(diagonal(9), 3, LoadStrategy::NearestX).unwrap();

        assert_eq!(rtree.height(), 2);
        assert_eq!(rtree.root().children().len(), 3);
        for child in rtree.root().children() {
            assert_eq!(child.height(), 1);
            assert_eq!(child.children().len(), 3);
        }

        let query = Rectangle::new(2.5, 2.5, 5.5, 5.5);
        for mode in MODES {
            assert_eq!(sorted(rtree.search_with(mode, &query)), vec![3, 4, 5]);
            assert!(rtree.collides_with(mode, &query));
        }
    }

    #[test]
    fn test_search_rectangles() {
        let items = vec![
            Node::leaf(Rectangle::new(0.0, 0.0, 10.0, 10.0), 1usize),
            Node::leaf(Rectangle::new(5.0, 5.0, 15.0, 15.0), 2),
            Node::leaf(Rectangle::new(20.0, 20.0, 30.0, 30.0), 3),
        ];
        let rtree = RTree::bulk_load(items, 2, LoadStrategy::Omt).unwrap();

        let results = sorted(rtree.search(&Rectangle::new(8.0, 8.0, 12.0, 12.0)));
        assert_eq!(results, vec![1, 2]);

        assert!(rtree.search(&Rectangle::new(50.0, 50.0, 60.0, 60.0)).is_empty());
        assert!(!rtree.collides(&Rectangle::new(50.0, 50.0, 60.0, 60.0)));

        // 只接触边界也算相交
        assert_eq!(sorted(rtree.search(&Rectangle::new(30.0, 30.0, 40.0, 40.0))), vec![3]);
    }

    #[test]
    fn test_search_contained() {
        let items = vec![
            Node::leaf(Rectangle::new(0.0, 0.0, 2.0, 2.0), 1usize),
            Node::leaf(Rectangle::new(1.0, 1.0, 6.0, 6.0), 2),
            Node::point(3.0, 3.0, 3),
            Node::point(9.0, 9.0, 4),
        ];
        let rtree = RTree::bulk_load(items, 2, LoadStrategy::Str).unwrap();
        let query = Rectangle::new(0.0, 0.0, 5.0, 5.0);
        for mode in MODES {
            assert_eq!(sorted(rtree.search_contained_with(mode, &query)), vec![1, 3]);
            assert_eq!(sorted(rtree.search_with(mode, &query)), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_empty_tree_queries() {
        let rtree: RTree<usize> = RTree::empty();
        let everything = Rectangle::new(f64::MIN, f64::MIN, f64::MAX, f64::MAX);
        for mode in MODES {
            assert!(!rtree.collides_with(mode, &everything));
            assert!(rtree.search_with(mode, &everything).is_empty());
            assert!(rtree.leaves_with(mode).is_empty());
            assert!(!rtree.traverse_with(mode, |_| true, |_| true));
        }
    }

    #[test]
    fn test_malformed_query_matches_nothing() {
        let rtree = RTree::bulk_load(diagonal(50), 4, LoadStrategy::Hilbert).unwrap();
        // X 方向反向：用分量比较的话，会与 [0, 49] 范围内的条目"相交"
        let inverted = Rectangle::new(30.0, 0.0, 10.0, 49.0);
        let nan = Rectangle::new(f64::NAN, 0.0, 49.0, 49.0);
        for mode in MODES {
            for query in [inverted, nan, Rectangle::EMPTY] {
                assert!(rtree.search_with(mode, &query).is_empty());
                assert!(!rtree.collides_with(mode, &query));
                assert!(rtree.search_contained_with(mode, &query).is_empty());
            }
        }
    }

    #[test]
    fn test_leaves_in_tree_order() {
        let rtree = RTree::bulk_load(diagonal(40), 4, LoadStrategy::Morton).unwrap();
        let iterative = rtree.leaves_with(TraversalMode::Iterative);
        let recursive = rtree.leaves_with(TraversalMode::Recursive);
        assert_eq!(iterative, recursive);
        assert_eq!(sorted(iterative), (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_traverse_early_stop() {
        let rtree = RTree::bulk_load(diagonal(100), 5, LoadStrategy::Omt).unwrap();
        for mode in MODES {
            let mut visited = 0;
            let stopped = rtree.traverse_with(mode, |_| true, |_| {
                visited += 1;
                visited == 10
            });
            assert!(stopped);
            assert_eq!(visited, 10);
        }
    }

    #[test]
    fn test_search_built_from_traverse() {
        // 直接用 traverse 拼出的 search / collides 与内置版本一致
        let rtree = RTree::bulk_load(diagonal(64), 4, LoadStrategy::Str).unwrap();
        let query = Rectangle::new(10.5, 0.0, 20.5, 100.0);

        let mut manual = Vec::new();
        rtree.traverse(
            |node| node.intersects(&query),
            |leaf| {
                if leaf.intersects(&query) {
                    manual.push(*leaf.data().unwrap());
                }
                false
            },
        );
        assert_eq!(manual, rtree.search(&query).into_iter().copied().collect::<Vec<_>>());

        let hit = rtree.traverse(|node| node.intersects(&query), |leaf| leaf.intersects(&query));
        assert_eq!(hit, rtree.collides(&query));
        assert!(hit);
    }
}
