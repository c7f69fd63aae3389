// 跨构建算法的整体测试：对所有策略检查同一组性质
//
// - MBR 是子节点的紧致并集（独立重新计算，并通过 verify 交叉检查）
// - 所有条目恰好出现一次
// - search 与暴力扫描结果一致，collides 与 search 是否为空一致
// - 树是平衡的
// - 迭代与递归遍历结果完全一致

use super::algorithms::bulk_load::LoadStrategy;
use super::algorithms::traverse::TraversalMode;
use super::{Node, RTree, Rectangle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MODES: [TraversalMode; 2] = [TraversalMode::Iterative, TraversalMode::Recursive];

fn random_points(rng: &mut StdRng, count: usize, extent: f64) -> Vec<Node<usize>> {
    (0..count)
        .map(|i| Node::point(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent), i))
        .collect()
}

fn random_rectangles(
    rng: &mut StdRng,
    count: usize,
    extent: f64,
    max_size: f64,
) -> Vec<Node<usize>> {
    (0..count)
        .map(|i| {
            let x = rng.gen_range(0.0..extent);
            let y = rng.gen_range(0.0..extent);
            let w = rng.gen_range(0.0..max_size);
            let h = rng.gen_range(0.0..max_size);
            Node::leaf(Rectangle::new(x, y, x + w, y + h), i)
        })
        .collect()
}

fn random_query(rng: &mut StdRng, extent: f64, max_size: f64) -> Rectangle {
    let x = rng.gen_range(-max_size..extent);
    let y = rng.gen_range(-max_size..extent);
    let w = rng.gen_range(0.0..max_size);
    let h = rng.gen_range(0.0..max_size);
    Rectangle::new(x, y, x + w, y + h)
}

fn brute_force(items: &[Node<usize>], query: &Rectangle) -> Vec<usize> {
    let mut hits: Vec<usize> = items
        .iter()
        .filter(|item| item.intersects(query))
        .filter_map(|item| item.data().copied())
        .collect();
    hits.sort_unstable();
    hits
}

fn sorted(values: Vec<&usize>) -> Vec<usize> {
    let mut values: Vec<usize> = values.into_iter().copied().collect();
    values.sort_unstable();
    values
}

/// 返回子树高度；独立检查 MBR、高度和扇出
fn check_node<T>(node: &Node<T>, max_entries: usize) -> usize {
    let Node::Internal { mbr, height, children } = node else {
        return 0;
    };
    assert!(!children.is_empty());
    assert!(children.len() <= max_entries);

    let mut expected = children[0].mbr();
    for child in &children[1..] {
        let b = child.mbr();
        expected = Rectangle::new(
            expected.min_x().min(b.min_x()),
            expected.min_y().min(b.min_y()),
            expected.max_x().max(b.max_x()),
            expected.max_y().max(b.max_y()),
        );
    }
    assert_eq!(*mbr, expected);

    for child in children {
        assert_eq!(check_node(child, max_entries) + 1, *height);
    }
    *height
}

#[test]
fn test_structure_invariants_all_strategies() {
    let mut rng = StdRng::seed_from_u64(42);
    for &count in &[1usize, 2, 9, 10, 81, 82, 500, 2_000] {
        for &max_entries in &[2usize, 3, 4, 9, 16] {
            let items = random_rectangles(&mut rng, count, 1000.0, 20.0);
            for strategy in LoadStrategy::ALL {
                let rtree = RTree::bulk_load(items.clone(), max_entries, strategy).unwrap();
                let height = check_node(rtree.root(), max_entries);
                assert_eq!(height, rtree.height());
                assert_eq!(rtree.verify(), Ok(()), "{} n={} M={}", strategy, count, max_entries);
            }
        }
    }
}

#[test]
fn test_every_item_appears_once() {
    let mut rng = StdRng::seed_from_u64(7);
    for &count in &[1usize, 17, 1_000, 10_000] {
        let items = random_points(&mut rng, count, 500.0);
        for strategy in LoadStrategy::ALL {
            let rtree = RTree::bulk_load(items.clone(), 9, strategy).unwrap();
            for mode in MODES {
                let leaves = sorted(rtree.leaves_with(mode));
                assert_eq!(leaves, (0..count).collect::<Vec<_>>(), "{} {:?}", strategy, mode);
            }
            assert_eq!(rtree.len(), count);
        }
    }
}

#[test]
fn test_search_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);
    let datasets = [
        random_points(&mut rng, 3_000, 1000.0),
        random_rectangles(&mut rng, 3_000, 1000.0, 30.0),
    ];

    for items in &datasets {
        for strategy in LoadStrategy::ALL {
            let rtree = RTree::bulk_load(items.clone(), 8, strategy).unwrap();
            for _ in 0..100 {
                let query = random_query(&mut rng, 1000.0, 120.0);
                let expected = brute_force(items, &query);
                for mode in MODES {
                    assert_eq!(
                        sorted(rtree.search_with(mode, &query)),
                        expected,
                        "{} {:?}",
                        strategy,
                        mode
                    );
                    assert_eq!(rtree.collides_with(mode, &query), !expected.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_point_queries_and_touching_edges() {
    let items: Vec<Node<usize>> = (0..100)
        .map(|i| Node::point((i % 10) as f64, (i / 10) as f64, i))
        .collect();
    for strategy in LoadStrategy::ALL {
        let rtree = RTree::bulk_load(items.clone(), 4, strategy).unwrap();
        // 退化为点的查询矩形
        assert_eq!(sorted(rtree.search(&Rectangle::from_point(3.0, 4.0))), vec![43]);
        // 查询边界正好落在点上
        assert_eq!(sorted(rtree.search(&Rectangle::new(9.0, 9.0, 20.0, 20.0))), vec![99]);
        assert!(!rtree.collides(&Rectangle::new(9.5, 0.0, 20.0, 20.0)));
    }
}

#[test]
fn test_duplicate_points() {
    // 大量重合的点：排序键全部相同
    let mut items: Vec<Node<usize>> = (0..300).map(|i| Node::point(5.0, 5.0, i)).collect();
    items.extend((300..320).map(|i| Node::point(50.0, 50.0, i)));
    for strategy in LoadStrategy::ALL {
        let rtree = RTree::bulk_load(items.clone(), 5, strategy).unwrap();
        assert_eq!(rtree.verify(), Ok(()));
        assert_eq!(
            sorted(rtree.search(&Rectangle::from_point(5.0, 5.0))),
            (0..300).collect::<Vec<_>>()
        );
        assert_eq!(rtree.search(&Rectangle::new(49.0, 49.0, 51.0, 51.0)).len(), 20);
    }
}

#[test]
fn test_build_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let items = random_rectangles(&mut rng, 1_500, 100.0, 5.0);
    for strategy in LoadStrategy::ALL {
        let a = RTree::bulk_load(items.clone(), 6, strategy).unwrap();
        let b = RTree::bulk_load(items.clone(), 6, strategy).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.leaves(), b.leaves());
    }
}

#[test]
fn test_iterative_and_recursive_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    let items = random_rectangles(&mut rng, 2_000, 300.0, 10.0);
    for strategy in LoadStrategy::ALL {
        let rtree = RTree::bulk_load(items.clone(), 7, strategy).unwrap();
        assert_eq!(
            rtree.leaves_with(TraversalMode::Iterative),
            rtree.leaves_with(TraversalMode::Recursive)
        );
        for _ in 0..50 {
            let query = random_query(&mut rng, 300.0, 40.0);
            assert_eq!(
                rtree.search_with(TraversalMode::Iterative, &query),
                rtree.search_with(TraversalMode::Recursive, &query)
            );
        }
    }
}

#[test]
fn test_omt_nodes_are_squarer_than_nearest_x() {
    // nearest-X 的叶子层节点是贯穿整个 Y 范围的细长竖条，半周长之和远大于 OMT
    let mut rng = StdRng::seed_from_u64(11);
    let items = random_points(&mut rng, 5_000, 1000.0);
    let omt = RTree::bulk_load(items.clone(), 9, LoadStrategy::Omt).unwrap().stats();
    let nearest_x = RTree::bulk_load(items, 9, LoadStrategy::NearestX).unwrap().stats();
    assert!(omt.total_margin < nearest_x.total_margin);
    assert_eq!(omt.items, 5_000);
}

#[test]
fn test_concurrent_queries() {
    let mut rng = StdRng::seed_from_u64(2024);
    let items = random_points(&mut rng, 5_000, 1000.0);
    let rtree = RTree::bulk_load(items.clone(), 9, LoadStrategy::Omt).unwrap();
    let queries: Vec<Rectangle> = (0..64).map(|_| random_query(&mut rng, 1000.0, 100.0)).collect();

    let results: Vec<Vec<Vec<usize>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let rtree = &rtree;
                let queries = &queries;
                scope.spawn(move || {
                    let mode = MODES[t % 2];
                    queries.iter().map(|q| sorted(rtree.search_with(mode, q))).collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, query) in queries.iter().enumerate() {
        let expected = brute_force(&items, query);
        for per_thread in &results {
            assert_eq!(per_thread[i], expected);
        }
    }
}

#[test]
fn test_max_entries_two_single_item() {
    for strategy in LoadStrategy::ALL {
        let rtree = RTree::bulk_load(vec![Node::point(0.0, 0.0, 0usize)], 2, strategy).unwrap();
        assert_eq!(rtree.height(), 1);
        assert_eq!(rtree.len(), 1);
        assert!(rtree.collides(&Rectangle::from_point(0.0, 0.0)));
    }
}
