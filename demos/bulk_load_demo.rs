use rtree_bulk::{LoadStrategy, Node, RTree, Rectangle};
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("正在用五种批量构建算法生成R-tree JSON数据用于可视化...");

    let output_dir = Path::new("visualization/example_data");
    std::fs::create_dir_all(output_dir)?;

    let items = clustered_data();
    println!("数据：{} 个矩形，分布在 4 个聚集区域", items.len());
    println!();

    for strategy in LoadStrategy::ALL {
        let rtree = RTree::bulk_load(items.clone(), 4, strategy)?;
        rtree.verify()?;

        let stats = rtree.stats();
        println!(
            "✓ {:<9} height={} nodes={:<3} overlap={:>8.2} margin={:>8.2}",
            strategy.to_string(),
            stats.height,
            stats.internal_nodes,
            stats.sibling_overlap,
            stats.total_margin
        );

        let query = Rectangle::new(20.0, 20.0, 60.0, 60.0);
        let mut hits: Vec<u32> = rtree.search(&query).into_iter().copied().collect();
        hits.sort_unstable();
        println!("  search {:?} -> {:?}", query, hits);

        let path = output_dir.join(format!("{}_tree.json", strategy));
        let mut file = File::create(&path)?;
        file.write_all(rtree.export_to_json()?.as_bytes())?;
        println!("  写入 {}", path.display());
    }

    println!();
    println!("JSON数据已生成完成！");
    Ok(())
}

/// 生成 4 个聚集区域的矩形数据，每个区域 7 个
fn clustered_data() -> Vec<Node<u32>> {
    let centers = [(20.0, 20.0), (80.0, 20.0), (20.0, 80.0), (80.0, 80.0)];
    let offsets = [
        (-8.0, -6.0),
        (-3.0, 4.0),
        (2.0, -9.0),
        (6.0, 1.0),
        (-10.0, 8.0),
        (9.0, 9.0),
        (0.0, 0.0),
    ];

    let mut items = Vec::new();
    let mut data_id = 1;
    for (cx, cy) in centers {
        for (dx, dy) in offsets {
            let (x, y) = (cx + dx, cy + dy);
            items.push(Node::leaf(Rectangle::new(x, y, x + 3.0, y + 3.0), data_id));
            data_id += 1;
        }
    }
    items
}
