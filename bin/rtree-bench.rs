use clap::Parser;
use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtree_bulk::config::WorkloadSettings;
use rtree_bulk::logging::init_logging;
use rtree_bulk::{LoadStrategy, Node, RTree, RTreeConfig, Rectangle, Result, TraversalMode};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build bulk-loaded R-trees and benchmark window queries",
    long_about = None
)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "rtree-bench.toml")]
    config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    generate_config: bool,

    /// Load strategy: omt, str, hilbert, morton, nearest_x (overrides config file)
    #[arg(short, long)]
    strategy: Option<LoadStrategy>,

    /// Maximum entries per node (overrides config file)
    #[arg(short, long)]
    max_entries: Option<usize>,

    /// Number of generated items (overrides config file)
    #[arg(short = 'n', long)]
    items: Option<usize>,

    /// Number of window queries (overrides config file)
    #[arg(short, long)]
    queries: Option<usize>,

    /// Traversal mode: iterative, recursive (overrides config file)
    #[arg(short, long, value_parser = parse_traversal)]
    traversal: Option<TraversalMode>,

    /// Log level (overrides config file)
    #[arg(long)]
    log_level: Option<String>,

    /// 依次运行全部构建算法
    #[arg(long)]
    all: bool,

    /// 把配置中策略构建出的树导出为 JSON
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// 构建后校验树的结构
    #[arg(long)]
    verify: bool,
}

fn parse_traversal(s: &str) -> std::result::Result<TraversalMode, String> {
    match s.to_lowercase().as_str() {
        "iterative" => Ok(TraversalMode::Iterative),
        "recursive" => Ok(TraversalMode::Recursive),
        other => Err(format!(
            "Invalid traversal mode: '{}'. Must be one of: iterative, recursive",
            other
        )),
    }
}

/// 单个构建算法的测试结果
struct BenchResult {
    strategy: LoadStrategy,
    build_time: Duration,
    query_time: Duration,
    hits: usize,
    height: usize,
    overlap: f64,
    mismatches: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 生成默认配置文件
    if args.generate_config {
        let config = RTreeConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        println!("📝 You can edit this file and run the benchmark again.");
        return Ok(());
    }

    // 加载配置
    let mut config = RTreeConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(strategy) = args.strategy {
        config.index.strategy = strategy;
    }
    if let Some(max_entries) = args.max_entries {
        config.index.max_entries = max_entries;
    }
    if let Some(items) = args.items {
        config.workload.items = items;
    }
    if let Some(queries) = args.queries {
        config.workload.queries = queries;
    }
    if let Some(traversal) = args.traversal {
        config.index.traversal = traversal;
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;

    info!("🚀 Starting rtree-bench...");
    info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    // 打印配置摘要
    config.print_summary();

    let mut rng = StdRng::seed_from_u64(config.workload.seed);
    let items = generate_items(&mut rng, &config.workload);
    let queries = generate_queries(&mut rng, &config.workload);
    info!("🎲 Generated {} items and {} queries", items.len(), queries.len());

    let strategies: Vec<LoadStrategy> = if args.all {
        LoadStrategy::ALL.to_vec()
    } else {
        vec![config.index.strategy]
    };

    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let start = Instant::now();
        let tree = RTree::bulk_load(items.clone(), config.index.max_entries, strategy)?;
        let build_time = start.elapsed();
        info!("🌲 Built {} tree in {:?}", strategy, build_time);

        if args.verify {
            tree.verify()?;
            info!("✅ {} tree passed structure verification", strategy);
        }

        if strategy == config.index.strategy {
            if let Some(path) = &args.export_json {
                std::fs::write(path, tree.export_to_json()?)
                    .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
                info!("📄 Exported {} tree to {}", strategy, path.display());
            }
        }

        results.push(run_queries(&tree, strategy, build_time, config.index.traversal, &queries));
    }

    print_results(&results);

    let mismatches: usize = results.iter().map(|r| r.mismatches).sum();
    if mismatches > 0 {
        error!("❌ collides() disagreed with search() on {} queries", mismatches);
        return Err(format!("{} query mismatches", mismatches).into());
    }

    Ok(())
}

/// 生成随机条目：点或者边长不超过 extent / 100 的小矩形
fn generate_items(rng: &mut StdRng, workload: &WorkloadSettings) -> Vec<Node<usize>> {
    let extent = workload.extent;
    (0..workload.items)
        .map(|id| {
            let x = rng.gen_range(0.0..extent);
            let y = rng.gen_range(0.0..extent);
            if workload.points {
                Node::point(x, y, id)
            } else {
                let w = rng.gen_range(0.0..extent / 100.0);
                let h = rng.gen_range(0.0..extent / 100.0);
                Node::leaf(Rectangle::new(x, y, x + w, y + h), id)
            }
        })
        .collect()
}

/// 生成随机的正方形查询窗口
fn generate_queries(rng: &mut StdRng, workload: &WorkloadSettings) -> Vec<Rectangle> {
    let size = workload.query_size;
    (0..workload.queries)
        .map(|_| {
            let x = rng.gen_range(0.0..workload.extent);
            let y = rng.gen_range(0.0..workload.extent);
            Rectangle::new(x, y, x + size, y + size)
        })
        .collect()
}

/// 依次执行所有查询，并用 collides 交叉检查 search 的结果
fn run_queries(
    tree: &RTree<usize>,
    strategy: LoadStrategy,
    build_time: Duration,
    mode: TraversalMode,
    queries: &[Rectangle],
) -> BenchResult {
    let mut hits = 0;
    let mut mismatches = 0;

    let start = Instant::now();
    for query in queries {
        let found = tree.search_with(mode, query);
        hits += found.len();
        if tree.collides_with(mode, query) == found.is_empty() {
            warn!("⚠️  collides() and search() disagree for {:?}", query);
            mismatches += 1;
        }
    }
    let query_time = start.elapsed();

    let stats = tree.stats();
    BenchResult {
        strategy,
        build_time,
        query_time,
        hits,
        height: stats.height,
        overlap: stats.sibling_overlap,
        mismatches,
    }
}

fn print_results(results: &[BenchResult]) {
    println!();
    println!(
        "{:<10} {:>12} {:>12} {:>10} {:>7} {:>14}",
        "strategy".bold(),
        "build".bold(),
        "queries".bold(),
        "hits".bold(),
        "height".bold(),
        "overlap".bold()
    );
    for result in results {
        let status = if result.mismatches == 0 {
            "ok".green()
        } else {
            "MISMATCH".red()
        };
        println!(
            "{:<10} {:>12} {:>12} {:>10} {:>7} {:>14} {}",
            result.strategy.to_string().cyan(),
            format!("{:.2?}", result.build_time),
            format!("{:.2?}", result.query_time),
            result.hits,
            result.height,
            format!("{:.2}", result.overlap).yellow(),
            status
        );
    }
    println!();
}
