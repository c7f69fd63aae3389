//! # rtree-bulk
//!
//! 只读的二维 R-tree 空间索引：一次性批量构建（bulk load），之后只做查询。
//!
//! 提供五种批量构建算法：
//! - OMT（Overlap-Minimizing Top-down）：查询效率最好，构建最慢
//! - STR（Sort-Tile-Recursive）：两级分块排序
//! - Hilbert / Morton 空间填充曲线排序：构建最快
//! - Nearest-X：只按 X 中点分组，最简单
//!
//! 查询（search / collides / leaves / traverse）同时提供显式栈迭代和递归两种遍历方式，
//! 两者结果完全一致。
//!
//! ```rust
//! use rtree_bulk::{LoadStrategy, Node, RTree, Rectangle};
//!
//! let items: Vec<Node<u32>> = (0..9).map(|i| Node::point(i as f64, i as f64, i)).collect();
//! let tree = RTree::bulk_load(items, 3, LoadStrategy::NearestX).unwrap();
//!
//! let mut hits: Vec<u32> = tree
//!     .search(&Rectangle::new(2.5, 2.5, 5.5, 5.5))
//!     .into_iter()
//!     .copied()
//!     .collect();
//! hits.sort();
//! assert_eq!(hits, vec![3, 4, 5]);
//! assert_eq!(tree.height(), 2);
//! ```

pub mod config;
pub mod logging;
pub mod rtree;

use std::error::Error;

// 重新导出主要的公共接口
pub use config::RTreeConfig;
pub use rtree::algorithms::bulk_load::LoadStrategy;
pub use rtree::algorithms::traverse::TraversalMode;
pub use rtree::{IndexError, Node, RTree, Rectangle};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
