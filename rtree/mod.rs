pub mod algorithms;
pub mod error;
pub mod node;
pub mod rectangle;
#[allow(clippy::module_inception)]
pub mod rtree;

#[cfg(test)]
mod tests;

// 重新导出主要类型
pub use algorithms::debug::TreeStats;
pub use error::{IndexError, Result};
pub use node::{Node, NodeType};
pub use rectangle::Rectangle;
pub use rtree::RTree;
