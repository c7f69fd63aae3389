/// R-tree 索引错误类型
///
/// - 配置错误（`InvalidMaxEntries`、`EmptyInput`、`NotALeaf`、`InvalidLeafBounds`）
///   在构建开始前检出，此时还没有任何节点被改动
/// - `Unsupported`：索引构建完成后是只读的，任何修改操作都会返回此错误
/// - `CorruptTree`：结构校验（`RTree::verify`）发现不变量被破坏
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("max_entries must be at least 2, got {max_entries}")]
    InvalidMaxEntries { max_entries: usize },

    #[error("cannot bulk load zero items, use RTree::empty() for an empty index")]
    EmptyInput,

    #[error("item {index} is an internal node, bulk load expects data items only")]
    NotALeaf { index: usize },

    #[error("item {index} has a non-finite or inverted bounding box")]
    InvalidLeafBounds { index: usize },

    #[error("operation '{operation}' is not supported on a read-only index")]
    Unsupported { operation: &'static str },

    #[error("tree invariant violated: {reason}")]
    CorruptTree { reason: String },
}

pub type Result<T> = std::result::Result<T, IndexError>;
