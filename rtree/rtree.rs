use crate::rtree::algorithms::bulk_load::{self, LoadStrategy};
use crate::rtree::error::{IndexError, Result};
use crate::rtree::node::Node;
use crate::rtree::rectangle::Rectangle;
use tracing::warn;

/// 默认的节点最大条目数
pub const DEFAULT_MAX_ENTRIES: usize = 9;

/// 只读的批量构建R-tree
///
/// 通过 `bulk_load` 一次性构建，之后只能查询；所有修改操作都返回 `IndexError::Unsupported`。
/// 因为构建后不再修改，`T: Sync` 时可以在多个线程中无锁并发查询。
#[derive(Debug, Clone, PartialEq)]
pub struct RTree<T> {
    /// 根节点
    pub(crate) root: Node<T>,
    /// 最大条目数M
    max_entries: usize,
    /// 最小条目数m（约为 0.4 * M，至少为 2）
    min_entries: usize,
}

impl<T> RTree<T> {
    /// 空树：根节点是一个没有子节点、MBR 为空的索引节点
    pub const fn empty() -> Self {
        RTree {
            root: Node::empty_internal(),
            max_entries: DEFAULT_MAX_ENTRIES,
            min_entries: min_entries_for(DEFAULT_MAX_ENTRIES),
        }
    }

    /// 批量构建R-tree
    ///
    /// # 参数
    /// * `items` - 数据条目（`Node::leaf` / `Node::point`），构建过程中会被重新排列
    /// * `max_entries` - 每个节点的最大条目数，至少为 2
    /// * `strategy` - 构建算法
    ///
    /// 没有条目时返回 `IndexError::EmptyInput`，需要空树请用 `RTree::empty()`
    /// 或 `bulk_load_or_empty`。
    pub fn bulk_load(
        items: Vec<Node<T>>,
        max_entries: usize,
        strategy: LoadStrategy,
    ) -> Result<Self> {
        let root = bulk_load::bulk_load(items, max_entries, strategy)?;
        Ok(RTree {
            root,
            max_entries,
            min_entries: min_entries_for(max_entries),
        })
    }

    /// 同 `bulk_load`，但没有条目时返回空树
    pub fn bulk_load_or_empty(
        items: Vec<Node<T>>,
        max_entries: usize,
        strategy: LoadStrategy,
    ) -> Result<Self> {
        if items.is_empty() {
            if max_entries < 2 {
                return Err(IndexError::InvalidMaxEntries { max_entries });
            }
            return Ok(RTree {
                root: Node::empty_internal(),
                max_entries,
                min_entries: min_entries_for(max_entries),
            });
        }
        Self::bulk_load(items, max_entries, strategy)
    }

    /// 检查R-tree是否为空
    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// 获取根节点
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// 整棵树的边界，空树为 `Rectangle::EMPTY`
    pub fn bounds(&self) -> Rectangle {
        self.root.mbr()
    }

    /// 获取最大条目数
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// 获取最小条目数
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// 树的高度（根节点高度），空树和单节点树都为 1
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// 获取总的条目数量
    pub fn len(&self) -> usize {
        fn count<T>(node: &Node<T>) -> usize {
            match node {
                Node::Internal { children, height, .. } if *height == 1 => children.len(),
                Node::Internal { children, .. } => children.iter().map(count).sum(),
                _ => 1,
            }
        }
        count(&self.root)
    }

    /// 不支持：索引构建后只读
    pub fn insert(&mut self, _item: Node<T>) -> Result<()> {
        Err(unsupported("insert"))
    }

    /// 不支持：索引构建后只读
    pub fn remove(&mut self, _query: &Rectangle) -> Result<Vec<T>> {
        Err(unsupported("remove"))
    }

    /// 不支持：索引构建后只读
    pub fn clear(&mut self) -> Result<()> {
        Err(unsupported("clear"))
    }
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// m = max(2, ceil(0.4 * M))
const fn min_entries_for(max_entries: usize) -> usize {
    let m = (max_entries * 2).div_ceil(5);
    if m < 2 {
        2
    } else {
        m
    }
}

fn unsupported(operation: &'static str) -> IndexError {
    warn!("Rejected '{}' on a read-only R-tree", operation);
    IndexError::Unsupported { operation }
}
