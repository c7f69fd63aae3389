use crate::rtree::node::{Node, NodeType};
use crate::rtree::rectangle::Rectangle;
use crate::rtree::rtree::RTree;
use serde::Serialize;

/// 用于JSON序列化的简化树结构
#[derive(Debug, Serialize)]
pub struct TreeVisualization<'a, T> {
    /// 根节点（空树为 None）
    pub root: Option<NodeVisualization<'a, T>>,
    /// 树的配置参数
    pub config: TreeConfig,
}

/// 用于JSON序列化的树配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeConfig {
    pub max_entries: usize,
    pub min_entries: usize,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize)]
pub struct NodeVisualization<'a, T> {
    /// 节点的最小边界矩形
    pub mbr: Rectangle,
    /// 节点类型（Leaf 表示子节点是数据条目，Index 表示子节点是索引节点）
    pub node_type: NodeType,
    /// 节点高度
    pub height: usize,
    /// 数据条目（仅叶子层节点）
    pub data_entries: Vec<DataEntry<'a, T>>,
    /// 子节点（仅索引节点）
    pub child_nodes: Vec<NodeVisualization<'a, T>>,
}

/// 用于JSON序列化的数据条目
#[derive(Debug, Serialize)]
pub struct DataEntry<'a, T> {
    pub mbr: Rectangle,
    pub data: &'a T,
}

impl<T: Serialize> RTree<T> {
    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于可视化和离线比较不同构建算法
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.create_tree_visualization())
    }

    /// 创建用于可视化的树结构
    pub fn create_tree_visualization(&self) -> TreeVisualization<'_, T> {
        TreeVisualization {
            root: (!self.is_empty()).then(|| create_node_visualization(self.root())),
            config: TreeConfig {
                max_entries: self.max_entries(),
                min_entries: self.min_entries(),
            },
        }
    }
}

/// 递归创建节点的可视化结构
fn create_node_visualization<T>(node: &Node<T>) -> NodeVisualization<'_, T> {
    let mut data_entries = Vec::new();
    let mut child_nodes = Vec::new();

    for child in node.children() {
        match child.data() {
            Some(data) => data_entries.push(DataEntry { mbr: child.mbr(), data }),
            None => child_nodes.push(create_node_visualization(child)),
        }
    }

    let node_type = if child_nodes.is_empty() {
        NodeType::Leaf
    } else {
        NodeType::Index
    };

    NodeVisualization {
        mbr: node.mbr(),
        node_type,
        height: node.height(),
        data_entries,
        child_nodes,
    }
}
