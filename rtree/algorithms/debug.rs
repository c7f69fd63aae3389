use crate::rtree::error::{IndexError, Result};
use crate::rtree::node::Node;
use crate::rtree::rtree::RTree;
use serde::Serialize;
use std::fmt::{Debug, Write};
use tracing::debug;

/// 树的结构统计，用于比较不同构建算法的质量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TreeStats {
    pub height: usize,
    /// 索引节点数量（含根）
    pub internal_nodes: usize,
    /// 数据条目数量
    pub items: usize,
    /// 同一父节点下兄弟索引节点两两之间的重叠面积之和
    pub sibling_overlap: f64,
    /// 所有索引节点的半周长之和
    pub total_margin: f64,
    /// 所有索引节点的面积之和
    pub total_area: f64,
}

/// R-tree调试功能实现
impl<T> RTree<T> {
    /// 校验树的结构不变量
    ///
    /// - 每个索引节点的 MBR 等于其子节点 MBR 的并集
    /// - 子节点高度 = 父节点高度 - 1（数据条目为第 0 层），即兄弟节点高度一致
    /// - 子节点数量不超过 max_entries，非根索引节点至少有一个子节点
    pub fn verify(&self) -> Result<()> {
        let root = self.root();
        if !root.is_index_node() {
            return Err(corrupt("root is not an index node".to_string()));
        }
        self.verify_node(root, "root".to_string())
    }

    fn verify_node(&self, node: &Node<T>, path: String) -> Result<()> {
        let Node::Internal { mbr, height, children } = node else {
            return Ok(());
        };

        if children.len() > self.max_entries() {
            return Err(corrupt(format!(
                "{} has {} children, max_entries is {}",
                path,
                children.len(),
                self.max_entries()
            )));
        }
        if children.is_empty() && path != "root" {
            return Err(corrupt(format!("{} is an empty index node", path)));
        }

        let expected = Node::union_of(children);
        if *mbr != expected {
            return Err(corrupt(format!(
                "{} mbr {:?} differs from union of children {:?}",
                path, mbr, expected
            )));
        }

        for (i, child) in children.iter().enumerate() {
            if child.height() + 1 != *height {
                return Err(corrupt(format!(
                    "{}[{}] has height {}, parent has height {}",
                    path,
                    i,
                    child.height(),
                    height
                )));
            }
            self.verify_node(child, format!("{}[{}]", path, i))?;
        }

        Ok(())
    }

    /// 统计树的结构信息
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            height: self.height(),
            ..TreeStats::default()
        };
        if self.is_empty() {
            return stats;
        }

        let mut items = 0;
        self.traverse(
            |node| {
                let mbr = node.mbr();
                stats.internal_nodes += 1;
                stats.total_margin += mbr.half_perimeter();
                stats.total_area += mbr.area();

                let children = node.children();
                for (i, a) in children.iter().enumerate() {
                    if !a.is_index_node() {
                        continue;
                    }
                    for b in &children[i + 1..] {
                        stats.sibling_overlap += a.mbr().intersection_area(&b.mbr());
                    }
                }
                true
            },
            |_| {
                items += 1;
                false
            },
        );

        stats.items = items;
        stats
    }
}

impl<T: Debug> RTree<T> {
    /// 生成完整的树结构文本，每个节点一行
    pub fn tree_structure(&self) -> String {
        fn write_node<T: Debug>(out: &mut String, node: &Node<T>, depth: usize, path: &str) {
            let indent = "  ".repeat(depth);
            let mbr = node.mbr();
            let _ = match node {
                Node::Internal { height, children, .. } => writeln!(
                    out,
                    "{}Node{} (height={}, mbr=[{:.2},{:.2},{:.2},{:.2}], {} children)",
                    indent,
                    path,
                    height,
                    mbr.min[0],
                    mbr.min[1],
                    mbr.max[0],
                    mbr.max[1],
                    children.len()
                ),
                Node::Leaf { data, .. } => writeln!(
                    out,
                    "{}Leaf{} {:?} at [{:.2},{:.2},{:.2},{:.2}]",
                    indent, path, data, mbr.min[0], mbr.min[1], mbr.max[0], mbr.max[1]
                ),
                Node::Point { x, y, data } => {
                    writeln!(out, "{}Point{} {:?} at ({:.2},{:.2})", indent, path, data, x, y)
                }
            };

            for (i, child) in node.children().iter().enumerate() {
                write_node(out, child, depth + 1, &format!("{}[{}]", path, i));
            }
        }

        let mut out = String::new();
        if self.is_empty() {
            out.push_str("Empty tree (no items)\n");
        } else {
            write_node(&mut out, self.root(), 0, "");
        }
        out
    }

    /// 通过 tracing 输出树结构
    pub fn print_tree_structure_debug(&self) {
        debug!("=== R-tree Structure Debug ===\n{}=== End Debug ===", self.tree_structure());
    }
}

fn corrupt(reason: String) -> IndexError {
    IndexError::CorruptTree { reason }
}
