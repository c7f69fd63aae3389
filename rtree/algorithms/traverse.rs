//! 通用遍历
//!
//! 所有查询（search、collides、leaves……）都只写一遍，建立在同一个访问者约定之上：
//! - 索引节点：`node_pred(node)` 返回 false 时剪掉整棵子树，否则按存储顺序访问子节点
//! - 数据条目：调用 `leaf_pred(leaf)`，返回 true 时立即停止整个遍历
//!
//! 提供两种执行方式：显式栈迭代（默认，栈深度不受树高限制）和递归。
//! 两者访问顺序完全一致，深度优先，子节点按存储顺序。

use crate::rtree::node::Node;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// 遍历执行方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// 显式栈 `Vec<&Node<T>>`
    #[default]
    Iterative,
    /// 函数调用栈
    Recursive,
}

/// 按给定方式遍历，返回是否被 `leaf_pred` 提前终止
pub(crate) fn walk<'a, T, N, L>(
    root: &'a Node<T>,
    mode: TraversalMode,
    mut node_pred: N,
    mut leaf_pred: L,
) -> bool
where
    N: FnMut(&'a Node<T>) -> bool,
    L: FnMut(&'a Node<T>) -> bool,
{
    let flow = match mode {
        TraversalMode::Iterative => walk_iterative(root, &mut node_pred, &mut leaf_pred),
        TraversalMode::Recursive => walk_recursive(root, &mut node_pred, &mut leaf_pred),
    };
    flow.is_break()
}

fn walk_iterative<'a, T, N, L>(
    root: &'a Node<T>,
    node_pred: &mut N,
    leaf_pred: &mut L,
) -> ControlFlow<()>
where
    N: FnMut(&'a Node<T>) -> bool,
    L: FnMut(&'a Node<T>) -> bool,
{
    let mut stack: Vec<&'a Node<T>> = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Node::Internal { children, .. } => {
                if node_pred(node) {
                    // 逆序入栈，出栈顺序即存储顺序
                    stack.extend(children.iter().rev());
                }
            }
            _ => {
                if leaf_pred(node) {
                    return ControlFlow::Break(());
                }
            }
        }
    }

    ControlFlow::Continue(())
}

fn walk_recursive<'a, T, N, L>(
    node: &'a Node<T>,
    node_pred: &mut N,
    leaf_pred: &mut L,
) -> ControlFlow<()>
where
    N: FnMut(&'a Node<T>) -> bool,
    L: FnMut(&'a Node<T>) -> bool,
{
    match node {
        Node::Internal { children, .. } => {
            if node_pred(node) {
                for child in children {
                    if walk_recursive(child, node_pred, leaf_pred).is_break() {
                        return ControlFlow::Break(());
                    }
                }
            }
            ControlFlow::Continue(())
        }
        _ => {
            if leaf_pred(node) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }
}
