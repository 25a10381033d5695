//! Depth-first and breadth-first traversal
//!
//! Both walks are iterative and visit every vertex reachable from the start
//! over forward edges at most once. The `visit` callback returns `true` to
//! stop the walk early.
//!
//! Neighbors come out of hash maps, so [`dfs`] and [`bfs`] make no promise
//! about the order in which siblings are visited. [`dfs_sorted`] and
//! [`bfs_sorted`] expand neighbors in ascending identifier order instead.

use super::common::Neighbors;
use crate::graph::{GraphError, GraphResult, VertexKey};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Depth-first traversal from `start`
pub fn dfs<K, N, F>(view: &N, start: &K, visit: F) -> GraphResult<()>
where
    K: VertexKey,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    depth_first(view, start, |_| {}, visit)
}

/// Depth-first traversal expanding neighbors in ascending order
pub fn dfs_sorted<K, N, F>(view: &N, start: &K, visit: F) -> GraphResult<()>
where
    K: VertexKey + Ord,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    // Pushed largest first so the smallest is popped next.
    depth_first(view, start, |next| next.sort_by(|a, b| b.cmp(a)), visit)
}

/// Breadth-first traversal from `start`
pub fn bfs<K, N, F>(view: &N, start: &K, visit: F) -> GraphResult<()>
where
    K: VertexKey,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    breadth_first(view, start, |_| {}, visit)
}

/// Breadth-first traversal expanding neighbors in ascending order
pub fn bfs_sorted<K, N, F>(view: &N, start: &K, visit: F) -> GraphResult<()>
where
    K: VertexKey + Ord,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    breadth_first(view, start, |next| next.sort(), visit)
}

fn depth_first<K, N, F>(
    view: &N,
    start: &K,
    order: fn(&mut Vec<K>),
    mut visit: F,
) -> GraphResult<()>
where
    K: VertexKey,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    if !view.contains(start) {
        return Err(GraphError::vertex_not_found(start));
    }

    let mut stack = vec![start.clone()];
    let mut visited = FxHashSet::default();

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        if visit(&current) {
            break;
        }

        let mut next = view.successors(&current);
        order(&mut next);
        visited.insert(current);
        stack.extend(next);
    }

    Ok(())
}

fn breadth_first<K, N, F>(
    view: &N,
    start: &K,
    order: fn(&mut Vec<K>),
    mut visit: F,
) -> GraphResult<()>
where
    K: VertexKey,
    N: Neighbors<K>,
    F: FnMut(&K) -> bool,
{
    if !view.contains(start) {
        return Err(GraphError::vertex_not_found(start));
    }

    let mut queue = VecDeque::new();
    let mut visited = FxHashSet::default();

    visited.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        if visit(&current) {
            break;
        }

        let mut next = view.successors(&current);
        order(&mut next);
        for neighbor in next {
            // Marked on enqueue so a vertex reachable over two paths is
            // queued once.
            if visited.insert(neighbor.clone()) {
                queue.push_back(neighbor);
            }
        }
    }

    Ok(())
}
