//! Cycle pre-check for candidate edges
//!
//! Both checks answer one question before an edge is inserted: does a path
//! from `target` back to `source` already exist? If it does, the new edge
//! would close it. The walks are iterative with a visited set, so deep
//! graphs cannot overflow the call stack. Cost is O(V + E) per call.

use super::common::Neighbors;
use crate::graph::VertexKey;
use rustc_hash::FxHashSet;

/// Whether inserting the directed edge `source -> target` closes a cycle.
///
/// Walks backward from `source` over predecessors looking for `target`.
pub fn creates_cycle<K, N>(view: &N, source: &K, target: &K) -> bool
where
    K: VertexKey,
    N: Neighbors<K>,
{
    if source == target {
        return true;
    }

    let mut stack = vec![source.clone()];
    let mut visited = FxHashSet::default();

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        // `target` is an ancestor of `source`
        if current == *target {
            return true;
        }
        stack.extend(view.predecessors(&current));
    }

    false
}

/// Whether inserting the undirected edge `source - target` closes a cycle.
///
/// Every stack entry remembers the vertex it was reached from so the walk
/// never steps straight back over the edge it arrived on.
pub fn creates_cycle_undirected<K, N>(view: &N, source: &K, target: &K) -> bool
where
    K: VertexKey,
    N: Neighbors<K>,
{
    if source == target {
        return true;
    }

    let mut stack: Vec<(K, Option<K>)> = vec![(source.clone(), None)];
    let mut visited = FxHashSet::default();

    while let Some((current, arrival)) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if current == *target {
            return true;
        }
        for next in view.successors(&current) {
            if arrival.as_ref() == Some(&next) {
                continue;
            }
            stack.push((next, Some(current.clone())));
        }
    }

    false
}
