//! Pathfinding algorithms
//!
//! Unweighted shortest path (BFS) and reachability.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    // parent[idx] = Some(parent_idx); source points to itself
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];
    let mut queue = VecDeque::new();
    parent[source_idx] = Some(source_idx);
    queue.push_back(source_idx);

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let mut path = vec![view.index_to_node[target_idx]];
            let mut idx = target_idx;
            while idx != source_idx {
                idx = parent[idx]?;
                path.push(view.index_to_node[idx]);
            }
            path.reverse();
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if parent[next_idx].is_none() {
                parent[next_idx] = Some(current_idx);
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// All nodes reachable from `source` following edge direction, in BFS order.
/// The source itself comes first.
pub fn reachable_from(view: &GraphView, source: NodeId) -> Vec<NodeId> {
    let Some(&source_idx) = view.node_to_index.get(&source) else {
        return Vec::new();
    };

    let mut visited = vec![false; view.node_count];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([source_idx]);
    visited[source_idx] = true;

    while let Some(idx) = queue.pop_front() {
        order.push(view.index_to_node[idx]);
        for &next in view.successors(idx) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    order
}
