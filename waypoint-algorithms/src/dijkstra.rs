use crate::trace::DijkstraTrace;
use std::{cmp::Ordering, collections::BinaryHeap};
use waypoint_graph::{Graph, NodeId, RouteQuery, INFEASIBLE};
use waypoint_utils::RowSink;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Empty when the goal is unreachable.
    pub path: Vec<NodeId>,
    pub cost: f64,
    /// Number of heap pops, including pops that were skipped.
    pub iterations: usize,
}

impl SearchResult {
    pub fn unreachable(iterations: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: INFEASIBLE,
            iterations,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the cheapest first.
/// Equal costs pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    seq: u64,
    node: NodeId,
    parent: Option<NodeId>,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Least-cost path from `query.start` to `query.goal` that never touches
/// `query.avoid`.
///
/// The predecessor of each node is fixed when the node is finalized, and the
/// path is rebuilt from those links once the goal is popped. An unreachable
/// goal is not an error: the result has an empty path and infinite cost.
pub fn dijkstra(
    graph: &Graph,
    query: &RouteQuery,
    mut trace: Option<&mut dyn RowSink<DijkstraTrace>>,
) -> SearchResult {
    let num_nodes = graph.num_nodes();
    if query.start >= num_nodes {
        return SearchResult::unreachable(0);
    }

    let mut finalized = vec![false; num_nodes];
    let mut parent: Vec<Option<NodeId>> = vec![None; num_nodes];
    let mut num_finalized = 0;
    let mut seq = 0u64;
    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry {
        cost: 0.0,
        seq,
        node: query.start,
        parent: None,
    });

    let mut iterations = 0;
    while let Some(entry) = heap.pop() {
        iterations += 1;
        let u = entry.node;

        if query.is_avoided(u) || finalized[u] {
            continue;
        }
        finalized[u] = true;
        parent[u] = entry.parent;
        num_finalized += 1;

        let mut pushes = 0;
        for edge in graph.neighbors(u) {
            if query.is_avoided(edge.to) || finalized[edge.to] {
                continue;
            }
            seq += 1;
            heap.push(QueueEntry {
                cost: entry.cost + edge.weight,
                seq,
                node: edge.to,
                parent: Some(u),
            });
            pushes += 1;
        }

        if let Some(sink) = trace.as_mut() {
            sink.push_row(DijkstraTrace {
                iter: iterations,
                popped_node: graph.label(u).to_string(),
                popped_cost: entry.cost,
                queue_size: heap.len(),
                visited_size: num_finalized,
                pushes,
            });
        }

        if u == query.goal {
            return SearchResult {
                path: reconstruct_path(&parent, u),
                cost: entry.cost,
                iterations,
            };
        }
    }

    SearchResult::unreachable(iterations)
}

fn reconstruct_path(parent: &[Option<NodeId>], goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(p) = parent[current] {
        path.push(p);
        current = p;
    }
    path.reverse();
    path
}
