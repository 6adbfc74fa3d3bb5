use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use waypoint_graph::{Graph, NodeId, RouteQuery};

/// Which nodes a random walk refuses to step onto.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WalkPolicy {
    /// Nodes on the current path. Backtracking releases them.
    #[default]
    PathLocal,
    /// Every node entered so far, across backtracking.
    Shared,
}

struct Frame {
    candidates: Vec<NodeId>,
    next: usize,
}

/// Randomized depth-first walk from `query.start` to `query.goal`.
///
/// Each node's eligible neighbours are shuffled when the node is entered and
/// tried in that order, backtracking out of dead ends. The walk is not an
/// exhaustive search: callers retry with a fresh random source rather than
/// rely on it finding a path that exists.
pub fn generate_random_path<R: Rng + ?Sized>(
    graph: &Graph,
    query: &RouteQuery,
    policy: WalkPolicy,
    rng: &mut R,
) -> Option<Vec<NodeId>> {
    if query.start >= graph.num_nodes() || query.is_avoided(query.start) {
        return None;
    }
    if query.start == query.goal {
        return Some(vec![query.start]);
    }

    let mut excluded = vec![false; graph.num_nodes()];
    let mut path = Vec::new();
    let mut stack = Vec::new();
    stack.push(enter(graph, query, query.start, &mut excluded, &mut path, rng));

    while let Some(frame) = stack.last_mut() {
        if frame.next < frame.candidates.len() {
            let next = frame.candidates[frame.next];
            frame.next += 1;
            if next == query.goal {
                path.push(next);
                return Some(path);
            }
            let frame = enter(graph, query, next, &mut excluded, &mut path, rng);
            stack.push(frame);
        } else {
            stack.pop();
            if let Some(node) = path.pop() {
                if policy == WalkPolicy::PathLocal {
                    excluded[node] = false;
                }
            }
        }
    }
    None
}

fn enter<R: Rng + ?Sized>(
    graph: &Graph,
    query: &RouteQuery,
    node: NodeId,
    excluded: &mut [bool],
    path: &mut Vec<NodeId>,
    rng: &mut R,
) -> Frame {
    excluded[node] = true;
    path.push(node);
    let mut candidates: Vec<NodeId> = graph
        .neighbors(node)
        .iter()
        .map(|edge| edge.to)
        .filter(|&to| !excluded[to] && !query.is_avoided(to))
        .collect();
    candidates.shuffle(rng);
    Frame {
        candidates,
        next: 0,
    }
}
