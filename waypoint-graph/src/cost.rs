use crate::graph::{Graph, NodeId};

/// Cost reported for paths that cannot be walked and goals that cannot be reached.
pub const INFEASIBLE: f64 = f64::INFINITY;

/// Sum of the edge weights along `path`.
///
/// Returns [`INFEASIBLE`] as soon as two consecutive nodes have no direct edge.
/// Empty and single-node paths cost nothing.
pub fn path_cost(graph: &Graph, path: &[NodeId]) -> f64 {
    let mut cost = 0.0;
    for w in path.windows(2) {
        match graph.edge_weight(w[0], w[1]) {
            Some(weight) => cost += weight,
            None => return INFEASIBLE,
        }
    }
    cost
}
