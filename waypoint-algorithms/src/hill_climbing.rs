use crate::{
    random_walk::{generate_random_path, WalkPolicy},
    trace::HillClimbTrace,
};
use rand::Rng;
use waypoint_graph::{path_cost, Graph, NodeId, RouteQuery, INFEASIBLE};
use waypoint_utils::RowSink;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Empty when no seed path could be generated.
    pub path: Vec<NodeId>,
    pub cost: f64,
    pub seed_cost: f64,
    /// Outer iterations, the final non-improving scan included.
    pub iterations: usize,
    /// Iteration of the last accepted move, 0 if the seed was never improved.
    pub last_improved: usize,
    /// Shortcut pairs examined across all scans.
    pub evaluations: usize,
}

impl OptimizationResult {
    pub fn seeding_failed() -> Self {
        Self {
            path: Vec::new(),
            cost: INFEASIBLE,
            seed_cost: INFEASIBLE,
            iterations: 0,
            last_improved: 0,
            evaluations: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Cheapest shortcut candidate, only if strictly cheaper than the scanned path.
    pub best: Option<(Vec<NodeId>, f64)>,
    pub evaluations: usize,
}

/// One full scan of the shortcut neighbourhood of `path`.
///
/// Every position pair `(i, j)` with `j >= i + 2` is examined, starting from
/// `i = 0`, so a shortcut may leave the start node directly and a three-node
/// path already costs one evaluation. Where a direct edge between `path[i]`
/// and `path[j]` is cheaper than the subpath it would replace, the shortened
/// path is costed. The cheapest such candidate across the whole scan is
/// returned.
pub fn best_shortcut(graph: &Graph, path: &[NodeId]) -> ScanOutcome {
    let len = path.len();
    let mut best = None;
    let mut best_cost = path_cost(graph, path);
    let mut evaluations = 0;

    for i in 0..len.saturating_sub(2) {
        for j in i + 2..len {
            evaluations += 1;
            let direct = match graph.edge_weight(path[i], path[j]) {
                Some(w) => w,
                None => continue,
            };
            if direct >= path_cost(graph, &path[i..=j]) {
                continue;
            }
            let candidate: Vec<NodeId> = path[..=i].iter().chain(&path[j..]).copied().collect();
            let candidate_cost = path_cost(graph, &candidate);
            if candidate_cost < best_cost {
                best_cost = candidate_cost;
                best = Some((candidate, candidate_cost));
            }
        }
    }

    ScanOutcome { best, evaluations }
}

/// Best-improvement descent over the shortcut neighbourhood, starting from `seed`.
///
/// Stops after the first scan that finds nothing strictly cheaper. Each
/// accepted move removes at least one node, so the loop always terminates.
pub fn climb(
    graph: &Graph,
    seed: Vec<NodeId>,
    mut trace: Option<&mut dyn RowSink<HillClimbTrace>>,
) -> OptimizationResult {
    let mut current_path = seed;
    let mut current_cost = path_cost(graph, &current_path);
    let seed_cost = current_cost;
    let mut iterations = 0;
    let mut last_improved = 0;
    let mut evals_total = 0;

    if let Some(sink) = trace.as_mut() {
        sink.push_row(HillClimbTrace {
            iter: 0,
            cost: current_cost,
            improved: false,
            delta: 0.0,
            evals_total,
        });
    }

    loop {
        iterations += 1;
        let scan = best_shortcut(graph, &current_path);
        evals_total += scan.evaluations;

        let (improved, delta) = match scan.best {
            Some((path, cost)) if cost < current_cost => {
                let delta = current_cost - cost;
                current_path = path;
                current_cost = cost;
                last_improved = iterations;
                (true, delta)
            }
            _ => (false, 0.0),
        };

        if let Some(sink) = trace.as_mut() {
            sink.push_row(HillClimbTrace {
                iter: iterations,
                cost: current_cost,
                improved,
                delta,
                evals_total,
            });
        }

        if !improved {
            break;
        }
    }

    OptimizationResult {
        path: current_path,
        cost: current_cost,
        seed_cost,
        iterations,
        last_improved,
        evaluations: evals_total,
    }
}

/// Seeds a path with a random walk, then improves it with [`climb`].
///
/// The whole trajectory depends only on the values drawn from `rng`.
pub fn hill_climbing<R: Rng + ?Sized>(
    graph: &Graph,
    query: &RouteQuery,
    policy: WalkPolicy,
    rng: &mut R,
    trace: Option<&mut dyn RowSink<HillClimbTrace>>,
) -> OptimizationResult {
    match generate_random_path(graph, query, policy, rng) {
        Some(seed) => climb(graph, seed, trace),
        None => {
            log::debug!(
                "No seed path from node {} to node {}",
                query.start,
                query.goal
            );
            OptimizationResult::seeding_failed()
        }
    }
}
