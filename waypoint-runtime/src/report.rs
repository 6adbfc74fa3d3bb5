use crate::harness::Algorithm;
use serde::{Deserialize, Serialize};
use waypoint_algorithms::{OptimizationResult, SearchResult};
use waypoint_graph::Graph;
use waypoint_utils::{deserialize_cost, serialize_cost};

/// A single algorithm result with the path spelled out in node labels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub algorithm: Algorithm,
    pub success: bool,
    pub path: Vec<String>,
    #[serde(serialize_with = "serialize_cost", deserialize_with = "deserialize_cost")]
    pub cost: f64,
    pub iterations: usize,
    pub last_improved: Option<usize>,
    pub evaluations: Option<usize>,
    pub seed: Option<u64>,
}

impl RouteReport {
    pub fn from_search(graph: &Graph, result: &SearchResult) -> Self {
        Self {
            algorithm: Algorithm::Dijkstra,
            success: result.is_success(),
            path: graph.labels_of(&result.path),
            cost: result.cost,
            iterations: result.iterations,
            last_improved: None,
            evaluations: None,
            seed: None,
        }
    }

    pub fn from_optimization(graph: &Graph, result: &OptimizationResult, seed: Option<u64>) -> Self {
        Self {
            algorithm: Algorithm::HillClimbing,
            success: result.is_success(),
            path: graph.labels_of(&result.path),
            cost: result.cost,
            iterations: result.iterations,
            last_improved: Some(result.last_improved),
            evaluations: Some(result.evaluations),
            seed,
        }
    }
}
