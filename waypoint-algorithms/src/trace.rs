use serde::{Deserialize, Serialize};
use waypoint_utils::{deserialize_cost, serialize_cost};

/// One row per node expansion of [`crate::dijkstra`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DijkstraTrace {
    /// Pop count so far, skipped pops included.
    pub iter: usize,
    pub popped_node: String,
    #[serde(serialize_with = "serialize_cost", deserialize_with = "deserialize_cost")]
    pub popped_cost: f64,
    /// Heap size after this expansion's pushes.
    pub queue_size: usize,
    pub visited_size: usize,
    pub pushes: usize,
}

/// One row per outer iteration of [`crate::climb`]. Row 0 holds the seed path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HillClimbTrace {
    pub iter: usize,
    #[serde(serialize_with = "serialize_cost", deserialize_with = "deserialize_cost")]
    pub cost: f64,
    pub improved: bool,
    pub delta: f64,
    pub evals_total: usize,
}
