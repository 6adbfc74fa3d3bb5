use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use waypoint_algorithms::WalkPolicy;
use waypoint_graph::{load_edge_list, Graph, Instance, InstanceSettings, RouteQuery};
use waypoint_utils::dejsonify;

fn default_num_runs() -> usize {
    10
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExperimentSettings {
    pub start: String,
    pub goal: String,
    #[serde(default)]
    pub avoid: Option<String>,
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,
    /// Seeds the generator that draws per-trial seeds. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub walk: WalkPolicy,
}

impl ExperimentSettings {
    pub fn new(start: &str, goal: &str, avoid: Option<&str>) -> Self {
        Self {
            start: start.to_string(),
            goal: goal.to_string(),
            avoid: avoid.map(str::to_string),
            num_runs: default_num_runs(),
            seed: None,
            walk: WalkPolicy::default(),
        }
    }
}

/// Accepts either a JSON string or a path to a `.json` file.
pub fn load_settings(settings: &str) -> Result<ExperimentSettings> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .with_context(|| format!("Failed to read settings file: {}", settings))?
    } else {
        settings.to_string()
    };
    dejsonify::<ExperimentSettings>(&settings).map_err(|e| anyhow!("Failed to parse settings: {}", e))
}

pub const SYNTHETIC_PREFIX: &str = "synthetic:";

/// Loads a graph from an edge-list path, or generates one from
/// `synthetic:<NUM_NODES>:<DEGREE>[:<SEED>]`.
pub fn load_graph(source: &str) -> Result<Graph> {
    match source.strip_prefix(SYNTHETIC_PREFIX) {
        Some(params) => {
            let parts: Vec<&str> = params.split(':').collect();
            if parts.len() < 2 || parts.len() > 3 {
                return Err(anyhow!(
                    "Expected {}<NUM_NODES>:<DEGREE>[:<SEED>], got '{}'",
                    SYNTHETIC_PREFIX,
                    source
                ));
            }
            let settings = InstanceSettings {
                num_nodes: parts[0]
                    .parse()
                    .with_context(|| format!("Invalid node count '{}'", parts[0]))?,
                degree: parts[1]
                    .parse()
                    .with_context(|| format!("Invalid degree '{}'", parts[1]))?,
            };
            let seed: u64 = match parts.get(2) {
                Some(s) => s.parse().with_context(|| format!("Invalid seed '{}'", s))?,
                None => 0,
            };
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&seed.to_le_bytes());
            Ok(Instance::generate_instance(&seed_bytes, &settings)?.graph)
        }
        None => load_edge_list(source),
    }
}

/// Resolves labels against `graph`, warning when the avoided label names no node.
pub fn resolve_query(
    graph: &Graph,
    start: &str,
    goal: &str,
    avoid: Option<&str>,
) -> Result<RouteQuery> {
    let query = RouteQuery::from_labels(graph, start, goal, avoid)?;
    if let Some(label) = RouteQuery::unresolved_avoid(graph, avoid) {
        log::warn!("Avoided node '{}' is not in the graph, ignoring it", label);
    }
    Ok(query)
}
