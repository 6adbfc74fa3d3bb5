use crate::graph::Graph;
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct InstanceSettings {
    pub num_nodes: usize,
    /// Each node is joined to this many of its nearest neighbours.
    pub degree: usize,
}

/// A synthetic city map: nodes scattered on a 1000x1000 grid, each joined to
/// its nearest neighbours with Euclidean edge weights.
#[derive(Debug, Clone)]
pub struct Instance {
    pub seed: [u8; 32],
    pub settings: InstanceSettings,
    pub node_positions: Vec<(i32, i32)>,
    pub graph: Graph,
}

impl Instance {
    pub fn generate_instance(seed: &[u8; 32], settings: &InstanceSettings) -> Result<Self> {
        if settings.num_nodes < 2 {
            return Err(anyhow!("num_nodes must be at least 2"));
        }
        if settings.degree == 0 || settings.degree >= settings.num_nodes {
            return Err(anyhow!(
                "degree must be between 1 and {}",
                settings.num_nodes - 1
            ));
        }
        let mut rng = SmallRng::from_seed(*seed);
        let num_nodes = settings.num_nodes;

        let mut node_positions: Vec<(i32, i32)> = Vec::with_capacity(num_nodes);
        let mut node_positions_set: HashSet<(i32, i32)> = HashSet::with_capacity(num_nodes);
        while node_positions.len() < num_nodes {
            let pos = (rng.gen_range(0..=1000), rng.gen_range(0..=1000));
            if node_positions_set.contains(&pos) {
                continue;
            }
            node_positions.push(pos);
            node_positions_set.insert(pos);
        }

        let distance = |a: usize, b: usize| {
            let dx = (node_positions[a].0 - node_positions[b].0) as f64;
            let dy = (node_positions[a].1 - node_positions[b].1) as f64;
            dx.hypot(dy)
        };

        let mut graph = Graph::new();
        for node in 0..num_nodes {
            graph.add_node(&node_label(node));
        }
        let mut joined: HashSet<(usize, usize)> = HashSet::new();
        for a in 0..num_nodes {
            let mut others: Vec<usize> = (0..num_nodes).filter(|&b| b != a).collect();
            others.sort_by(|&x, &y| distance(a, x).total_cmp(&distance(a, y)));
            for &b in others.iter().take(settings.degree) {
                let key = (a.min(b), a.max(b));
                if joined.insert(key) {
                    graph.add_edge(&node_label(a), &node_label(b), distance(a, b));
                }
            }
        }

        Ok(Self {
            seed: *seed,
            settings: *settings,
            node_positions,
            graph,
        })
    }
}

pub fn node_label(node: usize) -> String {
    format!("N{}", node)
}
