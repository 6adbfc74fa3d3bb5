use crate::graph::Graph;
use anyhow::{anyhow, Context, Result};
use std::{fs, path::Path};

/// Parses a `cityA,cityB,distance` edge list into an undirected graph.
///
/// The first line is a header and is always skipped. Lines that do not split
/// into exactly three fields are ignored. Each field is trimmed and stripped of
/// quote characters.
pub fn parse_edge_list(text: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (i, line) in text.lines().enumerate().skip(1) {
        let parts: Vec<&str> = line.trim().split(',').collect();
        if parts.len() != 3 {
            continue;
        }
        let u = clean_field(parts[0]);
        let v = clean_field(parts[1]);
        let w = clean_field(parts[2]);
        let weight: f64 = w
            .parse()
            .map_err(|_| anyhow!("Line {}: invalid distance '{}'", i + 1, w))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(anyhow!(
                "Line {}: distance must be finite and non-negative, got {}",
                i + 1,
                weight
            ));
        }
        graph.add_edge(&u, &v, weight);
    }
    Ok(graph)
}

pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read edge list: {}", path.display()))?;
    parse_edge_list(&text).with_context(|| format!("Failed to parse edge list: {}", path.display()))
}

fn clean_field(field: &str) -> String {
    field.trim().replace(['"', '\''], "")
}
