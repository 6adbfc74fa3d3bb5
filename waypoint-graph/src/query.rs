use crate::graph::{Graph, NodeId};
use anyhow::{anyhow, Result};

/// The fixed (start, goal, avoided) triple a search or trial runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub start: NodeId,
    pub goal: NodeId,
    pub avoid: Option<NodeId>,
}

impl RouteQuery {
    pub fn new(start: NodeId, goal: NodeId, avoid: Option<NodeId>) -> Self {
        Self { start, goal, avoid }
    }

    /// Resolves labels against `graph`.
    ///
    /// An avoided label that is not in the graph can never appear on a path,
    /// so it resolves to no avoided node at all.
    pub fn from_labels(graph: &Graph, start: &str, goal: &str, avoid: Option<&str>) -> Result<Self> {
        let start_id = graph
            .node_id(start)
            .ok_or_else(|| anyhow!("Start node '{}' is not in the graph", start))?;
        let goal_id = graph
            .node_id(goal)
            .ok_or_else(|| anyhow!("Goal node '{}' is not in the graph", goal))?;
        let avoid_id = avoid.and_then(|a| graph.node_id(a));
        Ok(Self::new(start_id, goal_id, avoid_id))
    }

    /// The avoided label, if given and not a node of `graph`.
    pub fn unresolved_avoid<'a>(graph: &Graph, avoid: Option<&'a str>) -> Option<&'a str> {
        avoid.filter(|label| graph.node_id(label).is_none())
    }

    pub fn is_avoided(&self, node: NodeId) -> bool {
        self.avoid == Some(node)
    }
}
