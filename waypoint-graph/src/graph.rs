use ahash::AHashMap;

/// Dense index of an interned node label.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: f64,
}

/// An undirected, non-negatively weighted graph with string-labelled nodes.
///
/// Labels are interned on first use, so every node has a stable `NodeId`
/// for the lifetime of the graph. Adjacency lists keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    labels: Vec<String>,
    index: AHashMap<String, NodeId>,
    adj: Vec<Vec<Edge>>,
    num_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, interning it if it has not been seen.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.adj.push(Vec::new());
        id
    }

    /// Inserts `u -- v` in both adjacency lists.
    ///
    /// Weights must be finite and non-negative. Loaders are expected to reject
    /// anything else before it gets here.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> (NodeId, NodeId) {
        debug_assert!(
            weight.is_finite() && weight >= 0.0,
            "edge {} -- {} has invalid weight {}",
            u,
            v,
            weight
        );
        let u = self.add_node(u);
        let v = self.add_node(v);
        self.adj[u].push(Edge { to: v, weight });
        self.adj[v].push(Edge { to: u, weight });
        self.num_edges += 1;
        (u, v)
    }

    /// Adjacency list of `node`. Unknown nodes have no neighbours.
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Adjacency list looked up by label.
    pub fn neighbors_of(&self, label: &str) -> &[Edge] {
        match self.node_id(label) {
            Some(id) => self.neighbors(id),
            None => &[],
        }
    }

    /// Weight of the direct `u -- v` edge. With parallel edges, the cheapest one.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.neighbors(u)
            .iter()
            .filter(|edge| edge.to == v)
            .map(|edge| edge.weight)
            .reduce(f64::min)
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected edges inserted.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels_of(&self, path: &[NodeId]) -> Vec<String> {
        path.iter().map(|&n| self.labels[n].clone()).collect()
    }

    /// Maps labels to ids, or `None` if any label is unknown.
    pub fn resolve<S: AsRef<str>>(&self, labels: &[S]) -> Option<Vec<NodeId>> {
        labels.iter().map(|l| self.node_id(l.as_ref())).collect()
    }

    pub fn format_path(&self, path: &[NodeId]) -> String {
        path.iter()
            .map(|&n| self.label(n))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl<S: AsRef<str>> FromIterator<(S, S, f64)> for Graph {
    fn from_iter<I: IntoIterator<Item = (S, S, f64)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for (u, v, w) in iter {
            graph.add_edge(u.as_ref(), v.as_ref(), w);
        }
        graph
    }
}
