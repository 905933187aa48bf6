// src/graph/mod.rs
pub mod builder;
pub mod counterparties;
pub mod layout;
pub mod merge;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a node relative to the graph it was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Origin,
    Sender,
    Receiver,
}

/// One address in the money-flow graph. Exactly one node exists per
/// distinct address at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// True only for the pivot of the root build; never recomputed on merge.
    pub is_origin: bool,
    pub role: NodeRole,
    pub position: (f64, f64),
}

/// One value transfer between two addresses. Identity is the edge id,
/// not the endpoint pair: two transactions between the same pair are
/// two distinct edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub value_satoshis: u64,
    pub confirmed: bool,
}

impl GraphEdge {
    /// Content-derived identifier: the same real-world transfer produces
    /// the same id regardless of which pivot discovered it.
    pub fn derive_id(txid: &str, source: &str, target: &str) -> String {
        format!("{}-{}-{}", txid, source, target)
    }
}

/// Directed money-flow graph. Nodes and edges keep insertion order, which
/// makes repeated builds from identical inputs byte-identical.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same address already exists
    /// (first write wins). Returns whether the node was added.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Insert an edge unless the id is already present (first write wins,
    /// duplicates are discarded rather than merged). Returns whether the
    /// edge was added.
    pub fn insert_edge(&mut self, edge: GraphEdge) -> bool {
        if self.edge_index.contains_key(&edge.id) {
            return false;
        }
        self.edge_index.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
        true
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        let idx = *self.node_index.get(id)?;
        Some(&mut self.nodes[idx])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge_index.contains_key(id)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The root pivot node, if this graph was built from one.
    pub fn origin(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.is_origin)
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            is_origin: false,
            role: NodeRole::Sender,
            position: (0.0, 0.0),
        }
    }

    #[test]
    fn test_node_first_write_wins() {
        let mut g = Graph::new();
        assert!(g.insert_node(node("addr-a")));

        let mut dup = node("addr-a");
        dup.role = NodeRole::Receiver;
        assert!(!g.insert_node(dup));

        assert_eq!(g.node_count(), 1);
        assert_eq!(g.node("addr-a").unwrap().role, NodeRole::Sender);
    }

    #[test]
    fn test_edge_identity_not_endpoint_pair() {
        let mut g = Graph::new();
        let e1 = GraphEdge {
            id: GraphEdge::derive_id("tx1", "a", "b"),
            source: "a".to_string(),
            target: "b".to_string(),
            value_satoshis: 100,
            confirmed: true,
        };
        let e2 = GraphEdge {
            id: GraphEdge::derive_id("tx2", "a", "b"),
            ..e1.clone()
        };

        assert!(g.insert_edge(e1.clone()));
        assert!(g.insert_edge(e2));
        assert!(!g.insert_edge(e1));
        assert_eq!(g.edge_count(), 2);
    }
}
