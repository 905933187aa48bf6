// src/graph/merge.rs
//
// Expansion merge: fold a freshly built subgraph (pivoted at an address
// already in the live graph) into the live graph, adding only ids never
// seen before. Because node and edge ids are content-derived, merging is
// idempotent and commutative across concurrently completing expansions.

use crate::error::{GraphError, GraphResult};
use crate::graph::layout::radial_positions;
use crate::graph::{Graph, GraphNode, NodeRole};

/// What a merge actually changed, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub nodes_added: usize,
    pub edges_added: usize,
}

/// Merge `subgraph` (built with `pivot` as its local pivot) into `graph`.
///
/// New nodes are classified relative to the pivot — sender if they supply
/// value to it anywhere in the subgraph, receiver otherwise — and placed
/// on a ring around the pivot's current position. Nodes and edges already
/// present are left untouched, positions included.
pub fn merge_expansion(
    graph: &mut Graph,
    subgraph: &Graph,
    pivot: &str,
) -> GraphResult<MergeOutcome> {
    let pivot_pos = graph
        .node(pivot)
        .map(|n| n.position)
        .ok_or_else(|| GraphError::UnknownPivot(pivot.to_string()))?;

    let new_ids: Vec<&GraphNode> = subgraph
        .nodes()
        .iter()
        .filter(|n| !graph.contains_node(&n.id))
        .collect();

    let positions = radial_positions(pivot_pos, new_ids.len());

    let mut nodes_added = 0;
    for (node, position) in new_ids.into_iter().zip(positions) {
        let supplies_pivot = subgraph
            .edges()
            .iter()
            .any(|e| e.source == node.id && e.target == pivot);
        let role = if supplies_pivot {
            NodeRole::Sender
        } else {
            NodeRole::Receiver
        };

        if graph.insert_node(GraphNode {
            id: node.id.clone(),
            is_origin: false,
            role,
            position,
        }) {
            nodes_added += 1;
        }
    }

    let mut edges_added = 0;
    for edge in subgraph.edges() {
        if graph.insert_edge(edge.clone()) {
            edges_added += 1;
        }
    }

    Ok(MergeOutcome {
        nodes_added,
        edges_added,
    })
}
