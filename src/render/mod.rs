// src/render/mod.rs
//
// View-model layer: turns the graph plus expansion state into what the
// rendering side actually draws. Pure data out, no drawing here.

pub mod router;

use crate::expansion::ExpansionStateStore;
use crate::graph::{Graph, NodeRole};
use serde::Serialize;

/// Color hint for an edge relative to the active pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    /// Incoming: the edge's target is the active pivot.
    Green,
    /// Outgoing: value leaving the active pivot.
    Amber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub role: NodeRole,
    pub position: (f64, f64),
    pub loading: bool,
    pub expanded: bool,
    /// Whether the UI should offer the expand affordance.
    pub expandable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    /// Unconfirmed transfers render as animated, in-flight edges.
    pub animated: bool,
    pub color: EdgeColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderGraph {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Address label: first 8 and last 6 characters joined by an ellipsis.
/// Addresses short enough to show whole are left alone.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Satoshi value formatted as whole-currency units to four decimal places.
pub fn format_value(value_satoshis: u64) -> String {
    format!("{:.4} BTC", value_satoshis as f64 / 1e8)
}

/// Build the render view of a graph. The active pivot is the graph's
/// origin node; edges flowing into it are green, edges leaving it amber.
pub fn render_graph(graph: &Graph, expansion: &ExpansionStateStore) -> RenderGraph {
    let origin_id = graph.origin().map(|n| n.id.as_str()).unwrap_or_default();

    let nodes = graph
        .nodes()
        .iter()
        .map(|n| {
            let loading = expansion.is_loading(&n.id);
            let expanded = expansion.is_expanded(&n.id);
            NodeView {
                id: n.id.clone(),
                label: truncate_address(&n.id),
                role: n.role,
                position: n.position,
                loading,
                expanded,
                expandable: !n.is_origin && !loading && !expanded,
            }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|e| EdgeView {
            id: e.id.clone(),
            source: e.source.clone(),
            target: e.target.clone(),
            label: format_value(e.value_satoshis),
            animated: !e.confirmed,
            color: if e.target == origin_id {
                EdgeColor::Green
            } else {
                EdgeColor::Amber
            },
        })
        .collect();

    RenderGraph { nodes, edges }
}
