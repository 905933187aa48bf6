// src/graph/builder.rs
//
// Transaction classification and root graph construction. A transaction is
// outgoing from the pivot when any of its inputs spends a prior output of
// the pivot; otherwise it is incoming. Inputs without a resolvable prevout
// address and outputs without an address contribute nothing.

use crate::graph::{Graph, GraphEdge, GraphNode, NodeRole};
use crate::types::Transaction;

/// Direction of a transaction relative to a pivot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// One (counterparty, edge) pair emitted by classification.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub counterparty: String,
    pub edge: GraphEdge,
}

pub fn classify_direction(tx: &Transaction, pivot: &str) -> Direction {
    let spent_from_pivot = tx.vin.iter().any(|inp| {
        inp.prevout
            .as_ref()
            .and_then(|p| p.scriptpubkey_address.as_deref())
            == Some(pivot)
    });
    if spent_from_pivot {
        Direction::Outgoing
    } else {
        Direction::Incoming
    }
}

/// Classify one transaction against a pivot and emit its node/edge
/// contributions. A malformed record (no input or output touching the
/// pivot) yields an empty list, not an error.
pub fn classify(tx: &Transaction, pivot: &str) -> Vec<Contribution> {
    let mut out = Vec::new();

    match classify_direction(tx, pivot) {
        Direction::Outgoing => {
            // pivot -> every addressed output that is not the pivot itself
            for output in &tx.vout {
                let Some(target) = output.scriptpubkey_address.as_deref() else {
                    continue;
                };
                if target == pivot {
                    continue;
                }
                out.push(Contribution {
                    counterparty: target.to_string(),
                    edge: GraphEdge {
                        id: GraphEdge::derive_id(&tx.txid, pivot, target),
                        source: pivot.to_string(),
                        target: target.to_string(),
                        value_satoshis: output.value,
                        confirmed: tx.status.confirmed,
                    },
                });
            }
        }
        Direction::Incoming => {
            // Malformed guard: an incoming transaction must actually pay
            // the pivot. Anything else yields nothing rather than an error.
            let pays_pivot = tx
                .vout
                .iter()
                .any(|o| o.scriptpubkey_address.as_deref() == Some(pivot));
            if !pays_pivot {
                return out;
            }

            // every resolved input sender -> pivot
            for input in &tx.vin {
                let Some(prevout) = input.prevout.as_ref() else {
                    continue;
                };
                let Some(source) = prevout.scriptpubkey_address.as_deref() else {
                    continue;
                };
                if source == pivot {
                    continue;
                }
                out.push(Contribution {
                    counterparty: source.to_string(),
                    edge: GraphEdge {
                        id: GraphEdge::derive_id(&tx.txid, source, pivot),
                        source: source.to_string(),
                        target: pivot.to_string(),
                        value_satoshis: prevout.value,
                        confirmed: tx.status.confirmed,
                    },
                });
            }
        }
    }

    out
}

/// Fold a transaction list into a deduplicated graph anchored at `pivot`.
///
/// The pivot is pre-seeded as the origin node; node addresses and edge ids
/// use first-write-wins so later duplicate contributions are discarded.
/// Identical inputs always produce an identical graph, which is what makes
/// expansion merges idempotent.
pub fn build_graph(txs: &[Transaction], pivot: &str) -> Graph {
    let mut graph = Graph::new();

    graph.insert_node(GraphNode {
        id: pivot.to_string(),
        is_origin: true,
        role: NodeRole::Origin,
        position: (0.0, 0.0),
    });

    for tx in txs {
        for contribution in classify(tx, pivot) {
            // Counterparty on an incoming edge supplies value (sender);
            // on an outgoing edge it receives. Bidirectional peers get
            // their final role from the layout pass.
            let role = if contribution.edge.target == pivot {
                NodeRole::Sender
            } else {
                NodeRole::Receiver
            };
            graph.insert_node(GraphNode {
                id: contribution.counterparty,
                is_origin: false,
                role,
                position: (0.0, 0.0),
            });
            graph.insert_edge(contribution.edge);
        }
    }

    graph
}
