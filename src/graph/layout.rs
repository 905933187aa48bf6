// src/graph/layout.rs
//
// Deterministic initial placement. The root build puts senders in a fixed
// left column and receivers in a fixed right column; expansions place new
// nodes on a ring around the expanded pivot. Neither pass ever moves a
// node that already has a position.

use crate::graph::{Graph, NodeRole};

pub const COL_X_LEFT: f64 = -440.0;
pub const COL_X_RIGHT: f64 = 440.0;
pub const ROW_SPACING: f64 = 90.0;
pub const EXPANSION_RADIUS: f64 = 260.0;

/// Vertical position of the i-th of `total` nodes in a column, centered
/// on y = 0.
pub fn column_y(idx: usize, total: usize) -> f64 {
    ((total as f64 - 1.0) / -2.0 + idx as f64) * ROW_SPACING
}

/// Assign final roles and column positions for a freshly built root graph.
///
/// Counterparties with edges in both directions go to whichever side moved
/// more total value; an exact tie goes to the sender column.
pub fn apply_root_layout(graph: &mut Graph) {
    let Some(origin_id) = graph.origin().map(|n| n.id.clone()) else {
        return;
    };

    let mut senders: Vec<String> = Vec::new();
    let mut receivers: Vec<String> = Vec::new();

    for node in graph.nodes() {
        if node.is_origin {
            continue;
        }

        let mut sent_vol: u64 = 0; // node -> origin
        let mut recv_vol: u64 = 0; // origin -> node
        let mut is_sender = false;
        let mut is_receiver = false;

        for edge in graph.edges() {
            if edge.source == node.id && edge.target == origin_id {
                is_sender = true;
                sent_vol += edge.value_satoshis;
            } else if edge.source == origin_id && edge.target == node.id {
                is_receiver = true;
                recv_vol += edge.value_satoshis;
            }
        }

        match (is_sender, is_receiver) {
            (true, true) => {
                if sent_vol >= recv_vol {
                    senders.push(node.id.clone());
                } else {
                    receivers.push(node.id.clone());
                }
            }
            (true, false) => senders.push(node.id.clone()),
            (false, true) => receivers.push(node.id.clone()),
            (false, false) => {}
        }
    }

    if let Some(origin) = graph.node_mut(&origin_id) {
        origin.position = (0.0, 0.0);
        origin.role = NodeRole::Origin;
    }

    let total = senders.len();
    for (i, id) in senders.iter().enumerate() {
        if let Some(node) = graph.node_mut(id) {
            node.role = NodeRole::Sender;
            node.position = (COL_X_LEFT, column_y(i, total));
        }
    }

    let total = receivers.len();
    for (i, id) in receivers.iter().enumerate() {
        if let Some(node) = graph.node_mut(id) {
            node.role = NodeRole::Receiver;
            node.position = (COL_X_RIGHT, column_y(i, total));
        }
    }
}

/// Positions for `count` new nodes spread evenly on a fixed-radius circle
/// around `center`. Purely a rendering default for freshly merged nodes.
pub fn radial_positions(center: (f64, f64), count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / count as f64;
            (
                center.0 + EXPANSION_RADIUS * angle.cos(),
                center.1 + EXPANSION_RADIUS * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build_graph;
    use crate::types::{PrevOut, Transaction, TxInput, TxOutput, TxStatus};

    fn transfer(txid: &str, from: &str, to: &str, value: u64) -> Transaction {
        Transaction {
            txid: txid.to_string(),
            fee: 100,
            vin: vec![TxInput {
                prevout: Some(PrevOut {
                    value,
                    scriptpubkey_address: Some(from.to_string()),
                }),
            }],
            vout: vec![TxOutput {
                value,
                scriptpubkey_address: Some(to.to_string()),
            }],
            status: TxStatus {
                confirmed: true,
                block_time: Some(1_700_000_000),
            },
        }
    }

    #[test]
    fn test_column_symmetric_about_zero_and_monotone() {
        for total in [1usize, 2, 3, 4, 5, 8] {
            let ys: Vec<f64> = (0..total).map(|i| column_y(i, total)).collect();

            let sum: f64 = ys.iter().sum();
            assert!(sum.abs() < 1e-9, "not centered for total={total}");

            for pair in ys.windows(2) {
                assert!(pair[1] > pair[0], "not monotone for total={total}");
            }
        }
    }

    #[test]
    fn test_senders_left_receivers_right() {
        let txs = vec![
            transfer("t1", "S", "P", 30_000_000),
            transfer("t2", "P", "R", 20_000_000),
        ];
        let mut graph = build_graph(&txs, "P");
        apply_root_layout(&mut graph);

        let sender = graph.node("S").unwrap();
        assert_eq!(sender.role, NodeRole::Sender);
        assert_eq!(sender.position, (COL_X_LEFT, 0.0));

        let receiver = graph.node("R").unwrap();
        assert_eq!(receiver.role, NodeRole::Receiver);
        assert_eq!(receiver.position, (COL_X_RIGHT, 0.0));

        assert_eq!(graph.node("P").unwrap().position, (0.0, 0.0));
    }

    #[test]
    fn test_bidirectional_tie_goes_to_sender_column() {
        let txs = vec![
            transfer("t1", "B", "P", 25_000_000),
            transfer("t2", "P", "B", 25_000_000),
        ];
        let mut graph = build_graph(&txs, "P");
        apply_root_layout(&mut graph);

        let node = graph.node("B").unwrap();
        assert_eq!(node.role, NodeRole::Sender);
        assert_eq!(node.position.0, COL_X_LEFT);
    }

    #[test]
    fn test_bidirectional_higher_received_goes_right() {
        let txs = vec![
            transfer("t1", "B", "P", 10_000_000),
            transfer("t2", "P", "B", 40_000_000),
        ];
        let mut graph = build_graph(&txs, "P");
        apply_root_layout(&mut graph);

        let node = graph.node("B").unwrap();
        assert_eq!(node.role, NodeRole::Receiver);
        assert_eq!(node.position.0, COL_X_RIGHT);
    }

    #[test]
    fn test_radial_positions_on_circle() {
        let center = (440.0, -90.0);
        let positions = radial_positions(center, 4);
        assert_eq!(positions.len(), 4);

        for (x, y) in &positions {
            let dist = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
            assert!((dist - EXPANSION_RADIUS).abs() < 1e-9);
        }

        // first node sits due east of the pivot
        assert!((positions[0].0 - (center.0 + EXPANSION_RADIUS)).abs() < 1e-9);
        assert!((positions[0].1 - center.1).abs() < 1e-9);
    }
}
