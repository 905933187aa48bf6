// src/graph/counterparties.rs
//
// Ranking view over the same classification logic as the graph builder.
// This never feeds the graph; it is a per-address report of who the pivot
// interacted with and how much value moved.

use crate::graph::builder::classify;
use crate::types::Transaction;
use serde::Serialize;
use std::collections::HashMap;

const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterparty {
    pub address: String,
    pub interaction_count: u64,
    pub total_volume_satoshis: u64,
}

/// Aggregate per-counterparty interaction and volume statistics and return
/// the top 10 by total volume. Ties keep first-seen order (stable sort).
pub fn top_counterparties(txs: &[Transaction], own_address: &str) -> Vec<Counterparty> {
    let mut entries: Vec<Counterparty> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tx in txs {
        for contribution in classify(tx, own_address) {
            let idx = *index
                .entry(contribution.counterparty.clone())
                .or_insert_with(|| {
                    entries.push(Counterparty {
                        address: contribution.counterparty.clone(),
                        interaction_count: 0,
                        total_volume_satoshis: 0,
                    });
                    entries.len() - 1
                });
            entries[idx].interaction_count += 1;
            entries[idx].total_volume_satoshis += contribution.edge.value_satoshis;
        }
    }

    entries.sort_by(|a, b| b.total_volume_satoshis.cmp(&a.total_volume_satoshis));
    entries.truncate(TOP_N);
    entries
}
