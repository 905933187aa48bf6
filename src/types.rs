// src/types.rs
use serde::{Deserialize, Serialize};

/// Confirmation status of a transaction as reported by the chain API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    pub block_time: Option<u64>,
}

/// The previous output an input spends. Absent for coinbase-like or
/// unresolved inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrevOut {
    pub value: u64,
    pub scriptpubkey_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxInput {
    pub prevout: Option<PrevOut>,
}

/// A transaction output. Non-standard scripts carry no address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: u64,
    pub scriptpubkey_address: Option<String>,
}

/// One transaction record from the chain data provider, shaped after the
/// Blockstream esplora API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub vin: Vec<TxInput>,
    #[serde(default)]
    pub vout: Vec<TxOutput>,
    pub status: TxStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainStats {
    pub funded_txo_sum: u64,
    pub spent_txo_sum: u64,
    pub tx_count: u64,
}

/// Summary stats for an address (confirmed chain state plus mempool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: String,
    pub chain_stats: ChainStats,
    pub mempool_stats: ChainStats,
}

impl AddressInfo {
    /// Confirmed balance in satoshis.
    pub fn confirmed_balance(&self) -> i64 {
        self.chain_stats.funded_txo_sum as i64 - self.chain_stats.spent_txo_sum as i64
    }

    /// Balance including unconfirmed mempool activity.
    pub fn pending_balance(&self) -> i64 {
        self.confirmed_balance() + self.mempool_stats.funded_txo_sum as i64
            - self.mempool_stats.spent_txo_sum as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_blockstream_transaction() {
        let raw = r#"{
            "txid": "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16",
            "fee": 135,
            "vin": [
                { "prevout": { "value": 5000000000, "scriptpubkey_address": "12cbQLTFMXRnSzktFkuoG3eHoMeFtpTu3S" } },
                { "prevout": null }
            ],
            "vout": [
                { "value": 1000000000, "scriptpubkey_address": "1Q2TWHE3GMdB6BZKafqwxXtWAWgFt5Jvm3" },
                { "value": 4000000000 }
            ],
            "status": { "confirmed": true, "block_time": 1231731025 }
        }"#;

        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.vin.len(), 2);
        assert!(tx.vin[1].prevout.is_none());
        assert_eq!(tx.vout[0].value, 1_000_000_000);
        assert!(tx.vout[1].scriptpubkey_address.is_none());
        assert!(tx.status.confirmed);
    }

    #[test]
    fn test_confirmed_balance() {
        let info = AddressInfo {
            address: "bc1qtest".to_string(),
            chain_stats: ChainStats {
                funded_txo_sum: 150_000_000,
                spent_txo_sum: 40_000_000,
                tx_count: 7,
            },
            mempool_stats: ChainStats {
                funded_txo_sum: 10_000_000,
                spent_txo_sum: 0,
                tx_count: 1,
            },
        };

        assert_eq!(info.confirmed_balance(), 110_000_000);
        assert_eq!(info.pending_balance(), 120_000_000);
    }
}
