// src/provider.rs
use crate::error::{GraphError, GraphResult};
use crate::types::{AddressInfo, Transaction};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://blockstream.info/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Source of per-address chain data. Failures must surface as typed
/// errors, never as partial results.
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Ordered transaction history for an address, newest first.
    async fn transactions(&self, address: &str) -> GraphResult<Vec<Transaction>>;

    /// Summary stats for an address.
    async fn address_info(&self, address: &str) -> GraphResult<AddressInfo>;
}

/// Provider backed by the Blockstream esplora REST API.
#[derive(Debug, Clone)]
pub struct BlockstreamProvider {
    client: reqwest::Client,
    base_url: String,
}

impl BlockstreamProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn validate(address: &str) -> GraphResult<()> {
        if address.is_empty() || address.contains('/') || address.contains(char::is_whitespace) {
            return Err(GraphError::InvalidAddress(address.to_string()));
        }
        Ok(())
    }
}

impl Default for BlockstreamProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainDataProvider for BlockstreamProvider {
    async fn transactions(&self, address: &str) -> GraphResult<Vec<Transaction>> {
        Self::validate(address)?;
        let url = format!("{}/address/{}/txs", self.base_url, address);
        debug!(address, "fetching transaction history");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GraphError::FetchFailed {
                address: address.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        Ok(response.json().await?)
    }

    async fn address_info(&self, address: &str) -> GraphResult<AddressInfo> {
        Self::validate(address)?;
        let url = format!("{}/address/{}", self.base_url, address);
        debug!(address, "fetching address info");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GraphError::FetchFailed {
                address: address.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        Ok(response.json().await?)
    }
}
