// src/lib.rs
pub mod types;
pub mod error;
pub mod provider;
pub mod graph;
pub mod expansion;
pub mod render;

use crate::error::{GraphError, GraphResult};
use crate::expansion::ExpansionStateStore;
use crate::graph::builder::build_graph;
use crate::graph::counterparties::{Counterparty, top_counterparties};
use crate::graph::layout::apply_root_layout;
use crate::graph::merge::{MergeOutcome, merge_expansion};
use crate::graph::Graph;
use crate::provider::ChainDataProvider;
use crate::render::{RenderGraph, render_graph};
use crate::types::{AddressInfo, Transaction};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of one expansion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Fetch completed and the subgraph was merged.
    Merged(MergeOutcome),
    /// The address was the origin, already expanded, or already loading;
    /// nothing was started.
    Skipped,
    /// The fetch resolved after the root pivot changed; the result belongs
    /// to a discarded session and was ignored.
    Stale,
}

/// Point-in-time copy of the session for the rendering layer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub root: Option<String>,
    pub graph: Graph,
    pub expansion: ExpansionStateStore,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

struct SessionInner {
    /// Rotates on every root load; expansion results carrying an older id
    /// are for a discarded session and get dropped.
    epoch: Uuid,
    root: Option<String>,
    root_txs: Vec<Transaction>,
    graph: Graph,
    expansion: ExpansionStateStore,
    loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SessionInner {
    fn fresh() -> Self {
        Self {
            epoch: Uuid::new_v4(),
            root: None,
            root_txs: Vec::new(),
            graph: Graph::new(),
            expansion: ExpansionStateStore::new(),
            loaded_at: None,
        }
    }
}

/// One investigation session: a money-flow graph anchored at a root
/// address, plus the expansion state machine growing it.
///
/// The graph and expansion state are owned exclusively by this session and
/// only ever mutated behind its lock; concurrent expansions fetch without
/// the lock and apply their merge on re-acquiry, so completion order never
/// changes the resulting graph.
#[derive(Clone)]
pub struct GraphSession {
    provider: Arc<dyn ChainDataProvider>,
    inner: Arc<RwLock<SessionInner>>,
}

impl GraphSession {
    pub fn new(provider: Arc<dyn ChainDataProvider>) -> Self {
        Self {
            provider,
            inner: Arc::new(RwLock::new(SessionInner::fresh())),
        }
    }

    /// Build (or rebuild) the root graph for `address`.
    ///
    /// The previous graph and all expansion state are discarded up front,
    /// so in-flight expansions for the old root resolve as stale. A failed
    /// fetch leaves the session empty; retrying is always safe.
    pub async fn load_root(&self, address: &str) -> GraphResult<()> {
        let epoch = {
            let mut inner = self.inner.write().await;
            *inner = SessionInner::fresh();
            inner.root = Some(address.to_string());
            inner.epoch
        };

        info!(address, "loading root graph");
        let txs = self.provider.transactions(address).await?;

        let mut graph = build_graph(&txs, address);
        apply_root_layout(&mut graph);

        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            return Err(GraphError::SessionStale);
        }
        debug!(
            address,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "root graph built"
        );
        inner.root_txs = txs;
        inner.graph = graph;
        inner.loaded_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Expand a discovered address into its own subgraph and merge it in.
    ///
    /// Re-entrant requests (origin, already expanded, fetch in flight) are
    /// suppressed. The fetch runs without holding the session lock; only
    /// the merge does. On fetch failure the address drops back to
    /// unexpanded with no partial nodes or edges added.
    pub async fn expand(&self, address: &str) -> GraphResult<ExpandOutcome> {
        let epoch = {
            let mut inner = self.inner.write().await;
            if inner.root.is_none() {
                return Err(GraphError::NoRootGraph);
            }
            if inner.root.as_deref() == Some(address) || !inner.expansion.can_expand(address) {
                return Ok(ExpandOutcome::Skipped);
            }
            if !inner.graph.contains_node(address) {
                return Err(GraphError::UnknownPivot(address.to_string()));
            }
            inner.expansion.start_loading(address);
            inner.epoch
        };

        debug!(address, "expansion fetch started");
        let fetched = self.provider.transactions(address).await;

        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            // Root changed while we were fetching; the state we marked
            // loading was already reset with the old session.
            debug!(address, "expansion result discarded, session rotated");
            return Ok(ExpandOutcome::Stale);
        }

        let txs = match fetched {
            Ok(txs) => txs,
            Err(e) => {
                warn!(address, error = %e, "expansion fetch failed");
                inner.expansion.stop_loading(address);
                return Err(e);
            }
        };

        let subgraph = build_graph(&txs, address);
        let outcome = match merge_expansion(&mut inner.graph, &subgraph, address) {
            Ok(outcome) => outcome,
            Err(e) => {
                inner.expansion.stop_loading(address);
                return Err(e);
            }
        };
        inner.expansion.mark_expanded(address);
        inner.expansion.stop_loading(address);
        info!(
            address,
            nodes_added = outcome.nodes_added,
            edges_added = outcome.edges_added,
            "expansion merged"
        );
        Ok(ExpandOutcome::Merged(outcome))
    }

    /// Current graph plus expansion state, cloned for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            root: inner.root.clone(),
            graph: inner.graph.clone(),
            expansion: inner.expansion.clone(),
            loaded_at: inner.loaded_at,
        }
    }

    /// Render view of the current graph.
    pub async fn render_view(&self) -> RenderGraph {
        let inner = self.inner.read().await;
        render_graph(&inner.graph, &inner.expansion)
    }

    /// Top counterparties of the root address, over the root transaction
    /// list.
    pub async fn counterparties(&self) -> GraphResult<Vec<Counterparty>> {
        let inner = self.inner.read().await;
        let root = inner.root.as_deref().ok_or(GraphError::NoRootGraph)?;
        Ok(top_counterparties(&inner.root_txs, root))
    }

    /// Summary stats for any address, straight from the provider.
    pub async fn address_summary(&self, address: &str) -> GraphResult<AddressInfo> {
        self.provider.address_info(address).await
    }

    pub async fn root_address(&self) -> Option<String> {
        self.inner.read().await.root.clone()
    }
}
