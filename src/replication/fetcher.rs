//! Remote History Fetcher
//!
//! Public entry point. Builds lazy iterators over one workflow run's
//! history on a remote cluster:
//! - Construction performs no I/O; the first pull fetches the first page
//! - Inclusive and exclusive ranges use different remote operations
//! - Identical arguments give independent iterators with identical output

use std::sync::Arc;

use super::config::{ConfigError, FetcherConfig};
use super::context::{RequestContext, VersionHeaders};
use super::directory::ClientDirectory;
use super::policy::HistoryPageFetcher;
use super::types::{BoundaryMode, EventRange, HistoryBatch, WorkflowKey};
use crate::collection::PagingIterator;
use crate::observability::Logger;

/// Iterator over a remote run's history batches
pub type HistoryIterator = PagingIterator<HistoryBatch, HistoryPageFetcher>;

/// Builds paginated iterators over remote workflow history.
pub trait HistoryPaginatedFetcher {
    /// History between two events, both endpoints included.
    fn single_workflow_history_inclusive(
        &self,
        ctx: &RequestContext,
        remote_cluster: &str,
        key: WorkflowKey,
        range: EventRange,
    ) -> HistoryIterator;

    /// History between two events, both endpoints excluded.
    fn single_workflow_history_exclusive(
        &self,
        ctx: &RequestContext,
        remote_cluster: &str,
        key: WorkflowKey,
        range: EventRange,
    ) -> HistoryIterator;
}

/// Fetcher backed by a client directory
#[derive(Clone)]
pub struct RemoteHistoryFetcher {
    clients: Arc<dyn ClientDirectory>,
    logger: Logger,
    config: FetcherConfig,
    headers: VersionHeaders,
}

impl RemoteHistoryFetcher {
    /// Create a fetcher with the default configuration.
    pub fn new(clients: Arc<dyn ClientDirectory>, logger: Logger) -> Self {
        let config = FetcherConfig::default();
        Self {
            clients,
            logger,
            headers: VersionHeaders::from_config(&config),
            config,
        }
    }

    /// Create a fetcher with an explicit configuration.
    pub fn with_config(
        clients: Arc<dyn ClientDirectory>,
        logger: Logger,
        config: FetcherConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clients,
            logger,
            headers: VersionHeaders::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Iterator for either boundary mode.
    pub fn single_workflow_history(
        &self,
        ctx: &RequestContext,
        remote_cluster: &str,
        key: WorkflowKey,
        range: EventRange,
        mode: BoundaryMode,
    ) -> HistoryIterator {
        PagingIterator::new(HistoryPageFetcher::new(
            Arc::clone(&self.clients),
            self.logger.with("run_id", key.run_id.clone()),
            ctx.clone(),
            remote_cluster.to_string(),
            key,
            range,
            mode,
            self.config.page_size,
            self.config.request_timeout(),
            self.headers.clone(),
        ))
    }
}

impl HistoryPaginatedFetcher for RemoteHistoryFetcher {
    fn single_workflow_history_inclusive(
        &self,
        ctx: &RequestContext,
        remote_cluster: &str,
        key: WorkflowKey,
        range: EventRange,
    ) -> HistoryIterator {
        self.single_workflow_history(ctx, remote_cluster, key, range, BoundaryMode::Inclusive)
    }

    fn single_workflow_history_exclusive(
        &self,
        ctx: &RequestContext,
        remote_cluster: &str,
        key: WorkflowKey,
        range: EventRange,
    ) -> HistoryIterator {
        self.single_workflow_history(ctx, remote_cluster, key, range, BoundaryMode::Exclusive)
    }
}

impl std::fmt::Debug for RemoteHistoryFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHistoryFetcher")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;
    use crate::replication::directory::StaticClientDirectory;

    fn fetcher() -> RemoteHistoryFetcher {
        RemoteHistoryFetcher::new(Arc::new(StaticClientDirectory::default()), Logger::default())
    }

    #[test]
    fn test_construction_is_lazy() {
        let iter = fetcher().single_workflow_history_inclusive(
            &RequestContext::new(),
            "standby",
            WorkflowKey::new("ns", "wf", "run"),
            EventRange::new(5, 1, 10, 1),
        );
        assert_eq!(iter.pages_fetched(), 0);
        assert!(!iter.is_terminated());
    }

    #[test]
    fn test_construction_logs_nothing() {
        let sink = Arc::new(MemorySink::new());
        let fetcher = RemoteHistoryFetcher::new(
            Arc::new(StaticClientDirectory::new(Logger::new(sink.clone()))),
            Logger::new(sink.clone()),
        );

        let _iter = fetcher.single_workflow_history_exclusive(
            &RequestContext::new(),
            "standby",
            WorkflowKey::new("ns", "wf", "run"),
            EventRange::new(5, 1, 10, 1),
        );
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_boundary_mode_selected_by_operation() {
        let fetcher = fetcher();
        let ctx = RequestContext::new();
        let key = WorkflowKey::new("ns", "wf", "run");
        let range = EventRange::new(5, 1, 10, 1);

        let inclusive = fetcher.single_workflow_history_inclusive(&ctx, "c", key.clone(), range);
        let exclusive = fetcher.single_workflow_history_exclusive(&ctx, "c", key, range);

        assert_eq!(inclusive.fetcher().mode(), BoundaryMode::Inclusive);
        assert_eq!(exclusive.fetcher().mode(), BoundaryMode::Exclusive);
        assert_eq!(inclusive.fetcher().range(), range);
    }

    #[test]
    fn test_with_config_validates() {
        let config = FetcherConfig {
            page_size: -1,
            ..FetcherConfig::default()
        };
        let result = RemoteHistoryFetcher::with_config(
            Arc::new(StaticClientDirectory::default()),
            Logger::default(),
            config,
        );
        assert!(matches!(result, Err(ConfigError::InvalidPageSize(-1))));
    }
}
