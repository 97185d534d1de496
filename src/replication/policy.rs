//! History Page Fetch Policy
//!
//! Holds everything fixed for one iterator (cluster, run, range, boundary
//! mode, caller context) and turns a continuation token into exactly one
//! remote call.
//!
//! Per page:
//! 1. Derive a call context (per-page timeout, version headers)
//! 2. Resolve the cluster's admin client
//! 3. Call the inclusive or exclusive operation
//! 4. Assemble batches, or log and return the error unchanged

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::admin::{RawHistoryRequest, RawHistoryResponse};
use super::assembler::assemble_batches;
use super::context::{RequestContext, VersionHeaders};
use super::directory::ClientDirectory;
use super::errors::{FetchError, FetchResult};
use super::types::{BoundaryMode, EventRange, HistoryBatch, WorkflowKey};
use crate::collection::{Page, PageFetcher};
use crate::observability::{Event, Logger};

/// Page source for one workflow run's remote history
pub struct HistoryPageFetcher {
    clients: Arc<dyn ClientDirectory>,
    logger: Logger,
    ctx: RequestContext,
    remote_cluster: String,
    key: WorkflowKey,
    range: EventRange,
    mode: BoundaryMode,
    page_size: i32,
    request_timeout: Duration,
    headers: VersionHeaders,
}

impl HistoryPageFetcher {
    /// Build the policy. `logger` should already carry the run id tag.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clients: Arc<dyn ClientDirectory>,
        logger: Logger,
        ctx: RequestContext,
        remote_cluster: String,
        key: WorkflowKey,
        range: EventRange,
        mode: BoundaryMode,
        page_size: i32,
        request_timeout: Duration,
        headers: VersionHeaders,
    ) -> Self {
        Self {
            clients,
            logger,
            ctx,
            remote_cluster,
            key,
            range,
            mode,
            page_size,
            request_timeout,
            headers,
        }
    }

    pub fn range(&self) -> EventRange {
        self.range
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    fn request(&self, token: Option<Bytes>) -> RawHistoryRequest {
        RawHistoryRequest {
            namespace_id: self.key.namespace_id.clone(),
            execution: self.key.execution(),
            start_event_id: self.range.start_event_id,
            start_event_version: self.range.start_event_version,
            end_event_id: self.range.end_event_id,
            end_event_version: self.range.end_event_version,
            maximum_page_size: self.page_size,
            next_page_token: token.unwrap_or_default(),
        }
    }

    async fn fetch_raw(&self, token: Option<Bytes>) -> FetchResult<RawHistoryResponse> {
        // Cancelled on drop, whichever way this returns
        let call = self.ctx.call(self.request_timeout, self.headers.clone());

        let client = self.clients.remote_admin_client(&self.remote_cluster)?;
        let request = self.request(token);

        match self.mode {
            BoundaryMode::Inclusive => {
                call.run(client.get_workflow_execution_raw_history(&call, request))
                    .await
            }
            BoundaryMode::Exclusive => {
                call.run(client.get_workflow_execution_raw_history_v2(&call, request))
                    .await
            }
        }
    }
}

#[async_trait]
impl PageFetcher<HistoryBatch> for HistoryPageFetcher {
    type Error = FetchError;

    async fn fetch_page(&self, token: Option<Bytes>) -> FetchResult<Page<HistoryBatch>> {
        let response = match self.fetch_raw(token).await {
            Ok(response) => response,
            Err(err) => {
                self.logger.error(
                    Event::HistoryFetchFailed,
                    &[
                        ("cluster", self.remote_cluster.as_str()),
                        ("mode", self.mode.as_str()),
                        ("error", err.to_string().as_str()),
                    ],
                );
                return Err(err);
            }
        };

        let page = Page::new(
            assemble_batches(response.history_batches, response.version_history),
            response.next_page_token,
        );

        self.logger.trace(
            Event::HistoryPageFetched,
            &[
                ("cluster", self.remote_cluster.as_str()),
                ("batches", page.items.len().to_string().as_str()),
                ("has_more", if page.has_more() { "true" } else { "false" }),
            ],
        );

        Ok(page)
    }
}

impl std::fmt::Debug for HistoryPageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryPageFetcher")
            .field("remote_cluster", &self.remote_cluster)
            .field("key", &self.key)
            .field("range", &self.range)
            .field("mode", &self.mode)
            .field("page_size", &self.page_size)
            .finish()
    }
}
