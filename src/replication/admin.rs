//! Remote Admin Client Contract
//!
//! Two distinct wire operations read raw history from a remote cluster:
//! - `get_workflow_execution_raw_history`: range endpoints included
//! - `get_workflow_execution_raw_history_v2`: range endpoints excluded
//!
//! The remote service enforces inclusion per operation, so they are never
//! folded into one parameterized call.

use async_trait::async_trait;
use bytes::Bytes;

use super::context::CallContext;
use super::errors::RpcError;
use super::types::{DataBlob, EventRange, NamespaceId, VersionHistory, WorkflowExecution};

/// Request shared by both raw history operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHistoryRequest {
    pub namespace_id: NamespaceId,
    pub execution: WorkflowExecution,
    pub start_event_id: i64,
    pub start_event_version: i64,
    pub end_event_id: i64,
    pub end_event_version: i64,
    pub maximum_page_size: i32,
    /// Empty on the first page
    pub next_page_token: Bytes,
}

impl RawHistoryRequest {
    /// Range carried by this request.
    pub fn range(&self) -> EventRange {
        EventRange::new(
            self.start_event_id,
            self.start_event_version,
            self.end_event_id,
            self.end_event_version,
        )
    }
}

/// One page of raw history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHistoryResponse {
    pub history_batches: Vec<DataBlob>,
    pub version_history: VersionHistory,
    /// Empty when no further page exists
    pub next_page_token: Bytes,
}

/// Admin endpoint of a remote cluster.
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Raw history with range endpoints included.
    async fn get_workflow_execution_raw_history(
        &self,
        ctx: &CallContext,
        request: RawHistoryRequest,
    ) -> Result<RawHistoryResponse, RpcError>;

    /// Raw history with range endpoints excluded.
    async fn get_workflow_execution_raw_history_v2(
        &self,
        ctx: &CallContext,
        request: RawHistoryRequest,
    ) -> Result<RawHistoryResponse, RpcError>;
}
