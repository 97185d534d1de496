//! History Data Types
//!
//! Identity, range and payload types exchanged with remote clusters.
//! Event payloads stay serialized; this crate never decodes them.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque namespace identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(String);

impl NamespaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NamespaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NamespaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Workflow execution as addressed on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub run_id: String,
}

/// Identity of the single workflow run whose history is fetched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowKey {
    pub namespace_id: NamespaceId,
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowKey {
    pub fn new(
        namespace_id: impl Into<NamespaceId>,
        workflow_id: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            namespace_id: namespace_id.into(),
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }

    /// Execution part of the key.
    pub fn execution(&self) -> WorkflowExecution {
        WorkflowExecution {
            workflow_id: self.workflow_id.clone(),
            run_id: self.run_id.clone(),
        }
    }
}

/// Event-id range with branch-disambiguating versions.
///
/// Versions are opaque failover versions, not sequence counters. Ordering
/// of start and end is checked by the remote service, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRange {
    pub start_event_id: i64,
    pub start_event_version: i64,
    pub end_event_id: i64,
    pub end_event_version: i64,
}

impl EventRange {
    pub fn new(
        start_event_id: i64,
        start_event_version: i64,
        end_event_id: i64,
        end_event_version: i64,
    ) -> Self {
        Self {
            start_event_id,
            start_event_version,
            end_event_id,
            end_event_version,
        }
    }
}

/// Whether range endpoints are part of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Start and end events are returned
    Inclusive,
    /// Start and end events are excluded
    Exclusive,
}

impl BoundaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMode::Inclusive => "inclusive",
            BoundaryMode::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoding of a serialized event batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingType {
    #[default]
    Unspecified,
    Proto3,
    Json,
}

/// Raw, still-serialized batch of history events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBlob {
    pub encoding: EncodingType,
    pub data: Bytes,
}

impl DataBlob {
    pub fn new(encoding: EncodingType, data: impl Into<Bytes>) -> Self {
        Self {
            encoding,
            data: data.into(),
        }
    }
}

/// Last event id written under a given version on a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionHistoryItem {
    pub event_id: i64,
    pub version: i64,
}

/// Branch structure of a workflow's history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionHistory {
    pub branch_token: Bytes,
    pub items: Vec<VersionHistoryItem>,
}

impl VersionHistory {
    pub fn new(branch_token: impl Into<Bytes>, items: Vec<VersionHistoryItem>) -> Self {
        Self {
            branch_token: branch_token.into(),
            items,
        }
    }

    /// Last item on the branch, if any.
    pub fn last_item(&self) -> Option<&VersionHistoryItem> {
        self.items.last()
    }
}

/// One raw event batch paired with the version history of its page.
///
/// Batches from the same page share one `VersionHistory` allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBatch {
    pub version_history: Arc<VersionHistory>,
    pub raw_event_batch: DataBlob,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_key_execution() {
        let key = WorkflowKey::new("ns-1", "wf-1", "run-1");
        let execution = key.execution();
        assert_eq!(execution.workflow_id, "wf-1");
        assert_eq!(execution.run_id, "run-1");
        assert_eq!(key.namespace_id.as_str(), "ns-1");
    }

    #[test]
    fn test_namespace_id_serializes_as_string() {
        let json = serde_json::to_string(&NamespaceId::new("ns-1")).unwrap();
        assert_eq!(json, "\"ns-1\"");
    }

    #[test]
    fn test_boundary_mode_names() {
        assert_eq!(BoundaryMode::Inclusive.to_string(), "inclusive");
        assert_eq!(
            serde_json::to_string(&BoundaryMode::Exclusive).unwrap(),
            "\"exclusive\""
        );
    }

    #[test]
    fn test_version_history_last_item() {
        let history = VersionHistory::new(
            Bytes::from_static(b"branch"),
            vec![
                VersionHistoryItem { event_id: 5, version: 1 },
                VersionHistoryItem { event_id: 12, version: 3 },
            ],
        );
        assert_eq!(history.last_item().map(|i| i.event_id), Some(12));
        assert_eq!(VersionHistory::default().last_item(), None);
    }
}
