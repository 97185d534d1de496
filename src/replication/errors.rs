//! Remote History Fetch Errors
//!
//! Every error ends the iterator that produced it:
//! - No automatic retry
//! - No partial-page resumption
//! - Propagated unchanged to the caller

use std::time::Duration;

use thiserror::Error;

use crate::collection::FetchInterrupted;

/// Result type for remote history operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure reported by a remote admin endpoint or its transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Remote endpoint unreachable or overloaded
    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    /// Workflow or namespace unknown to the remote cluster
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the remote service (bad range, bad token)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller not allowed to read this history
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other service-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Remote history fetch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    // ==================
    // Resolution Errors
    // ==================
    /// Remote cluster name has no admin client
    #[error("Cannot resolve remote cluster {cluster}: {reason}")]
    ClusterResolution { cluster: String, reason: String },

    // ==================
    // Transport Errors
    // ==================
    /// Remote call failed
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Page fetch exceeded its deadline
    #[error("Page fetch timed out after {0:?}")]
    Timeout(Duration),

    // ==================
    // Cancellation Errors
    // ==================
    /// Caller's request context was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// A pull was dropped while its page fetch was in flight
    #[error("Page fetch interrupted")]
    Interrupted,
}

impl FetchError {
    /// Create a cluster resolution error.
    pub fn cluster_resolution(cluster: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ClusterResolution {
            cluster: cluster.into(),
            reason: reason.into(),
        }
    }

    /// Caller-side cancellation, either explicit or by dropping a pull.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled | FetchError::Interrupted)
    }

    /// Failure of the remote call itself, including deadline expiry.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Rpc(_) | FetchError::Timeout(_))
    }
}

impl From<FetchInterrupted> for FetchError {
    fn from(_: FetchInterrupted) -> Self {
        FetchError::Interrupted
    }
}
