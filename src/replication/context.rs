//! Request Contexts
//!
//! `RequestContext` is the caller's handle: cancellation plus an optional
//! deadline. Each page fetch derives a short-lived `CallContext` from it:
//! - deadline = min(now + per-page timeout, caller deadline)
//! - version headers attached for the remote service
//! - cancelled when dropped, whether the call succeeded or not

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::config::FetcherConfig;
use super::errors::{FetchError, FetchResult, RpcError};

/// Header carrying the client name
pub const CLIENT_NAME_HEADER: &str = "client-name";

/// Header carrying the client version
pub const CLIENT_VERSION_HEADER: &str = "client-version";

/// Header carrying the supported server version range
pub const SUPPORTED_SERVER_VERSIONS_HEADER: &str = "supported-server-versions";

/// Client identity sent with every remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionHeaders {
    pub client_name: String,
    pub client_version: String,
    pub supported_server_versions: String,
}

impl VersionHeaders {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            client_name: config.client_name.clone(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            supported_server_versions: config.supported_server_versions.clone(),
        }
    }

    /// Header name/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (CLIENT_NAME_HEADER, self.client_name.as_str()),
            (CLIENT_VERSION_HEADER, self.client_version.as_str()),
            (
                SUPPORTED_SERVER_VERSIONS_HEADER,
                self.supported_server_versions.as_str(),
            ),
        ]
    }
}

impl Default for VersionHeaders {
    fn default() -> Self {
        Self::from_config(&FetcherConfig::default())
    }
}

/// Caller-owned cancellation scope for one or more iterators.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline that is never cancelled unless asked to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context cancelled together with `token`.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    /// Bound every call made under this context by `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Bound every call made under this context by `now + timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every call derived from it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Derive the context for a single remote call.
    pub fn call(&self, timeout: Duration, headers: VersionHeaders) -> CallContext {
        let now = Instant::now();
        let mut deadline = now + timeout;
        if let Some(parent) = self.deadline {
            deadline = deadline.min(parent);
        }

        CallContext {
            cancel: self.cancel.child_token(),
            deadline,
            budget: deadline.saturating_duration_since(now),
            headers,
        }
    }
}

/// Context of one in-flight remote call.
#[derive(Debug)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Instant,
    budget: Duration,
    headers: VersionHeaders,
}

impl CallContext {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn headers(&self) -> &VersionHeaders {
        &self.headers
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token a transport can watch to abandon the call early.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Time left before the deadline.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Drive `call` to completion, cancellation, or deadline.
    ///
    /// Cancellation, then deadline expiry, win over a result that becomes
    /// ready at the same time. An already expired deadline never polls `call`.
    pub async fn run<T, Fut>(&self, call: Fut) -> FetchResult<T>
    where
        Fut: Future<Output = Result<T, RpcError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(FetchError::Cancelled),
            _ = tokio::time::sleep_until(self.deadline) => Err(FetchError::Timeout(self.budget)),
            result = call => result.map_err(FetchError::from),
        }
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
