//! Remote History Replication
//!
//! Reads one workflow run's event history from a remote cluster during
//! cross-cluster replication and repair.
//!
//! - History arrives as raw (still serialized) event batches
//! - Pages are pulled lazily, one at a time, by continuation token
//! - Inclusive and exclusive ranges map to distinct remote operations
//! - No retries: the first failure ends the iterator
//!
//! Out of scope here: transport, decoding of events, reconciling histories.

mod admin;
mod assembler;
mod config;
mod context;
mod directory;
mod errors;
mod fetcher;
mod policy;
mod types;

pub use admin::{AdminClient, RawHistoryRequest, RawHistoryResponse};
pub use assembler::assemble_batches;
pub use config::{
    ConfigError, FetcherConfig, DEFAULT_CLIENT_NAME, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SUPPORTED_SERVER_VERSIONS,
};
pub use context::{
    CallContext, RequestContext, VersionHeaders, CLIENT_NAME_HEADER, CLIENT_VERSION_HEADER,
    SUPPORTED_SERVER_VERSIONS_HEADER,
};
pub use directory::{ClientDirectory, StaticClientDirectory};
pub use errors::{FetchError, FetchResult, RpcError};
pub use fetcher::{HistoryIterator, HistoryPaginatedFetcher, RemoteHistoryFetcher};
pub use policy::HistoryPageFetcher;
pub use types::{
    BoundaryMode, DataBlob, EncodingType, EventRange, HistoryBatch, NamespaceId, VersionHistory,
    VersionHistoryItem, WorkflowExecution, WorkflowKey,
};
