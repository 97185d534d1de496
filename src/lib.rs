//! remote-history-fetcher - Lazy paginated reads of workflow history
//! held by a remote cluster
//!
//! Used during cross-cluster replication and repair to pull a run's raw
//! event batches, page by page, between two (event id, version) points.

pub mod collection;
pub mod observability;
pub mod replication;
