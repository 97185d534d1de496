//! Remote Client Directory
//!
//! Resolves a remote cluster name to a live admin client. Resolution happens
//! on every page fetch, so a cluster removed mid-iteration fails the next
//! page rather than the iterator's construction.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::admin::AdminClient;
use super::errors::{FetchError, FetchResult};
use crate::observability::{Event, Logger};

/// Lookup of admin clients by cluster name.
pub trait ClientDirectory: Send + Sync {
    /// Admin client for `cluster_name`.
    fn remote_admin_client(&self, cluster_name: &str) -> FetchResult<Arc<dyn AdminClient>>;
}

/// In-memory directory with explicitly registered clusters
pub struct StaticClientDirectory {
    clients: RwLock<HashMap<String, Arc<dyn AdminClient>>>,
    logger: Logger,
}

impl Default for StaticClientDirectory {
    fn default() -> Self {
        Self::new(Logger::default())
    }
}

impl StaticClientDirectory {
    /// Create an empty directory
    pub fn new(logger: Logger) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Register (or replace) the client for a cluster
    pub fn register(&self, cluster_name: impl Into<String>, client: Arc<dyn AdminClient>) {
        let cluster_name = cluster_name.into();
        match self.clients.write() {
            Ok(mut clients) => {
                clients.insert(cluster_name.clone(), client);
            }
            Err(_) => {
                self.logger.warn(
                    Event::RemoteClientRegistrationFailed,
                    &[
                        ("cluster", cluster_name.as_str()),
                        ("error", "client directory poisoned"),
                    ],
                );
                return;
            }
        }
        self.logger
            .emit(Event::RemoteClientRegistered, &[("cluster", cluster_name.as_str())]);
    }

    /// Remove a cluster. Returns whether it was registered.
    pub fn deregister(&self, cluster_name: &str) -> bool {
        let removed = match self.clients.write() {
            Ok(mut clients) => clients.remove(cluster_name).is_some(),
            Err(_) => false,
        };
        if removed {
            self.logger
                .emit(Event::RemoteClientDeregistered, &[("cluster", cluster_name)]);
        }
        removed
    }

    /// Registered cluster names, sorted
    pub fn cluster_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.clients.read() {
            Ok(clients) => clients.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

impl ClientDirectory for StaticClientDirectory {
    fn remote_admin_client(&self, cluster_name: &str) -> FetchResult<Arc<dyn AdminClient>> {
        let clients = self
            .clients
            .read()
            .map_err(|_| FetchError::cluster_resolution(cluster_name, "client directory poisoned"))?;

        clients
            .get(cluster_name)
            .cloned()
            .ok_or_else(|| FetchError::cluster_resolution(cluster_name, "unknown cluster"))
    }
}

impl fmt::Debug for StaticClientDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticClientDirectory")
            .field("clusters", &self.cluster_names())
            .finish()
    }
}
