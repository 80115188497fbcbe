//! Implements a struct that holds the state of the proxy server.

use std::sync::Arc;

use crate::notion::NotionStore;

/// The state shared by all endpoint handlers.
///
/// There is no mutable state: the only shared resource is the Notion store
/// handle, which holds the credential read once at startup and is immutable
/// for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    /// The client for the external Notion store.
    pub store: Arc<dyn NotionStore>,
}

impl AppState {
    /// Create a new [AppState] around a Notion store implementation.
    pub fn new(store: Arc<dyn NotionStore>) -> Self {
        Self { store }
    }
}
