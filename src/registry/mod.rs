//! In-memory content registry.
//!
//! # Data Flow
//! ```text
//! sync (only writer)
//!     → upsert / evict
//!     → ContentRegistry (RwLock<HashMap<endpoint, bytes>>)
//!     → get / list_endpoints
//!     → http dispatcher (readers)
//! ```
//!
//! # Design Decisions
//! - Readers never block each other; a writer excludes everyone
//! - Content is stored as `Arc<[u8]>` so a read hands out a cheap clone and
//!   releases the lock before any assembly work starts
//! - Shared as `Arc<ContentRegistry>`; there is no global instance

mod endpoint;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

pub use endpoint::endpoint_for_path;

/// Thread-safe mapping from endpoint name to raw file content.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    files: RwLock<HashMap<String, Arc<[u8]>>>,
}

impl ContentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content for `endpoint`.
    pub fn upsert(&self, endpoint: impl Into<String>, content: impl Into<Arc<[u8]>>) {
        self.files.write().insert(endpoint.into(), content.into());
    }

    /// Remove `endpoint`. Returns whether an entry was present.
    pub fn evict(&self, endpoint: &str) -> bool {
        self.files.write().remove(endpoint).is_some()
    }

    /// Content currently stored for `endpoint`.
    pub fn get(&self, endpoint: &str) -> Option<Arc<[u8]>> {
        self.files.read().get(endpoint).cloned()
    }

    /// Snapshot of all endpoint names, in no particular order.
    pub fn list_endpoints(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }

    /// Number of endpoints currently held.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// True when no endpoint is held.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}
