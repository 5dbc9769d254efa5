//! Deduplicating registry of opened archives.
//!
//! At most one [`ArchiveHandle`] exists per key. The registry is the single
//! shared mutable structure in the core, and it is also the lookup table the
//! tile-protocol intercept consults to resolve `vectorview://{key}`
//! references during rendering.

use super::error::ArchiveError;
use super::handle::ArchiveHandle;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of opened archives keyed by their stable identity.
#[derive(Debug, Default)]
pub struct ArchiveRegistry {
    handles: DashMap<String, Arc<ArchiveHandle>>,
}

impl ArchiveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `key`, creating it with `opener` if absent.
    ///
    /// An existing handle is returned unchanged: no re-opening, no duplicate
    /// network or file handles, and the opener is not invoked. The opener
    /// constructs the handle synchronously; a handle is published only once
    /// construction has returned, before any metadata fetch begins.
    ///
    /// # Errors
    ///
    /// Propagates the opener's failure; nothing is registered in that case.
    pub fn get_or_create<F>(&self, key: &str, opener: F) -> Result<Arc<ArchiveHandle>, ArchiveError>
    where
        F: FnOnce() -> Result<ArchiveHandle, ArchiveError>,
    {
        match self.handles.entry(key.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let handle = Arc::new(opener()?);
                entry.insert(Arc::clone(&handle));
                debug!(key, "archive registered");
                Ok(handle)
            }
        }
    }

    /// Look up a handle without creating one.
    pub fn get(&self, key: &str) -> Option<Arc<ArchiveHandle>> {
        self.handles.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Install `handle` under its own key, displacing any existing handle.
    ///
    /// Used when the user drops a local file: the new archive must not be
    /// deduplicated against a previously registered archive of similar name.
    pub fn replace(&self, handle: ArchiveHandle) -> Arc<ArchiveHandle> {
        let key = handle.key().to_string();
        let handle = Arc::new(handle);
        let displaced = self.handles.insert(key.clone(), Arc::clone(&handle));
        info!(key, displaced = displaced.is_some(), "archive replaced");
        handle
    }

    /// Remove the handle for `key`, releasing this registry's reference.
    pub fn remove(&self, key: &str) -> Option<Arc<ArchiveHandle>> {
        let removed = self.handles.remove(key).map(|(_, handle)| handle);
        if removed.is_some() {
            debug!(key, "archive removed");
        }
        removed
    }

    /// Number of registered archives.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no archives are registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
