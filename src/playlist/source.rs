//! Revocable source handles.
//!
//! A `SourceRegistry` mints one `SourceHandle` per added file. The handle is
//! the only way the media element gets at the file: while it is alive it
//! resolves to the path, and dropping it revokes the entry so a stale handle
//! id can never be resolved again.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Opaque id of a minted source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

#[derive(Debug, Default)]
struct Entries {
    next_id: u64,
    live: HashMap<SourceId, PathBuf>,
}

/// Shared table of live sources. Cloning shares the same table.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    entries: Arc<Mutex<Entries>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle for `path`.
    pub fn mint(&self, path: &Path) -> SourceHandle {
        let id = {
            let mut e = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            let id = SourceId(e.next_id);
            e.next_id += 1;
            e.live.insert(id, path.to_path_buf());
            id
        };
        log::debug!("minted source {:?} for {}", id, path.display());

        SourceHandle {
            id,
            registry: self.clone(),
        }
    }

    /// Resolve a live id to its path, `None` once revoked.
    pub fn resolve(&self, id: SourceId) -> Option<PathBuf> {
        self.entries
            .lock()
            .ok()
            .and_then(|e| e.live.get(&id).cloned())
    }

    /// Number of handles that have not been revoked yet.
    pub fn live_count(&self) -> usize {
        self.entries.lock().map(|e| e.live.len()).unwrap_or(0)
    }

    fn revoke(&self, id: SourceId) {
        let mut e = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        if e.live.remove(&id).is_some() {
            log::debug!("revoked source {:?}", id);
        }
    }
}

/// Uniquely owned reference to an added file's content.
///
/// Not `Clone`: the owning `Track` decides when the source goes away.
pub struct SourceHandle {
    id: SourceId,
    registry: SourceRegistry,
}

impl SourceHandle {
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// The file behind this handle, if still registered.
    pub fn resolve(&self) -> Option<PathBuf> {
        self.registry.resolve(self.id)
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceHandle").field(&self.id.0).finish()
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}
