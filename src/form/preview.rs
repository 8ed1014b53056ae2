//! Local preview references for selected photos

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use crate::models::LocalFile;

const PREVIEW_SCHEME: &str = "blob:firegear/";

/// Issues preview URLs and keeps the previewed files alive while a handle exists
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashMap<Uuid, LocalFile>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` and return the handle owning its preview URL
    pub fn create(&self, file: &LocalFile) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.entries().insert(id, file.clone());
        PreviewHandle {
            id,
            url: format!("{}{}", PREVIEW_SCHEME, id),
            registry: self.clone(),
        }
    }

    /// File behind a live preview URL
    pub fn resolve(&self, url: &str) -> Option<LocalFile> {
        let id = url.strip_prefix(PREVIEW_SCHEME)?.parse::<Uuid>().ok()?;
        self.entries().get(&id).cloned()
    }

    /// Number of previews not yet released
    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    fn release(&self, id: &Uuid) {
        self.entries().remove(id);
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, LocalFile>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

/// Sole owner of one preview URL; dropping it releases the preview
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(&self.id);
        tracing::trace!(url = %self.url, "Preview released");
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.url).finish()
    }
}
