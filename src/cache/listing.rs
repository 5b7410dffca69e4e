use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::state::data::ShotSummary;

/// In-process memo of `get_shots` results, keyed by project root.
///
/// One global lock covers lookups, fills and invalidation, so a listing is
/// never read while it is being rebuilt or dropped.
#[derive(Debug, Default)]
pub struct ListingCache {
    entries: Mutex<HashMap<PathBuf, Arc<Vec<ShotSummary>>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached listing for `project`, computing it with `build` on a miss
    pub fn get_or_build<F>(&self, project: &Path, build: F) -> Arc<Vec<ShotSummary>>
    where
        F: FnOnce() -> Vec<ShotSummary>,
    {
        let mut entries = self.lock();
        if let Some(hit) = entries.get(project) {
            debug!(project = %project.display(), "shot listing cache hit");
            return Arc::clone(hit);
        }
        let listing = Arc::new(build());
        entries.insert(project.to_path_buf(), Arc::clone(&listing));
        listing
    }

    pub fn invalidate(&self, project: &Path) {
        if self.lock().remove(project).is_some() {
            debug!(project = %project.display(), "shot listing invalidated");
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, project: &Path) -> bool {
        self.lock().contains_key(project)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Vec<ShotSummary>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
