use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};
use tracing::{info, warn};

use super::data::ProjectRef;
use super::project::{self, ProjectInfo};
use super::registry::Registry;
use crate::cache::{ClearScope, ListingCache, ThumbnailCache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::shot::ShotManager;

/// Session state shared by every request: the registry, both caches, and
/// the shot manager of the open project.
///
/// Opening or switching a project wipes the thumbnail cache and all
/// memoized listings, so nothing rendered afterwards can come from the
/// previous project's files.
#[derive(Debug)]
pub struct Workspace {
    registry: Mutex<Registry>,
    thumbnails: Arc<ThumbnailCache>,
    listings: Arc<ListingCache>,
    active: RwLock<Option<Arc<ShotManager>>>,
}

impl Workspace {
    pub fn new(config: &Config) -> Result<Self> {
        let registry = Registry::open(&config.data_dir)?;
        let thumbnails = ThumbnailCache::new(&config.cache_dir)?;
        Ok(Self {
            registry: Mutex::new(registry),
            thumbnails: Arc::new(thumbnails),
            listings: Arc::new(ListingCache::new()),
            active: RwLock::new(None),
        })
    }

    pub fn thumbnails(&self) -> &Arc<ThumbnailCache> {
        &self.thumbnails
    }

    pub fn create_project(&self, parent: &Path, name: &str) -> Result<ProjectInfo> {
        let info = project::create_project(parent, name)?;
        self.switch_to(&info)?;
        Ok(info)
    }

    pub fn open_project(&self, path: &Path) -> Result<ProjectInfo> {
        let info = project::open_project(path)?;
        self.switch_to(&info)?;
        Ok(info)
    }

    /// The open project, falling back to the one the registry remembers
    pub fn current_project(&self) -> Result<ProjectRef> {
        Ok(self.shot_manager()?.project().clone())
    }

    /// Shot manager of the open project
    pub fn shot_manager(&self) -> Result<Arc<ShotManager>> {
        if let Some(manager) = self.read_active().as_ref() {
            return Ok(Arc::clone(manager));
        }

        // First use in this session: the remembered project is opened like any other
        let project = self.registry().current_project().ok_or(Error::NoCurrentProject)?;
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(manager) = active.as_ref() {
            return Ok(Arc::clone(manager));
        }
        let manager = self.activate(project);
        *active = Some(Arc::clone(&manager));
        Ok(manager)
    }

    pub fn recent_projects(&self) -> Vec<ProjectInfo> {
        self.registry().recent_projects()
    }

    pub fn settings(&self) -> Map<String, Value> {
        self.registry().settings().clone()
    }

    pub fn update_settings(&self, changes: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut registry = self.registry();
        let settings = registry.update_settings(changes)?.clone();
        Ok(settings)
    }

    /// Clear thumbnails of one project, or all of them
    pub fn clear_thumbnails(&self, project: Option<&str>) -> Result<usize> {
        let scope = match project {
            Some(name) => ClearScope::Project(name.to_string()),
            None => ClearScope::All,
        };
        self.thumbnails.clear_cache(&scope)
    }

    fn switch_to(&self, info: &ProjectInfo) -> Result<()> {
        self.registry().set_current(&info.path)?;

        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = Some(self.activate(ProjectRef {
            name: info.name.clone(),
            path: info.path.clone(),
        }));
        Ok(())
    }

    /// Wipe both caches and warm the listing of `project`.
    ///
    /// Callers hold the write side of `active`.
    fn activate(&self, project: ProjectRef) -> Arc<ShotManager> {
        if let Err(err) = self.thumbnails.clear_cache(&ClearScope::All) {
            warn!(error = %err, "could not clear thumbnail cache on project switch");
        }
        self.listings.clear();

        let manager = Arc::new(ShotManager::new(
            project,
            Arc::clone(&self.thumbnails),
            Arc::clone(&self.listings),
        ));
        let shots = manager.get_shots();
        info!(project = %manager.project().name, shots = shots.len(), "switched project");
        manager
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_active(&self) -> RwLockReadGuard<'_, Option<Arc<ShotManager>>> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }
}
