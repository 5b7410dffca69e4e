use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::name::{self, validate_shot_name};
use super::scanner::{self, VersionFile};
use super::structure::{IngestedVersion, ReconcileOutcome, ShotStructure};
use super::AssetKind;
use crate::cache::{ListingCache, ThumbnailCache, ThumbnailKey};
use crate::error::Result;
use crate::state::data::{AssetSummary, ProjectRef, ShotSummary};
use crate::state::project;

/// Entry point for everything shot-related in one project.
///
/// Listings are memoized in the shared [`ListingCache`] and every mutating
/// call drops this project's entry before returning.
#[derive(Debug)]
pub struct ShotManager {
    project: ProjectRef,
    structure: ShotStructure,
    thumbnails: Arc<ThumbnailCache>,
    listings: Arc<ListingCache>,
    numbering: Mutex<()>,
}

impl ShotManager {
    pub fn new(project: ProjectRef, thumbnails: Arc<ThumbnailCache>, listings: Arc<ListingCache>) -> Self {
        let structure = ShotStructure::new(&project.path);
        Self {
            project,
            structure,
            thumbnails,
            listings,
            numbering: Mutex::new(()),
        }
    }

    /// Manager for a project root, named after its folder
    pub fn for_root(
        root: impl Into<PathBuf>,
        thumbnails: Arc<ThumbnailCache>,
        listings: Arc<ListingCache>,
    ) -> Self {
        let path = root.into();
        let name = project::name_from_path(&path);
        Self::new(ProjectRef { name, path }, thumbnails, listings)
    }

    pub fn project(&self) -> &ProjectRef {
        &self.project
    }

    pub fn root(&self) -> &Path {
        &self.project.path
    }

    pub fn structure(&self) -> &ShotStructure {
        &self.structure
    }

    /// Every shot with its latest image/video version and thumbnail
    pub fn get_shots(&self) -> Arc<Vec<ShotSummary>> {
        self.listings
            .get_or_build(self.root(), || self.build_listing())
    }

    /// Distinct versions of one asset kind, ascending
    pub fn get_asset_versions(&self, raw_name: &str, kind: AssetKind) -> Result<Vec<u32>> {
        let shot = validate_shot_name(raw_name)?;
        Ok(scanner::distinct_versions(&self.structure.version_files(&shot, kind)))
    }

    pub fn create_shot_structure(&self, raw_name: &str) -> Result<String> {
        let shot = self.structure.create_shot_structure(raw_name)?;
        self.record_shot(&shot);
        self.invalidate();
        Ok(shot)
    }

    /// Create the next auto-numbered shot (SH010, SH020, ...)
    pub fn create_next_shot(&self) -> Result<String> {
        let _guard = self.numbering.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = self.structure.shot_names();
        let number = name::next_shot_number(existing.iter().map(String::as_str))?;
        self.create_shot_structure(&name::format_shot_name(number))
    }

    /// Create a shot numbered between `after` and the shot that follows it
    pub fn create_shot_after(&self, after: Option<&str>) -> Result<String> {
        let after = after.map(validate_shot_name).transpose()?;
        let _guard = self.numbering.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = self.structure.shot_names();
        let number = name::number_after(existing.iter().map(String::as_str), after.as_deref())?;
        self.create_shot_structure(&name::format_shot_name(number))
    }

    pub fn ingest_new_version(&self, raw_name: &str, kind: AssetKind, source: &Path) -> Result<IngestedVersion> {
        let ingested = self.structure.ingest_new_version(raw_name, kind, source)?;
        self.invalidate();
        Ok(ingested)
    }

    pub fn rename_shot(&self, raw_old: &str, raw_new: &str) -> Result<String> {
        let old = validate_shot_name(raw_old)?;
        let new = validate_shot_name(raw_new)?;
        let stale = self.thumbnail_keys(&old);

        let renamed = self.structure.rename_shot(&old, &new);
        self.invalidate();

        // A rename that failed halfway has still moved the shot folder
        let moved = old != new && !self.structure.shot_exists(&old) && self.structure.shot_exists(&new);
        if moved {
            for key in &stale {
                self.thumbnails.remove(key);
            }
            let update = project::update_descriptor(self.root(), |info| {
                for entry in info.shots.iter_mut().filter(|s| **s == old) {
                    *entry = new.clone();
                }
            });
            if let Err(err) = update {
                warn!(project = %self.project.name, error = %err, "could not record renamed shot");
            }
        }
        renamed.map(|(_, new)| new)
    }

    pub fn delete_version(&self, raw_name: &str, kind: AssetKind, version: u32) -> Result<Vec<PathBuf>> {
        let result = self.structure.delete_version(raw_name, kind, version);
        self.invalidate();
        let removed = result?;
        for path in &removed {
            self.thumbnails
                .remove(&ThumbnailKey::new(&self.project.name, kind, path));
        }
        Ok(removed)
    }

    pub fn reconcile_latest(&self, raw_name: &str, kind: AssetKind) -> Result<ReconcileOutcome> {
        let outcome = self.structure.reconcile_latest(raw_name, kind)?;
        if outcome != ReconcileOutcome::UpToDate {
            self.invalidate();
        }
        Ok(outcome)
    }

    /// Reconcile the latest copies of every shot and kind
    pub fn reconcile_all(&self) -> Result<Vec<(String, AssetKind, ReconcileOutcome)>> {
        let mut report = Vec::new();
        for shot in self.structure.shot_names() {
            for kind in AssetKind::ALL {
                let outcome = self.structure.reconcile_latest(&shot, kind)?;
                report.push((shot.clone(), kind, outcome));
            }
        }
        let changed = report
            .iter()
            .filter(|(_, _, o)| matches!(o, ReconcileOutcome::Updated | ReconcileOutcome::Removed))
            .count();
        if changed > 0 {
            info!(project = %self.project.name, changed, "reconciled latest copies");
            self.invalidate();
        }
        Ok(report)
    }

    /// Drop the memoized listing of this project
    pub fn invalidate(&self) {
        self.listings.invalidate(self.root());
    }

    fn build_listing(&self) -> Vec<ShotSummary> {
        let shots: Vec<ShotSummary> = self
            .structure
            .shot_names()
            .into_iter()
            .map(|shot| {
                let mut summary = ShotSummary::empty(&shot);
                for kind in AssetKind::ALL {
                    let files = self.structure.version_files(&shot, kind);
                    if let Some(latest) = scanner::latest_file(&files) {
                        *summary.asset_mut(kind) = self.summarize(kind, latest);
                    }
                }
                summary
            })
            .collect();
        debug!(project = %self.project.name, shots = shots.len(), "built shot listing");
        shots
    }

    fn summarize(&self, kind: AssetKind, latest: &VersionFile) -> AssetSummary {
        let thumbnail = match kind {
            AssetKind::Image => self.thumbnails.get_or_create_thumbnail(
                &latest.path,
                &ThumbnailKey::new(&self.project.name, kind, &latest.path),
            ),
            AssetKind::Video => None,
        };
        let file = latest
            .path
            .strip_prefix(self.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| latest.path.clone());
        AssetSummary {
            version: latest.version,
            file: Some(file),
            thumbnail,
        }
    }

    fn thumbnail_keys(&self, shot: &str) -> Vec<ThumbnailKey> {
        AssetKind::ALL
            .iter()
            .flat_map(|&kind| {
                self.structure
                    .version_files(shot, kind)
                    .into_iter()
                    .map(move |f| ThumbnailKey::new(&self.project.name, kind, &f.path))
            })
            .collect()
    }

    fn record_shot(&self, shot: &str) {
        let update = project::update_descriptor(self.root(), |info| {
            if !info.shots.iter().any(|s| s == shot) {
                info.shots.push(shot.to_string());
            }
        });
        if let Err(err) = update {
            warn!(project = %self.project.name, shot, error = %err, "could not record shot in project.json");
        }
    }
}
