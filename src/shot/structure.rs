/// On-disk folder convention for shots
///
/// Versioned files under `wip/` are the ground truth. The copies under
/// `latest_images/` and `latest_videos/` are derived from them and can always
/// be rebuilt with [`ShotStructure::reconcile_latest`].
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::name::validate_shot_name;
use super::scanner::{self, VersionFile};
use super::{AssetKind, ShotLayout};
use crate::error::{Error, Result};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Result of a successful ingest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedVersion {
    pub shot: String,
    pub kind: AssetKind,
    pub version: u32,
    /// The new versioned file under `wip/`
    pub path: PathBuf,
    /// False when the latest copy could not be refreshed
    pub latest_synced: bool,
}

/// What a reconciliation pass did to a latest copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The latest copy already matched the highest version
    UpToDate,
    /// The latest copy was written from the highest version
    Updated,
    /// No versions remain, stale latest copies were removed
    Removed,
    /// No versions and no latest copy
    Empty,
}

/// Filesystem operations for the shot tree of one project
#[derive(Debug, Clone)]
pub struct ShotStructure {
    layout: ShotLayout,
}

impl ShotStructure {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            layout: ShotLayout::new(project_root),
        }
    }

    pub fn layout(&self) -> &ShotLayout {
        &self.layout
    }

    /// Ensure the shared `shots/` folders exist
    pub fn ensure_project_layout(&self) -> Result<()> {
        for dir in [
            self.layout.wip_root(),
            self.layout.latest_dir(AssetKind::Image),
            self.layout.latest_dir(AssetKind::Video),
        ] {
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }
        Ok(())
    }

    /// Create the wip folders of a shot. Existing folders are left alone.
    ///
    /// Returns the normalized shot name.
    pub fn create_shot_structure(&self, raw_name: &str) -> Result<String> {
        let shot = validate_shot_name(raw_name)?;
        self.ensure_project_layout()?;
        for kind in AssetKind::ALL {
            let dir = self.layout.wip_dir(&shot, kind);
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }
        debug!(shot = %shot, "shot structure ready");
        Ok(shot)
    }

    pub fn shot_exists(&self, shot: &str) -> bool {
        self.layout.shot_dir(shot).is_dir()
    }

    /// Shot folders under `wip/` whose names are already canonical, sorted
    pub fn shot_names(&self) -> Vec<String> {
        let wip = self.layout.wip_root();
        if !wip.is_dir() {
            return Vec::new();
        }
        WalkDir::new(&wip)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| match validate_shot_name(name) {
                Ok(canonical) => canonical == *name,
                Err(_) => {
                    debug!(folder = %name, "skipping non-shot folder");
                    false
                }
            })
            .collect()
    }

    /// Versioned files of one shot and kind, sorted by version
    pub fn version_files(&self, shot: &str, kind: AssetKind) -> Vec<VersionFile> {
        scanner::version_files(&self.layout.wip_dir(shot, kind), shot, Some(kind))
    }

    /// Copy `source` in as the next version of `shot`/`kind`.
    ///
    /// The versioned file is the commit point. A failure to refresh the
    /// latest copy afterwards is logged and reported through
    /// [`IngestedVersion::latest_synced`], never rolled back.
    pub fn ingest_new_version(
        &self,
        raw_name: &str,
        kind: AssetKind,
        source: &Path,
    ) -> Result<IngestedVersion> {
        let shot = validate_shot_name(raw_name)?;
        if !kind.accepts(source) {
            return Err(Error::UnsupportedFileType {
                file: source.to_path_buf(),
                kind,
            });
        }
        if !self.shot_exists(&shot) {
            return Err(Error::ShotNotFound(shot));
        }

        let ext = lowercase_extension(source);
        let wip = self.layout.wip_dir(&shot, kind);
        fs::create_dir_all(&wip).map_err(|e| Error::io(&wip, e))?;

        let mut input = File::open(source).map_err(|e| Error::io(source, e))?;

        let next = |version: u32| {
            version.checked_add(1).ok_or_else(|| Error::VersionLimitExceeded {
                shot: shot.clone(),
                kind,
            })
        };
        let mut version = next(
            self.version_files(&shot, kind)
                .last()
                .map(|f| f.version)
                .unwrap_or(0),
        )?;

        // create_new guards against a concurrent ingest claiming the same number
        let (path, mut output) = loop {
            let path = wip.join(versioned_file_name(&shot, version, &ext));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => version = next(version)?,
                Err(err) => return Err(Error::io(&path, err)),
            }
        };

        let copied = io::copy(&mut input, &mut output).and_then(|_| output.sync_all());
        drop(output);
        if let Err(err) = copied {
            let _ = fs::remove_file(&path);
            return Err(Error::io(&path, err));
        }

        info!(shot = %shot, %kind, version, path = %path.display(), "ingested new version");

        let latest_synced = match self.write_latest(&shot, kind, &path) {
            Ok(()) => true,
            Err(err) => {
                warn!(shot = %shot, %kind, version, error = %err, "latest copy out of sync");
                false
            }
        };

        Ok(IngestedVersion {
            shot,
            kind,
            version,
            path,
            latest_synced,
        })
    }

    /// Latest copies of a shot (normally zero or one file)
    pub fn latest_copies(&self, shot: &str, kind: AssetKind) -> Vec<PathBuf> {
        let dir = self.layout.latest_dir(kind);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut copies: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|stem| stem.eq_ignore_ascii_case(shot))
                    .unwrap_or(false)
            })
            .collect();
        copies.sort();
        copies
    }

    /// Rewrite the latest copy from the highest version currently on disk.
    pub fn reconcile_latest(&self, raw_name: &str, kind: AssetKind) -> Result<ReconcileOutcome> {
        let shot = validate_shot_name(raw_name)?;
        let files = self.version_files(&shot, kind);

        let Some(latest) = scanner::latest_file(&files) else {
            let stale = self.latest_copies(&shot, kind);
            if stale.is_empty() {
                return Ok(ReconcileOutcome::Empty);
            }
            for path in stale {
                fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            }
            info!(shot = %shot, %kind, "removed stale latest copy");
            return Ok(ReconcileOutcome::Removed);
        };

        let expected = self.latest_path(&shot, kind, &lowercase_extension(&latest.path));
        let copies = self.latest_copies(&shot, kind);
        let in_sync = copies.len() == 1
            && copies[0] == expected
            && same_contents(&latest.path, &expected).unwrap_or(false);
        if in_sync {
            return Ok(ReconcileOutcome::UpToDate);
        }

        self.write_latest(&shot, kind, &latest.path)?;
        info!(shot = %shot, %kind, version = latest.version, "latest copy reconciled");
        Ok(ReconcileOutcome::Updated)
    }

    /// Remove every file of one version, then reconcile the latest copy.
    ///
    /// Returns the removed paths.
    pub fn delete_version(&self, raw_name: &str, kind: AssetKind, version: u32) -> Result<Vec<PathBuf>> {
        let shot = validate_shot_name(raw_name)?;
        if !self.shot_exists(&shot) {
            return Err(Error::ShotNotFound(shot));
        }
        let doomed: Vec<PathBuf> = self
            .version_files(&shot, kind)
            .into_iter()
            .filter(|f| f.version == version)
            .map(|f| f.path)
            .collect();
        if doomed.is_empty() {
            return Err(Error::VersionNotFound { shot, kind, version });
        }
        for path in &doomed {
            fs::remove_file(path).map_err(|e| Error::io(path, e))?;
        }
        info!(shot = %shot, %kind, version, files = doomed.len(), "deleted version");

        // The version is gone either way, a stale copy is left for reconcile
        if let Err(err) = self.reconcile_latest(&shot, kind) {
            warn!(shot = %shot, %kind, version, error = %err, "latest copy out of sync after delete");
        }
        Ok(doomed)
    }

    /// Rename a shot folder, every versioned file in it, and its latest copies.
    ///
    /// Returns `(old, new)` normalized names.
    pub fn rename_shot(&self, raw_old: &str, raw_new: &str) -> Result<(String, String)> {
        let old = validate_shot_name(raw_old)?;
        let new = validate_shot_name(raw_new)?;
        if !self.shot_exists(&old) {
            return Err(Error::ShotNotFound(old));
        }
        if old == new {
            return Ok((old, new));
        }
        let new_dir = self.layout.shot_dir(&new);
        if new_dir.exists() {
            return Err(Error::ShotExists(new));
        }

        let old_dir = self.layout.shot_dir(&old);
        fs::rename(&old_dir, &new_dir).map_err(|e| Error::io(&old_dir, e))?;

        for kind in AssetKind::ALL {
            let wip = self.layout.wip_dir(&new, kind);
            for file in scanner::version_files(&wip, &old, None) {
                let renamed = wip.join(format!("{new}{}", &file.file_name()[old.len()..]));
                fs::rename(&file.path, &renamed).map_err(|e| Error::io(&file.path, e))?;
            }

            for copy in self.latest_copies(&old, kind) {
                let ext = lowercase_extension(&copy);
                let target = self.latest_path(&new, kind, &ext);
                if let Err(err) = fs::rename(&copy, &target) {
                    warn!(from = %copy.display(), error = %err, "could not move latest copy");
                }
            }
            // Leftovers (or a failed move) are repaired from the wip files
            if let Err(err) = self.reconcile_latest(&new, kind) {
                warn!(shot = %new, %kind, error = %err, "latest copy out of sync after rename");
            }
        }

        info!(from = %old, to = %new, "renamed shot");
        Ok((old, new))
    }

    fn latest_path(&self, shot: &str, kind: AssetKind, ext: &str) -> PathBuf {
        let name = if ext.is_empty() {
            shot.to_string()
        } else {
            format!("{shot}.{ext}")
        };
        self.layout.latest_dir(kind).join(name)
    }

    /// Replace the latest copy of `shot` with `source`, then drop siblings
    /// left behind by an older version with a different extension.
    fn write_latest(&self, shot: &str, kind: AssetKind, source: &Path) -> Result<()> {
        let dir = self.layout.latest_dir(kind);
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

        let target = self.latest_path(shot, kind, &lowercase_extension(source));
        let temp = dir.join(format!(
            ".{shot}.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        if let Err(err) = fs::copy(source, &temp) {
            let _ = fs::remove_file(&temp);
            return Err(Error::io(&temp, err));
        }
        fs::rename(&temp, &target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            Error::io(&target, e)
        })?;

        for sibling in self.latest_copies(shot, kind) {
            if sibling != target {
                fs::remove_file(&sibling).map_err(|e| Error::io(&sibling, e))?;
            }
        }
        Ok(())
    }
}

pub fn versioned_file_name(shot: &str, version: u32, ext: &str) -> String {
    if ext.is_empty() {
        format!("{shot}_v{version:03}")
    } else {
        format!("{shot}_v{version:03}.{ext}")
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn same_contents(a: &Path, b: &Path) -> io::Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }
    let mut left = Vec::new();
    let mut right = Vec::new();
    File::open(a)?.read_to_end(&mut left)?;
    File::open(b)?.read_to_end(&mut right)?;
    Ok(left == right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn source(tmp: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let dir = tmp.path().join("incoming");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn tree(root: &Path) -> Vec<String> {
        let mut entries: Vec<String> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.path().strip_prefix(root).unwrap().display().to_string())
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_create_shot_structure_trims_whitespace() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        let shot = structure.create_shot_structure("  sh003  ").unwrap();
        assert_eq!(shot, "SH003");
        assert!(tmp.path().join("shots/wip/SH003/images").is_dir());
        assert!(tmp.path().join("shots/wip/SH003/videos").is_dir());
    }

    #[test]
    fn test_create_shot_structure_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH002").unwrap();
        let once = tree(tmp.path());
        structure.create_shot_structure("sh002").unwrap();
        assert_eq!(tree(tmp.path()), once);
    }

    #[test]
    fn test_invalid_name_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        assert!(structure.create_shot_structure("   ").is_err());
        assert!(!tmp.path().join("shots").exists());
    }

    #[test]
    fn test_ingest_requires_structure() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        let src = source(&tmp, "frame.png", b"one");
        let err = structure
            .ingest_new_version("SH001", AssetKind::Image, &src)
            .unwrap_err();
        assert!(matches!(err, Error::ShotNotFound(ref s) if s == "SH001"));
    }

    #[test]
    fn test_ingest_rejects_wrong_extension() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        let src = source(&tmp, "clip.mp4", b"video");
        let err = structure
            .ingest_new_version("SH001", AssetKind::Image, &src)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_ingest_is_monotonic_and_updates_latest() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        let wip = tmp.path().join("shots/wip/SH001/images");
        fs::write(wip.join("SH001_v004_old.png"), b"four").unwrap();

        let src = source(&tmp, "Render.PNG", b"five");
        let ingested = structure
            .ingest_new_version("sh001", AssetKind::Image, &src)
            .unwrap();
        assert_eq!(ingested.version, 5);
        assert!(ingested.latest_synced);
        assert_eq!(ingested.path, wip.join("SH001_v005.png"));
        assert_eq!(scanner::list_versions(&wip, "SH001"), vec![4, 5]);

        let latest = tmp.path().join("shots/latest_images/SH001.png");
        assert_eq!(fs::read(latest).unwrap(), b"five");
    }

    #[test]
    fn test_latest_extension_change_removes_sibling() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "a.png", b"png"))
            .unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "b.jpg", b"jpg"))
            .unwrap();
        let copies = structure.latest_copies("SH001", AssetKind::Image);
        assert_eq!(copies, vec![tmp.path().join("shots/latest_images/SH001.jpg")]);
    }

    #[test]
    fn test_delete_highest_version_restores_previous_latest() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "a.png", b"first"))
            .unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "b.png", b"second"))
            .unwrap();

        let removed = structure.delete_version("SH001", AssetKind::Image, 2).unwrap();
        assert_eq!(removed.len(), 1);
        let latest = tmp.path().join("shots/latest_images/SH001.png");
        assert_eq!(fs::read(&latest).unwrap(), b"first");

        structure.delete_version("SH001", AssetKind::Image, 1).unwrap();
        assert!(!latest.exists());
        assert!(matches!(
            structure.delete_version("SH001", AssetKind::Image, 1),
            Err(Error::VersionNotFound { version: 1, .. })
        ));
    }

    #[test]
    fn test_reconcile_repairs_stale_copy() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Video, &source(&tmp, "a.mp4", b"take1"))
            .unwrap();
        assert_eq!(
            structure.reconcile_latest("SH001", AssetKind::Video).unwrap(),
            ReconcileOutcome::UpToDate
        );

        // Highest version added behind the engine's back
        let wip = tmp.path().join("shots/wip/SH001/videos");
        fs::write(wip.join("SH001_v002_graded.mov"), b"take2").unwrap();
        assert_eq!(
            structure.reconcile_latest("SH001", AssetKind::Video).unwrap(),
            ReconcileOutcome::Updated
        );
        let copies = structure.latest_copies("SH001", AssetKind::Video);
        assert_eq!(copies, vec![tmp.path().join("shots/latest_videos/SH001.mov")]);
        assert_eq!(fs::read(&copies[0]).unwrap(), b"take2");

        fs::remove_file(wip.join("SH001_v001.mp4")).unwrap();
        fs::remove_file(wip.join("SH001_v002_graded.mov")).unwrap();
        assert_eq!(
            structure.reconcile_latest("SH001", AssetKind::Video).unwrap(),
            ReconcileOutcome::Removed
        );
        assert_eq!(
            structure.reconcile_latest("SH001", AssetKind::Video).unwrap(),
            ReconcileOutcome::Empty
        );
    }

    #[test]
    fn test_rename_shot_moves_everything() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH010").unwrap();
        structure
            .ingest_new_version("SH010", AssetKind::Image, &source(&tmp, "a.png", b"img"))
            .unwrap();
        let wip = tmp.path().join("shots/wip/SH010/images");
        fs::write(wip.join("SH010_v002_alt.png"), b"alt").unwrap();

        let (old, new) = structure.rename_shot("sh010", "sh015").unwrap();
        assert_eq!((old.as_str(), new.as_str()), ("SH010", "SH015"));
        assert!(!tmp.path().join("shots/wip/SH010").exists());

        let new_wip = tmp.path().join("shots/wip/SH015/images");
        assert_eq!(scanner::list_versions(&new_wip, "SH015"), vec![1, 2]);
        assert!(new_wip.join("SH015_v002_alt.png").is_file());
        assert_eq!(
            structure.latest_copies("SH015", AssetKind::Image),
            vec![tmp.path().join("shots/latest_images/SH015.png")]
        );
        assert!(structure.latest_copies("SH010", AssetKind::Image).is_empty());
    }

    #[test]
    fn test_rename_onto_existing_shot_fails() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH010").unwrap();
        structure.create_shot_structure("SH020").unwrap();
        assert!(matches!(
            structure.rename_shot("SH010", "SH020"),
            Err(Error::ShotExists(ref s)) if s == "SH020"
        ));
        assert!(matches!(
            structure.rename_shot("SH030", "SH040"),
            Err(Error::ShotNotFound(_))
        ));
    }

    #[test]
    fn test_ingest_after_highest_possible_version_fails() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH010").unwrap();
        let wip = tmp.path().join("shots/wip/SH010/images");
        fs::write(wip.join("SH010_v4294967295.png"), b"max").unwrap();

        let err = structure
            .ingest_new_version("SH010", AssetKind::Image, &source(&tmp, "a.png", b"next"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::VersionLimitExceeded { ref shot, kind: AssetKind::Image } if shot == "SH010"
        ));
        assert_eq!(scanner::list_versions(&wip, "SH010"), vec![u32::MAX]);
        assert!(!wip.join("SH010_v000.png").exists());
    }

    #[test]
    fn test_ingest_keeps_version_when_latest_copy_fails() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        let latest_dir = tmp.path().join("shots/latest_images");
        fs::remove_dir(&latest_dir).unwrap();
        fs::write(&latest_dir, b"in the way").unwrap();

        let ingested = structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "a.png", b"frame"))
            .unwrap();
        assert_eq!(ingested.version, 1);
        assert!(!ingested.latest_synced);
        assert!(ingested.path.is_file());
        let wip = tmp.path().join("shots/wip/SH001/images");
        assert_eq!(scanner::list_versions(&wip, "SH001"), vec![1]);

        fs::remove_file(&latest_dir).unwrap();
        assert_eq!(
            structure.reconcile_latest("SH001", AssetKind::Image).unwrap(),
            ReconcileOutcome::Updated
        );
        assert_eq!(fs::read(latest_dir.join("SH001.png")).unwrap(), b"frame");
    }

    #[test]
    fn test_delete_version_succeeds_when_latest_copy_cannot_be_rewritten() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH001").unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "a.png", b"first"))
            .unwrap();
        structure
            .ingest_new_version("SH001", AssetKind::Image, &source(&tmp, "b.png", b"second"))
            .unwrap();
        let latest_dir = tmp.path().join("shots/latest_images");
        fs::remove_dir_all(&latest_dir).unwrap();
        fs::write(&latest_dir, b"in the way").unwrap();

        let removed = structure.delete_version("SH001", AssetKind::Image, 2).unwrap();
        let wip = tmp.path().join("shots/wip/SH001/images");
        assert_eq!(removed, vec![wip.join("SH001_v002.png")]);
        assert_eq!(scanner::list_versions(&wip, "SH001"), vec![1]);
    }

    #[test]
    fn test_shot_names_skip_foreign_folders() {
        let tmp = TempDir::new().unwrap();
        let structure = ShotStructure::new(tmp.path());
        structure.create_shot_structure("SH020").unwrap();
        structure.create_shot_structure("SH010").unwrap();
        fs::create_dir_all(tmp.path().join("shots/wip/scratch")).unwrap();
        fs::create_dir_all(tmp.path().join("shots/wip/sh030")).unwrap();
        assert_eq!(structure.shot_names(), vec!["SH010", "SH020"]);
    }
}
