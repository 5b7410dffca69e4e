/// Project descriptor (`project.json`) handling
///
/// A project is a folder holding `project.json` and the `shots/` tree.
/// Keys this crate does not know about are preserved on save.
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::shot::ShotStructure;

/// File name of the descriptor inside a project root
pub const PROJECT_FILE: &str = "project.json";

/// Contents of `project.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub path: PathBuf,
    /// ISO-8601 local timestamp of creation
    pub created: String,
    #[serde(default)]
    pub shots: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectInfo {
    fn fresh(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            created: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            shots: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Load the descriptor of `root`, `None` when there is none
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let file = root.join(PROJECT_FILE);
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io(&file, err)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::json(&file, e))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let file = root.join(PROJECT_FILE);
        let text = serde_json::to_string_pretty(self).map_err(|e| Error::json(&file, e))?;
        fs::write(&file, text).map_err(|e| Error::io(&file, e))
    }
}

/// Display name of a project root: its final path component
pub fn name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create `<parent>/<name>` with the full shot layout and a fresh descriptor
pub fn create_project(parent: &Path, name: &str) -> Result<ProjectInfo> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidProjectName(name.to_string()));
    }

    let root = parent.join(name);
    fs::create_dir_all(&root).map_err(|e| Error::io(&root, e))?;
    let root = fs::canonicalize(&root).map_err(|e| Error::io(&root, e))?;

    ShotStructure::new(&root).ensure_project_layout()?;
    let legacy = root.join("_legacy");
    fs::create_dir_all(&legacy).map_err(|e| Error::io(&legacy, e))?;

    let info = ProjectInfo::fresh(name, &root);
    info.save(&root)?;
    info!(project = %info.name, path = %root.display(), "created project");
    Ok(info)
}

/// Open an existing project folder.
///
/// A folder with `project.json` is loaded (its stored path is corrected if
/// the folder moved). A folder with only `shots/` is adopted and given a
/// descriptor. Anything else is rejected.
pub fn open_project(path: &Path) -> Result<ProjectInfo> {
    let root = fs::canonicalize(path).map_err(|_| Error::UnrecognizedProject(path.to_path_buf()))?;

    let info = match ProjectInfo::load(&root)? {
        Some(mut info) => {
            if info.path != root {
                debug!(stored = %info.path.display(), actual = %root.display(), "project moved, updating path");
                info.path = root.clone();
                info.save(&root)?;
            }
            info
        }
        None if root.join("shots").is_dir() => {
            let info = ProjectInfo::fresh(name_from_path(&root), &root);
            info.save(&root)?;
            info!(path = %root.display(), "adopted existing shot folder as project");
            info
        }
        None => return Err(Error::UnrecognizedProject(root)),
    };

    ShotStructure::new(&root).ensure_project_layout()?;
    Ok(info)
}

/// Apply `edit` to the descriptor of `root` and save it.
///
/// Projects without a descriptor are left untouched.
pub fn update_descriptor<F>(root: &Path, edit: F) -> Result<()>
where
    F: FnOnce(&mut ProjectInfo),
{
    let Some(mut info) = ProjectInfo::load(root)? else {
        return Ok(());
    };
    edit(&mut info);
    info.save(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_create_project_layout() {
        let tmp = TempDir::new().unwrap();
        let info = create_project(tmp.path(), "Film").unwrap();
        let root = fs::canonicalize(tmp.path().join("Film")).unwrap();

        assert_eq!(info.name, "Film");
        assert_eq!(info.path, root);
        for dir in ["shots/wip", "shots/latest_images", "shots/latest_videos", "_legacy"] {
            assert!(root.join(dir).is_dir(), "missing {dir}");
        }
        assert_eq!(ProjectInfo::load(&root).unwrap(), Some(info));
    }

    #[test]
    fn test_create_project_rejects_bad_names() {
        let tmp = TempDir::new().unwrap();
        for name in ["", "  ", "..", "a/b"] {
            assert!(matches!(
                create_project(tmp.path(), name),
                Err(Error::InvalidProjectName(_))
            ));
        }
    }

    #[test]
    fn test_open_adopts_bare_shots_folder() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Legacy");
        fs::create_dir_all(root.join("shots")).unwrap();

        let info = open_project(&root).unwrap();
        assert_eq!(info.name, "Legacy");
        assert!(root.join(PROJECT_FILE).is_file());
        assert!(root.join("shots/latest_videos").is_dir());
    }

    #[test]
    fn test_open_rewrites_moved_path_and_keeps_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Moved");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(PROJECT_FILE),
            r#"{"name":"Old","path":"/elsewhere","created":"2024-01-01T00:00:00","shots":["SH010"],"notes":{"SH010":"hero"}}"#,
        )
        .unwrap();

        let info = open_project(&root).unwrap();
        assert_eq!(info.path, fs::canonicalize(&root).unwrap());
        assert_eq!(info.shots, vec!["SH010"]);

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(root.join(PROJECT_FILE)).unwrap()).unwrap();
        assert_eq!(saved["notes"]["SH010"], "hero");
        assert_eq!(saved["name"], "Old");
    }

    #[test]
    fn test_open_rejects_unrecognized_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            open_project(tmp.path()),
            Err(Error::UnrecognizedProject(_))
        ));
        assert!(matches!(
            open_project(&tmp.path().join("missing")),
            Err(Error::UnrecognizedProject(_))
        ));
    }

    #[test]
    fn test_update_descriptor_without_file_is_noop() {
        let tmp = TempDir::new().unwrap();
        update_descriptor(tmp.path(), |info| info.shots.push("SH010".into())).unwrap();
        assert!(!tmp.path().join(PROJECT_FILE).exists());
    }
}
