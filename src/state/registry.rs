use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::data::ProjectRef;
use super::project::{self, ProjectInfo};
use crate::error::{Error, Result};

/// How many entries the recent-projects list keeps
pub const MAX_RECENT_PROJECTS: usize = 5;

const REGISTRY_FILE: &str = "projects.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct RegistryData {
    #[serde(default)]
    current_project: Option<PathBuf>,
    #[serde(default)]
    recent_projects: Vec<PathBuf>,
    #[serde(default)]
    settings: Map<String, Value>,
}

/// The Registry remembers which project is open, the recently opened
/// ones, and user settings. It is persisted as a single JSON file:
/// - Linux: ~/.local/share/shotbuddy/projects.json
/// - macOS: ~/Library/Application Support/shotbuddy/projects.json
/// - Windows: %APPDATA%\shotbuddy\projects.json
#[derive(Debug)]
pub struct Registry {
    file: PathBuf,
    data: RegistryData,
}

impl Registry {
    /// Load the registry stored in `data_dir`, starting empty if absent.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|e| Error::io(data_dir, e))?;
        let file = data_dir.join(REGISTRY_FILE);

        let data = match fs::read_to_string(&file) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(data) => data,
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "unreadable registry, starting fresh");
                    RegistryData::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => RegistryData::default(),
            Err(err) => return Err(Error::io(&file, err)),
        };

        debug!(file = %file.display(), "registry loaded");
        Ok(Self { file, data })
    }

    /// Get the path to the registry file
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// The current project, if one is set and its folder still exists
    pub fn current_project(&self) -> Option<ProjectRef> {
        let path = self.data.current_project.as_ref()?;
        if !path.is_dir() {
            return None;
        }
        let name = ProjectInfo::load(path)
            .ok()
            .flatten()
            .map(|info| info.name)
            .unwrap_or_else(|| project::name_from_path(path));
        Some(ProjectRef {
            name,
            path: path.clone(),
        })
    }

    /// Make `path` current and move it to the front of the recent list
    pub fn set_current(&mut self, path: &Path) -> Result<()> {
        let path = path.to_path_buf();
        self.data.recent_projects.retain(|p| *p != path);
        self.data.recent_projects.insert(0, path.clone());
        self.data.recent_projects.truncate(MAX_RECENT_PROJECTS);
        self.data.current_project = Some(path);
        self.save()
    }

    /// Recent project paths, most recent first
    pub fn recent_paths(&self) -> &[PathBuf] {
        &self.data.recent_projects
    }

    /// Descriptors of recent projects that still have one
    pub fn recent_projects(&self) -> Vec<ProjectInfo> {
        self.data
            .recent_projects
            .iter()
            .filter_map(|path| ProjectInfo::load(path).ok().flatten())
            .collect()
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.data.settings
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.data.settings.get(key)
    }

    /// Merge `changes` into the settings and persist. Returns the full map.
    pub fn update_settings(&mut self, changes: Map<String, Value>) -> Result<&Map<String, Value>> {
        for (key, value) in changes {
            self.data.settings.insert(key, value);
        }
        self.save()?;
        info!(keys = self.data.settings.len(), "settings updated");
        Ok(&self.data.settings)
    }

    fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.data).map_err(|e| Error::json(&self.file, e))?;
        fs::write(&self.file, text).map_err(|e| Error::io(&self.file, e))
    }
}

/// Get the path where the registry should be stored
pub fn default_data_dir() -> Option<PathBuf> {
    let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
    path.push("shotbuddy");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_recent_list_is_capped_and_deduplicated() {
        let tmp = TempDir::new().unwrap();
        let mut registry = Registry::open(tmp.path()).unwrap();
        for i in 0..7 {
            registry.set_current(&tmp.path().join(format!("p{i}"))).unwrap();
        }
        registry.set_current(&tmp.path().join("p4")).unwrap();

        let names: Vec<String> = registry
            .recent_paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["p4", "p6", "p5", "p3", "p2"]);
    }

    #[test]
    fn test_state_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let info = project::create_project(tmp.path(), "Film").unwrap();
        {
            let mut registry = Registry::open(&tmp.path().join("data")).unwrap();
            registry.set_current(&info.path).unwrap();
            let mut changes = Map::new();
            changes.insert("collapsed_shots".into(), json!(["SH010"]));
            registry.update_settings(changes).unwrap();
        }

        let registry = Registry::open(&tmp.path().join("data")).unwrap();
        assert_eq!(
            registry.current_project(),
            Some(ProjectRef {
                name: "Film".into(),
                path: info.path.clone()
            })
        );
        assert_eq!(registry.setting("collapsed_shots"), Some(&json!(["SH010"])));
        assert_eq!(registry.recent_projects(), vec![info]);
    }

    #[test]
    fn test_update_settings_merges() {
        let tmp = TempDir::new().unwrap();
        let mut registry = Registry::open(tmp.path()).unwrap();
        let mut first = Map::new();
        first.insert("a".into(), json!(1));
        first.insert("b".into(), json!("x"));
        registry.update_settings(first).unwrap();

        let mut second = Map::new();
        second.insert("b".into(), json!("y"));
        let merged = registry.update_settings(second).unwrap().clone();
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": "y"}));
    }

    #[test]
    fn test_missing_current_project_folder() {
        let tmp = TempDir::new().unwrap();
        let mut registry = Registry::open(tmp.path()).unwrap();
        registry.set_current(&tmp.path().join("gone")).unwrap();
        assert_eq!(registry.current_project(), None);
    }

    #[test]
    fn test_corrupt_registry_starts_fresh() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(REGISTRY_FILE), "{not json").unwrap();
        let registry = Registry::open(tmp.path()).unwrap();
        assert!(registry.recent_paths().is_empty());
    }
}
