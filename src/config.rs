/// Runtime locations
///
/// Defaults follow the platform conventions (`dirs` for persistent data,
/// `dirs-next` for the disposable thumbnail cache). Either can be overridden,
/// which is how the CLI flags and the tests point the crate elsewhere.
use std::path::PathBuf;

use crate::cache::thumbnail;
use crate::state::registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Holds `projects.json` (current project, recent list, settings)
    pub data_dir: PathBuf,
    /// Shared thumbnail cache for all projects
    pub cache_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration, filling unset locations with defaults
    pub fn resolve(data_dir: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(registry::default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".shotbuddy"));
        let cache_dir = cache_dir
            .or_else(thumbnail::default_cache_dir)
            .unwrap_or_else(|| std::env::temp_dir().join("shotbuddy-thumbnails"));
        Self {
            data_dir,
            cache_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
