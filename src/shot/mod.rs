/// Shot versioning engine
///
/// This module handles:
/// - Normalizing and validating shot names (name.rs)
/// - Discovering numbered versions from file names (scanner.rs)
/// - Maintaining the on-disk folder convention and latest copies (structure.rs)
/// - Answering listing queries and performing mutations (manager.rs)
///
/// Layout of a project on disk:
///
/// ```text
/// <project_root>/
///   project.json
///   shots/
///     wip/<SHOT>/images/<SHOT>_v<N>[_<extra>].<ext>
///     wip/<SHOT>/videos/<SHOT>_v<N>[_<extra>].<ext>
///     latest_images/<SHOT>.<ext>
///     latest_videos/<SHOT>.<ext>
/// ```

pub mod manager;
pub mod name;
pub mod scanner;
pub mod structure;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use manager::ShotManager;
pub use name::validate_shot_name;
pub use scanner::{list_versions, VersionFile};
pub use structure::{ReconcileOutcome, ShotStructure};

/// Image extensions accepted for versioning and thumbnails
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Video extensions accepted for versioning
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "avi"];

/// The two kinds of versioned asset a shot owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Image, AssetKind::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetKind::Image => IMAGE_EXTENSIONS,
            AssetKind::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Case-insensitive extension check
    pub fn accepts(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Folder name under `wip/<SHOT>/`
    pub fn wip_folder(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Video => "videos",
        }
    }

    /// Folder name under `shots/` holding the latest copies
    pub fn latest_folder(self) -> &'static str {
        match self {
            AssetKind::Image => "latest_images",
            AssetKind::Video => "latest_videos",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "images" => Ok(AssetKind::Image),
            "video" | "videos" => Ok(AssetKind::Video),
            other => Err(format!("unknown asset type '{other}' (expected image or video)")),
        }
    }
}

/// Paths of the shot layout inside one project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotLayout {
    root: PathBuf,
}

impl ShotLayout {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.root
    }

    pub fn shots_dir(&self) -> PathBuf {
        self.root.join("shots")
    }

    pub fn wip_root(&self) -> PathBuf {
        self.shots_dir().join("wip")
    }

    pub fn shot_dir(&self, shot: &str) -> PathBuf {
        self.wip_root().join(shot)
    }

    pub fn wip_dir(&self, shot: &str, kind: AssetKind) -> PathBuf {
        self.shot_dir(shot).join(kind.wip_folder())
    }

    pub fn latest_dir(&self, kind: AssetKind) -> PathBuf {
        self.shots_dir().join(kind.latest_folder())
    }
}
