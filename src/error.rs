/// Error types shared by the shot engine, the caches and the project state.
///
/// Validation errors are raised before anything touches the disk. Thumbnail
/// failures have their own type because they never leave the cache layer.
use std::io;
use std::path::{Path, PathBuf};

use crate::shot::AssetKind;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid shot name '{name}': {reason}")]
    InvalidShotName { name: String, reason: &'static str },

    #[error("shot '{0}' does not exist")]
    ShotNotFound(String),

    #[error("shot '{0}' already exists")]
    ShotExists(String),

    #[error("cannot create shot: shot number would exceed 999")]
    ShotLimitExceeded,

    #[error("no free shot number after {}", .after.as_deref().unwrap_or("the start"))]
    NoShotNumberAvailable { after: Option<String> },

    #[error("unsupported {kind} file: {}", .file.display())]
    UnsupportedFileType { file: PathBuf, kind: AssetKind },

    #[error("{shot} has no {kind} version {version}")]
    VersionNotFound {
        shot: String,
        kind: AssetKind,
        version: u32,
    },

    #[error("{shot} has no {kind} version number left to allocate")]
    VersionLimitExceeded { shot: String, kind: AssetKind },

    #[error("no current project")]
    NoCurrentProject,

    #[error("invalid project name '{0}'")]
    InvalidProjectName(String),

    #[error("no recognizable project structure at {}", .0.display())]
    UnrecognizedProject(PathBuf),

    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors caused by bad user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidShotName { .. }
                | Error::ShotNotFound(_)
                | Error::ShotExists(_)
                | Error::ShotLimitExceeded
                | Error::NoShotNumberAvailable { .. }
                | Error::UnsupportedFileType { .. }
                | Error::VersionNotFound { .. }
                | Error::VersionLimitExceeded { .. }
                | Error::InvalidProjectName(_)
                | Error::UnrecognizedProject(_)
        )
    }
}

/// Failure while producing a thumbnail. Logged and swallowed by the cache.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode thumbnail: {0}")]
    Encode(#[from] image::ImageError),

    #[error("thumbnail cache I/O: {0}")]
    Io(#[from] io::Error),
}
