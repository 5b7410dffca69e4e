//! Shot versioning and file organization for creative production projects.
//!
//! Each project keeps per-shot image and video versions under
//! `shots/wip/<SHOT>/`, with a copy of the newest one under
//! `shots/latest_images/` and `shots/latest_videos/`. Version numbers are
//! never stored: they are read back from file names on every scan.
//!
//! [`Workspace`] is the usual entry point. It owns the thumbnail cache and
//! the listing cache and hands out the [`ShotManager`] of the open project.

pub mod cache;
pub mod config;
pub mod error;
pub mod shot;
pub mod state;

pub use cache::{ClearScope, ListingCache, ThumbnailCache, ThumbnailKey};
pub use config::Config;
pub use error::{Error, Result, ThumbnailError};
pub use shot::{validate_shot_name, AssetKind, ReconcileOutcome, ShotManager, ShotStructure};
pub use state::data::{AssetSummary, ProjectRef, ShotSummary};
pub use state::project::ProjectInfo;
pub use state::workspace::Workspace;
