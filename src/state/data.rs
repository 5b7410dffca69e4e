/// Shared data structures for shot listings
///
/// These structs represent the data model that flows between
/// the shot engine and whatever front-end renders it.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::shot::AssetKind;

/// Latest state of one asset kind within a shot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetSummary {
    /// Highest version on disk (0 = no versions yet)
    pub version: u32,
    /// Versioned file standing for that version, relative to the project root
    pub file: Option<PathBuf>,
    /// Cached preview, absolute path inside the thumbnail cache
    pub thumbnail: Option<PathBuf>,
}

impl AssetSummary {
    pub fn has_file(&self) -> bool {
        self.version > 0
    }
}

/// Represents a single shot in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotSummary {
    /// Normalized shot name (e.g., "SH010")
    pub name: String,
    pub image: AssetSummary,
    pub video: AssetSummary,
}

impl ShotSummary {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: AssetSummary::default(),
            video: AssetSummary::default(),
        }
    }

    pub fn asset(&self, kind: AssetKind) -> &AssetSummary {
        match kind {
            AssetKind::Image => &self.image,
            AssetKind::Video => &self.video,
        }
    }

    pub fn asset_mut(&mut self, kind: AssetKind) -> &mut AssetSummary {
        match kind {
            AssetKind::Image => &mut self.image,
            AssetKind::Video => &mut self.video,
        }
    }
}

/// The project a workspace currently has open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_like_the_listing_api() {
        let mut shot = ShotSummary::empty("SH010");
        shot.image = AssetSummary {
            version: 3,
            file: Some(PathBuf::from("shots/wip/SH010/images/SH010_v003.png")),
            thumbnail: None,
        };
        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["name"], "SH010");
        assert_eq!(json["image"]["version"], 3);
        assert_eq!(json["video"]["version"], 0);
        assert!(json["video"]["file"].is_null());
        assert!(shot.asset(AssetKind::Image).has_file());
        assert!(!shot.asset(AssetKind::Video).has_file());
    }
}
