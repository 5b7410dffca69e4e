/// Version discovery from file names
///
/// The filesystem is the only record of which versions exist: nothing here
/// writes, and a missing directory simply means "no versions yet".
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::AssetKind;

/// One versioned file found in a wip directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    pub version: u32,
    pub path: PathBuf,
}

impl VersionFile {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Extract the version number from `<SHOT>_v<N>[_<extra>][.<ext>]`.
///
/// Both the shot segment and the `v` marker match case-insensitively.
/// Returns `None` for anything that does not follow the pattern, and for v0.
pub fn parse_version(file_name: &str, shot_name: &str) -> Option<u32> {
    let prefix = format!("{}_v", shot_name.to_ascii_lowercase());
    let lower = file_name.to_ascii_lowercase();
    let rest = lower.strip_prefix(&prefix)?;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    match rest.as_bytes().get(digits) {
        None | Some(b'_') | Some(b'.') => {}
        Some(_) => return None,
    }

    let version: u32 = rest[..digits].parse().ok()?;
    (version >= 1).then_some(version)
}

/// Every versioned file for `shot_name` directly inside `dir`, sorted by
/// version and then by file name. `kind` restricts by extension allow-list.
pub fn version_files(dir: &Path, shot_name: &str, kind: Option<AssetKind>) -> Vec<VersionFile> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %dir.display(), %err, "no versions: directory unreadable");
            return Vec::new();
        }
    };

    let mut files: Vec<VersionFile> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let path = entry.path();
            let name = path.file_name()?.to_str()?;
            if name.starts_with('.') {
                return None;
            }
            if let Some(kind) = kind {
                if !kind.accepts(&path) {
                    return None;
                }
            }
            let version = parse_version(name, shot_name)?;
            Some(VersionFile { version, path })
        })
        .collect();

    files.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
    files
}

/// Distinct version numbers present in `dir`, ascending.
pub fn list_versions(dir: &Path, shot_name: &str) -> Vec<u32> {
    distinct_versions(&version_files(dir, shot_name, None))
}

pub(crate) fn distinct_versions(files: &[VersionFile]) -> Vec<u32> {
    let mut versions: Vec<u32> = files.iter().map(|f| f.version).collect();
    versions.dedup();
    versions
}

/// The file that stands for the highest version.
///
/// When several files share that version the lexicographically smallest
/// file name wins, which keeps the choice independent of timestamps.
pub fn latest_file(files: &[VersionFile]) -> Option<&VersionFile> {
    let max = files.last()?.version;
    files.iter().find(|f| f.version == max)
}
