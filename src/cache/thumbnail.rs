use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage, Rgb, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, info, warn};

use crate::error::{Error, Result, ThumbnailError};
use crate::shot::AssetKind;

/// Bounding box of generated thumbnails (width, height)
pub const THUMBNAIL_SIZE: (u32, u32) = (320, 180);

/// JPEG quality of cached thumbnails
pub const JPEG_QUALITY: u8 = 85;

/// Background that transparent pixels are flattened onto
pub const BACKGROUND: [u8; 3] = [64, 64, 64];

const THUMB_SUFFIX: &str = "_thumb.jpg";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Get the default thumbnail cache directory
/// Returns ~/.cache/shotbuddy/thumbnails on Linux
pub fn default_cache_dir() -> Option<PathBuf> {
    let mut path = dirs_next::cache_dir().or_else(dirs_next::home_dir)?;
    path.push("shotbuddy");
    path.push("thumbnails");
    Some(path)
}

/// Identity of one cache entry: project name + asset kind + source file stem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    project: String,
    kind: AssetKind,
    stem: String,
}

impl ThumbnailKey {
    pub fn new(project: impl Into<String>, kind: AssetKind, source: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            project: project.into(),
            kind,
            stem,
        }
    }

    /// `<project>_<kind>_<stem>_thumb.jpg`
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}{THUMB_SUFFIX}", self.project, self.kind, self.stem)
    }
}

/// Which entries [`ThumbnailCache::clear_cache`] removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearScope {
    All,
    /// Entries whose key belongs to the named project
    Project(String),
}

impl ClearScope {
    fn matches(&self, file_name: &str) -> bool {
        match self {
            ClearScope::All => true,
            ClearScope::Project(project) => AssetKind::ALL
                .iter()
                .any(|kind| file_name.starts_with(&format!("{project}_{kind}_"))),
        }
    }
}

/// Disk cache of downscaled previews shared by every project.
///
/// Entries are disposable: wiping the directory only costs regeneration.
/// Generation holds the read side of `gate`, clearing holds the write side,
/// so a clear never races a half-finished write.
#[derive(Debug)]
pub struct ThumbnailCache {
    dir: PathBuf,
    gate: RwLock<()>,
}

impl ThumbnailCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self {
            dir,
            gate: RwLock::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the thumbnail path for a key (doesn't generate, just returns the expected path)
    pub fn thumbnail_path(&self, key: &ThumbnailKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Check if a thumbnail exists for a key
    pub fn thumbnail_exists(&self, key: &ThumbnailKey) -> bool {
        self.thumbnail_path(key).is_file()
    }

    /// Return the cached thumbnail for `source`, generating it on a miss.
    ///
    /// An entry older than its source counts as a miss, so a file replaced
    /// in place at the same version gets a fresh preview. Failures are
    /// logged and yield `None`.
    pub fn get_or_create_thumbnail(&self, source: &Path, key: &ThumbnailKey) -> Option<PathBuf> {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let target = self.thumbnail_path(key);

        if is_fresh(&target, source) {
            debug!(thumbnail = %target.display(), "thumbnail cache hit");
            return Some(target);
        }

        match self.generate(source, &target) {
            Ok(()) => {
                debug!(source = %source.display(), thumbnail = %target.display(), "generated thumbnail");
                Some(target)
            }
            Err(err) => {
                warn!(source = %source.display(), error = %err, "thumbnail generation failed");
                None
            }
        }
    }

    /// Drop a single entry, e.g. after its source was renamed or deleted
    pub fn remove(&self, key: &ThumbnailKey) {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let path = self.thumbnail_path(key);
        match fs::remove_file(&path) {
            Ok(()) => debug!(thumbnail = %path.display(), "removed thumbnail"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(thumbnail = %path.display(), error = %err, "could not remove thumbnail"),
        }
    }

    /// Remove cached entries in `scope`. Returns how many files were removed.
    pub fn clear_cache(&self, scope: &ClearScope) -> Result<usize> {
        let _guard = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(Error::io(&self.dir, err)),
        };

        let mut removed = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let ours = name.ends_with(THUMB_SUFFIX) || name.ends_with(".tmp");
            if !ours || !scope.matches(name.trim_start_matches('.')) {
                continue;
            }
            let path = entry.path();
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            removed += 1;
        }

        info!(?scope, removed, "cleared thumbnail cache");
        Ok(removed)
    }

    fn generate(&self, source: &Path, target: &Path) -> std::result::Result<(), ThumbnailError> {
        let img = image::open(source).map_err(|source_err| ThumbnailError::Decode {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        let (max_w, max_h) = THUMBNAIL_SIZE;
        let img = if img.width() > max_w || img.height() > max_h {
            img.resize(max_w, max_h, FilterType::Lanczos3)
        } else {
            img
        };
        let rgb = flatten(img);

        // Written next to the target and renamed so readers never see a partial file
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = self.dir.join(format!(
            ".{file_name}.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let written = write_jpeg(&rgb, &temp).and_then(|()| fs::rename(&temp, target).map_err(Into::into));
        if written.is_err() {
            let _ = fs::remove_file(&temp);
        }
        written
    }
}

fn write_jpeg(rgb: &RgbImage, path: &Path) -> std::result::Result<(), ThumbnailError> {
    let mut writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(rgb)?;
    writer.flush()?;
    Ok(())
}

/// Composite any alpha channel onto [`BACKGROUND`]
fn flatten(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = u32::from(pixel[3]);
        let mut blended = [0u8; 3];
        for (c, value) in blended.iter_mut().enumerate() {
            let fg = u32::from(pixel[c]) * alpha;
            let bg = u32::from(BACKGROUND[c]) * (255 - alpha);
            *value = ((fg + bg + 127) / 255) as u8;
        }
        out.put_pixel(x, y, Rgb(blended));
    }
    out
}

/// An entry is usable when it exists and is not older than its source
fn is_fresh(thumbnail: &Path, source: &Path) -> bool {
    let Ok(thumb_modified) = fs::metadata(thumbnail).and_then(|m| m.modified()) else {
        return false;
    };
    let source_modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    thumb_modified >= source_modified
}
