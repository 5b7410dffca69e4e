/// Caches layered over the filesystem
///
/// This module handles:
/// - Downscaled preview images shared across projects (thumbnail.rs)
/// - Memoized shot listings keyed by project path (listing.rs)
///
/// Both are disposable: dropping either only costs recomputation.

pub mod listing;
pub mod thumbnail;

pub use listing::ListingCache;
pub use thumbnail::{ClearScope, ThumbnailCache, ThumbnailKey};
