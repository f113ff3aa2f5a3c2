//! Media library abstraction traits
//!
//! This module defines the capability traits the picker core consumes, so that
//! any media store (a platform photo library, an in-memory fixture, a paged
//! remote fetch) can back a picker session.
//!
//! # Architecture
//!
//! - `Asset` - One pickable photo or video with a stable identity
//! - `AssetCollection` - A named, ordered, filterable group of assets (an album)
//! - `AssetId` - Opaque identity used for equality and selection lookups
//! - `MediaKind` - Photo/video discrimination (the only metadata the core reads)
//!
//! # Example Usage
//!
//! ```rust
//! use asset_picker::library::{AssetCollection, MemoryCollection, MemoryAsset, MediaKind};
//!
//! let album = MemoryCollection::new("Recents")
//!     .with_asset(MemoryAsset::shared("IMG_0001", MediaKind::Photo))
//!     .with_asset(MemoryAsset::shared("MOV_0002", MediaKind::Video));
//!
//! // Enumeration is restartable: every call yields a fresh sequence
//! assert_eq!(album.assets().count(), 2);
//! assert_eq!(album.assets().count(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// Opaque, stable identity of an asset
///
/// Two asset handles refer to the same asset exactly when their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new asset id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of media an asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (JPEG, HEIC, PNG, RAW, ...)
    #[default]
    Photo,
    /// Video clip (MOV, MP4, ...)
    Video,
}

impl MediaKind {
    /// Check if this is a photo
    pub fn is_photo(&self) -> bool {
        matches!(self, MediaKind::Photo)
    }

    /// Check if this is a video
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }

    /// Get a human-readable name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaKind::Photo => "Photo",
            MediaKind::Video => "Video",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One pickable item from a media library
///
/// Implementors supply identity and media kind only. The core never inspects
/// pixel data, paths or any other metadata.
pub trait Asset: Debug + Send + Sync {
    /// Stable identity of this asset
    fn id(&self) -> AssetId;

    /// Whether this asset is a photo or a video
    fn media_kind(&self) -> MediaKind;
}

/// Shared handle to an asset
pub type AssetRef = Arc<dyn Asset>;

/// Identity comparison between two asset handles
pub fn same_asset(a: &dyn Asset, b: &dyn Asset) -> bool {
    a.id() == b.id()
}

/// Which media kinds a collection exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFilter {
    /// Include still images
    pub photos: bool,
    /// Include video clips
    pub videos: bool,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl AssetFilter {
    /// Accept every asset
    pub fn all() -> Self {
        Self {
            photos: true,
            videos: true,
        }
    }

    /// Accept only photos
    pub fn photos_only() -> Self {
        Self {
            photos: true,
            videos: false,
        }
    }

    /// Accept only videos
    pub fn videos_only() -> Self {
        Self {
            photos: false,
            videos: true,
        }
    }

    /// Check whether an asset of the given kind passes the filter
    pub fn accepts(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Photo => self.photos,
            MediaKind::Video => self.videos,
        }
    }
}

/// Lazily produced, finite sequence of assets
pub type AssetIter<'a> = Box<dyn Iterator<Item = AssetRef> + 'a>;

/// A named, ordered group of assets (an album)
///
/// `assets` must return a fresh, finite sequence on every call: the picker may
/// render the same album several times in one session. Cancelling an in-flight
/// fetch behind the iterator is the implementor's concern.
pub trait AssetCollection: Debug {
    /// Display name of the collection
    fn title(&self) -> &str;

    /// Enumerate the assets that pass the collection's filter, in display order
    fn assets(&self) -> AssetIter<'_>;

    /// The filter applied by `assets`
    fn filter(&self) -> AssetFilter {
        AssetFilter::all()
    }

    /// Whether the collection has no assets after filtering
    fn is_empty(&self) -> bool {
        self.assets().next().is_none()
    }

    /// Number of assets after filtering
    fn asset_count(&self) -> usize {
        self.assets().count()
    }
}

/// Shared handle to a collection
pub type CollectionRef = Arc<dyn AssetCollection>;
