//! In-memory library implementation
//!
//! Plain `Asset` and `AssetCollection` implementations backed by vectors.
//! Used by the CLI host (via library manifests) and by hosts that already
//! hold their media list in memory.

use std::sync::Arc;

use super::traits::{
    Asset, AssetCollection, AssetFilter, AssetId, AssetIter, AssetRef, CollectionRef, MediaKind,
};

/// An asset that is just an id and a media kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAsset {
    id: AssetId,
    kind: MediaKind,
}

impl MemoryAsset {
    /// Create a new in-memory asset
    pub fn new(id: impl Into<AssetId>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Create a new in-memory asset already wrapped in a shared handle
    pub fn shared(id: impl Into<AssetId>, kind: MediaKind) -> AssetRef {
        Arc::new(Self::new(id, kind))
    }

    /// Shorthand for a shared photo
    pub fn photo(id: impl Into<AssetId>) -> AssetRef {
        Self::shared(id, MediaKind::Photo)
    }

    /// Shorthand for a shared video
    pub fn video(id: impl Into<AssetId>) -> AssetRef {
        Self::shared(id, MediaKind::Video)
    }
}

impl Asset for MemoryAsset {
    fn id(&self) -> AssetId {
        self.id.clone()
    }

    fn media_kind(&self) -> MediaKind {
        self.kind
    }
}

/// An album held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    title: String,
    assets: Vec<AssetRef>,
    filter: AssetFilter,
}

impl MemoryCollection {
    /// Create an empty collection
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assets: Vec::new(),
            filter: AssetFilter::all(),
        }
    }

    /// Append an asset
    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.assets.push(asset);
        self
    }

    /// Append several assets
    pub fn with_assets<I: IntoIterator<Item = AssetRef>>(mut self, assets: I) -> Self {
        self.assets.extend(assets);
        self
    }

    /// Restrict enumeration to the given media kinds
    pub fn with_filter(mut self, filter: AssetFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Append an asset in place
    pub fn push(&mut self, asset: AssetRef) {
        self.assets.push(asset);
    }

    /// Number of assets before filtering
    pub fn unfiltered_len(&self) -> usize {
        self.assets.len()
    }

    /// Wrap in a shared collection handle
    pub fn into_shared(self) -> CollectionRef {
        Arc::new(self)
    }
}

impl AssetCollection for MemoryCollection {
    fn title(&self) -> &str {
        &self.title
    }

    fn assets(&self) -> AssetIter<'_> {
        let filter = self.filter;
        Box::new(
            self.assets
                .iter()
                .filter(move |asset| filter.accepts(asset.media_kind()))
                .cloned(),
        )
    }

    fn filter(&self) -> AssetFilter {
        self.filter
    }
}
