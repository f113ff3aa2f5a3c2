//! Mock library for testing without a platform media store
//!
//! Builds a small, fixed album layout resembling a phone's photo library:
//! a "Recents" album with photos and videos, a "Favorites" subset, a
//! video-only smart album and an empty "Hidden" album.

use crate::library::{AssetFilter, AssetRef, CollectionRef, Library, MemoryAsset, MemoryCollection};

/// Title of the album holding every asset
pub const RECENTS: &str = "Recents";

/// Title of the favorites subset
pub const FAVORITES: &str = "Favorites";

/// Title of the video-only smart album
pub const VIDEOS: &str = "Videos";

/// Title of the empty album
pub const HIDDEN: &str = "Hidden";

/// Fixed album layout shared by many tests
#[derive(Debug, Clone)]
pub struct MockLibrary {
    photos: Vec<AssetRef>,
    videos: Vec<AssetRef>,
}

impl Default for MockLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLibrary {
    /// Standard layout: photos `IMG_0001`..`IMG_0006`, videos `MOV_0001`..`MOV_0002`
    pub fn new() -> Self {
        Self::with_counts(6, 2)
    }

    /// Layout with the given number of photos and videos
    pub fn with_counts(photos: usize, videos: usize) -> Self {
        Self {
            photos: (1..=photos)
                .map(|n| MemoryAsset::photo(format!("IMG_{:04}", n)))
                .collect(),
            videos: (1..=videos)
                .map(|n| MemoryAsset::video(format!("MOV_{:04}", n)))
                .collect(),
        }
    }

    /// Every photo, in library order
    pub fn photos(&self) -> &[AssetRef] {
        &self.photos
    }

    /// Every video, in library order
    pub fn videos(&self) -> &[AssetRef] {
        &self.videos
    }

    /// Photo number `n` (1-based)
    pub fn photo(&self, n: usize) -> AssetRef {
        self.photos[n - 1].clone()
    }

    /// Video number `n` (1-based)
    pub fn video(&self, n: usize) -> AssetRef {
        self.videos[n - 1].clone()
    }

    /// Every photo and video interleaved the way "Recents" shows them
    pub fn all_assets(&self) -> Vec<AssetRef> {
        let mut all = self.photos.clone();
        all.extend(self.videos.iter().cloned());
        all
    }

    /// Recents, Favorites, Videos, Hidden
    pub fn collections(&self) -> Vec<CollectionRef> {
        let favorites: Vec<AssetRef> = self.photos.iter().step_by(2).cloned().collect();

        vec![
            MemoryCollection::new(RECENTS)
                .with_assets(self.all_assets())
                .into_shared(),
            MemoryCollection::new(FAVORITES)
                .with_assets(favorites)
                .into_shared(),
            // Smart album: holds everything, shows only videos
            MemoryCollection::new(VIDEOS)
                .with_assets(self.all_assets())
                .with_filter(AssetFilter::videos_only())
                .into_shared(),
            MemoryCollection::new(HIDDEN).into_shared(),
        ]
    }

    /// The same layout as a resolved [`Library`]
    pub fn library(&self) -> Library {
        Library::from_collections(self.collections())
    }
}
