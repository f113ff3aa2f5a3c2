//! Random library generator
//!
//! Produces reproducible random libraries and gesture sequences from a seed,
//! for tests that need more variety than [`MockLibrary`](super::MockLibrary).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::library::{
    AssetFilter, AssetRef, CollectionRef, Library, MediaKind, MemoryAsset, MemoryCollection,
};

/// Configuration for library generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Distinct assets in the library
    pub asset_count: usize,
    /// Albums besides "All"
    pub album_count: usize,
    /// Share of assets that are videos, 0-100
    pub video_percent: u8,
    /// Chance in percent that an album gets a media filter
    pub filtered_percent: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_count: 50,
            album_count: 4,
            video_percent: 20,
            filtered_percent: 25,
        }
    }
}

/// A user gesture produced by [`LibraryGenerator::gestures`]
#[derive(Debug, Clone)]
pub enum RandomGesture {
    /// Tap that toggles selection
    Toggle(AssetRef),
    /// Touch down
    Highlight(AssetRef),
    /// Touch up
    Unhighlight,
}

/// Seeded generator for libraries and gesture streams
#[derive(Debug)]
pub struct LibraryGenerator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl LibraryGenerator {
    /// Generator with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GeneratorConfig::default())
    }

    /// Generator with a custom configuration
    pub fn with_config(seed: u64, config: GeneratorConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Generate `asset_count` assets with ids `asset-0000`...
    pub fn assets(&mut self) -> Vec<AssetRef> {
        (0..self.config.asset_count)
            .map(|n| {
                let kind = if self.rng.gen_range(0..100) < self.config.video_percent {
                    MediaKind::Video
                } else {
                    MediaKind::Photo
                };
                MemoryAsset::shared(format!("asset-{:04}", n), kind)
            })
            .collect()
    }

    /// Generate a library: an "All" album followed by random sub-albums
    ///
    /// Sub-albums reuse the handles from "All", so the same id always maps to
    /// the same asset across collections.
    pub fn library(&mut self) -> Library {
        let assets = self.assets();
        let mut collections: Vec<CollectionRef> =
            vec![MemoryCollection::new("All").with_assets(assets.clone()).into_shared()];

        for album in 0..self.config.album_count {
            let size = self.rng.gen_range(0..=assets.len());
            let mut members: Vec<AssetRef> = assets
                .choose_multiple(&mut self.rng, size)
                .cloned()
                .collect();
            members.shuffle(&mut self.rng);

            let filter = if self.rng.gen_range(0..100) < self.config.filtered_percent {
                if self.rng.gen_bool(0.5) {
                    AssetFilter::photos_only()
                } else {
                    AssetFilter::videos_only()
                }
            } else {
                AssetFilter::all()
            };

            collections.push(
                MemoryCollection::new(format!("Album {}", album + 1))
                    .with_assets(members)
                    .with_filter(filter)
                    .into_shared(),
            );
        }

        Library::from_collections(collections)
    }

    /// Random gesture stream over `assets`
    pub fn gestures(&mut self, assets: &[AssetRef], count: usize) -> Vec<RandomGesture> {
        if assets.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let asset = assets[self.rng.gen_range(0..assets.len())].clone();
                match self.rng.gen_range(0..10) {
                    0..=6 => RandomGesture::Toggle(asset),
                    7..=8 => RandomGesture::Highlight(asset),
                    _ => RandomGesture::Unhighlight,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Asset, AssetCollection};

    fn ids(library: &Library) -> Vec<Vec<String>> {
        library
            .collections()
            .iter()
            .map(|c| c.assets().map(|a| a.id().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_same_seed_same_library() {
        let first = LibraryGenerator::new(7).library();
        let second = LibraryGenerator::new(7).library();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_library_shape() {
        let config = GeneratorConfig {
            asset_count: 30,
            album_count: 3,
            ..Default::default()
        };
        let library = LibraryGenerator::with_config(1, config).library();
        assert_eq!(library.collections().len(), 4);
        assert_eq!(library.asset_count(), 30);
        assert_eq!(library.collections()[0].asset_count(), 30);
    }

    #[test]
    fn test_all_videos() {
        let config = GeneratorConfig {
            asset_count: 10,
            video_percent: 100,
            ..Default::default()
        };
        let assets = LibraryGenerator::with_config(3, config).assets();
        assert!(assets.iter().all(|a| a.media_kind().is_video()));
    }

    #[test]
    fn test_gestures_on_empty_input() {
        let mut generator = LibraryGenerator::new(0);
        assert!(generator.gestures(&[], 10).is_empty());
        let assets = generator.assets();
        assert_eq!(generator.gestures(&assets, 25).len(), 25);
    }
}
