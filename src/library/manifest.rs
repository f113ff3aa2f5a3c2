//! Library manifests
//!
//! A manifest is a TOML description of a media library: an ordered list of
//! collections, each listing its assets by id and kind. Assets that appear in
//! several collections (an asset in both "Recents" and "Favorites") resolve to
//! one shared handle, so identity holds across albums.
//!
//! ```toml
//! [[collections]]
//! title = "Recents"
//!
//! [[collections.assets]]
//! id = "IMG_0001"
//! kind = "photo"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::memory::{MemoryAsset, MemoryCollection};
use super::traits::{
    Asset, AssetCollection, AssetFilter, AssetId, AssetRef, CollectionRef, MediaKind,
};
use crate::core::error::{PickerError, Result};

/// One asset entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Stable asset id
    pub id: String,
    /// Media kind
    #[serde(default)]
    pub kind: MediaKind,
}

/// One collection entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// Display title
    pub title: String,
    /// Media filter (defaults to everything)
    #[serde(default)]
    pub filter: AssetFilter,
    /// Assets in display order
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

/// Serialized form of a library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryManifest {
    /// Collections in the order the host wants them listed
    #[serde(default)]
    pub collections: Vec<CollectionEntry>,
}

/// A resolved library: shared collections plus an id index over every asset
#[derive(Debug, Clone, Default)]
pub struct Library {
    collections: Vec<CollectionRef>,
    assets: HashMap<AssetId, AssetRef>,
}

impl LibraryManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a manifest from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PickerError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| PickerError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve the manifest into shared collections
    ///
    /// An id listed again with a different kind keeps the kind it was first
    /// seen with.
    pub fn resolve(&self) -> Library {
        let mut library = Library::default();

        for entry in &self.collections {
            let mut collection = MemoryCollection::new(entry.title.clone()).with_filter(entry.filter);

            for asset in &entry.assets {
                let id = AssetId::new(asset.id.clone());
                let shared = match library.assets.get(&id) {
                    Some(existing) => {
                        if existing.media_kind() != asset.kind {
                            warn!(
                                "Asset '{}' in '{}' listed as {} but first seen as {}",
                                id,
                                entry.title,
                                asset.kind,
                                existing.media_kind()
                            );
                        }
                        existing.clone()
                    }
                    None => {
                        let created = MemoryAsset::shared(id.clone(), asset.kind);
                        library.assets.insert(id, created.clone());
                        created
                    }
                };
                collection.push(shared);
            }

            debug!(
                "Resolved collection '{}' with {} assets",
                entry.title,
                collection.unfiltered_len()
            );
            library.collections.push(collection.into_shared());
        }

        library
    }
}

impl Library {
    /// Build a library from already shared collections
    pub fn from_collections(collections: Vec<CollectionRef>) -> Self {
        let mut assets = HashMap::new();
        for collection in &collections {
            for asset in collection.assets() {
                assets.entry(asset.id()).or_insert(asset);
            }
        }
        Self {
            collections,
            assets,
        }
    }

    /// Collections in manifest order
    pub fn collections(&self) -> &[CollectionRef] {
        &self.collections
    }

    /// Take the collection list, e.g. to hand it to a coordinator
    pub fn into_collections(self) -> Vec<CollectionRef> {
        self.collections
    }

    /// Look up an asset by id
    pub fn asset(&self, id: &AssetId) -> Option<AssetRef> {
        self.assets.get(id).cloned()
    }

    /// Look up an asset by id, failing for unknown ids
    pub fn require(&self, id: &str) -> Result<AssetRef> {
        let id = AssetId::new(id);
        self.asset(&id).ok_or(PickerError::UnknownAsset(id))
    }

    /// Number of distinct assets across all collections
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    const MANIFEST: &str = r#"
[[collections]]
title = "Recents"

[[collections.assets]]
id = "IMG_0001"
kind = "photo"

[[collections.assets]]
id = "MOV_0002"
kind = "video"

[[collections]]
title = "Favorites"
filter = { photos = true, videos = false }

[[collections.assets]]
id = "IMG_0001"
kind = "photo"

[[collections.assets]]
id = "MOV_0002"
kind = "video"

[[collections]]
title = "Hidden"
"#;

    #[test]
    fn test_parse_and_resolve() {
        let manifest = LibraryManifest::from_toml(MANIFEST).unwrap();
        assert_eq!(manifest.collections.len(), 3);

        let library = manifest.resolve();
        assert_eq!(library.collections().len(), 3);
        assert_eq!(library.asset_count(), 2);
        assert_eq!(library.collections()[0].asset_count(), 2);
        assert_eq!(library.collections()[1].asset_count(), 1);
        assert!(library.collections()[2].is_empty());
    }

    #[test]
    fn test_shared_ids_resolve_to_one_handle() {
        let library = LibraryManifest::from_toml(MANIFEST).unwrap().resolve();
        let in_recents = library.collections()[0].assets().next().unwrap();
        let in_favorites = library.collections()[1].assets().next().unwrap();
        assert!(Arc::ptr_eq(&in_recents, &in_favorites));
    }

    #[test]
    fn test_require_unknown_asset() {
        let library = LibraryManifest::from_toml(MANIFEST).unwrap().resolve();
        assert!(library.require("IMG_0001").is_ok());
        let err = library.require("nope").unwrap_err();
        assert!(matches!(err, PickerError::UnknownAsset(_)));
    }

    #[test]
    fn test_kind_defaults_to_photo() {
        let manifest = LibraryManifest::from_toml(
            "[[collections]]\ntitle = \"A\"\n[[collections.assets]]\nid = \"x\"\n",
        )
        .unwrap();
        assert_eq!(manifest.collections[0].assets[0].kind, MediaKind::Photo);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();
        let manifest = LibraryManifest::load(file.path()).unwrap();
        assert_eq!(manifest.collections[1].title, "Favorites");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"collections = 5").unwrap();
        let err = LibraryManifest::load(file.path()).unwrap_err();
        assert!(matches!(err, PickerError::Manifest { .. }));
    }

    #[test]
    fn test_library_from_collections() {
        let a = MemoryAsset::photo("a");
        let library = Library::from_collections(vec![
            MemoryCollection::new("One").with_asset(a.clone()).into_shared(),
            MemoryCollection::new("Two").with_asset(a).into_shared(),
        ]);
        assert_eq!(library.asset_count(), 1);
        assert_eq!(library.into_collections().len(), 2);
    }
}
