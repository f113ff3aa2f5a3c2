//! Media library module
//!
//! This module decouples the picker from any concrete media store.
//!
//! # Submodules
//!
//! - `traits` - `Asset` / `AssetCollection` capability traits and identity types
//! - `memory` - In-memory asset and collection implementations
//! - `manifest` - TOML library manifests resolved into shared collections

pub mod manifest;
pub mod memory;
pub mod traits;

pub use manifest::{AssetEntry, CollectionEntry, Library, LibraryManifest};
pub use memory::{MemoryAsset, MemoryCollection};
pub use traits::{
    same_asset, Asset, AssetCollection, AssetFilter, AssetId, AssetIter, AssetRef, CollectionRef,
    MediaKind,
};
