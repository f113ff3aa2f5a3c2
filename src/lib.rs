//! Asset Picker Library
//!
//! The selection core of a multi-asset photo and video picker: an ordered,
//! duplicate-free selection, the veto and observation protocol a host
//! implements, and the abstraction that decouples the picker from any
//! concrete media store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Selection model, configuration and error handling
//! - [`library`] - `Asset` / `AssetCollection` traits, in-memory collections and
//!   TOML library manifests
//! - [`ui`] - Picker coordinator, delegate protocol, notification bus and grid
//!   layout hints
//! - [`cli`] - Scripted command-line host (only used by the binary)
//! - [`testdb`] - Mock libraries, random generators and a recording delegate
//!
//! # Example Usage
//!
//! ```rust
//! use asset_picker::core::config::PickerConfig;
//! use asset_picker::core::selection::{SelectionOutcome, SelectionSet};
//! use asset_picker::library::{Asset, AssetRef, MemoryAsset, MemoryCollection};
//! use asset_picker::ui::{PickerCoordinator, PickerDelegate};
//!
//! /// Allows at most two assets and reports the result
//! struct TwoAtMost;
//!
//! impl PickerDelegate for TwoAtMost {
//!     fn did_finish_picking(&mut self, assets: Vec<AssetRef>) {
//!         for asset in &assets {
//!             println!("picked {}", asset.id());
//!         }
//!     }
//!
//!     fn should_select_asset(&self, selection: &SelectionSet, _asset: &AssetRef) -> bool {
//!         selection.len() < 2
//!     }
//! }
//!
//! let assets: Vec<AssetRef> = ["a", "b", "c"].into_iter().map(MemoryAsset::photo).collect();
//! let album = MemoryCollection::new("Recents").with_assets(assets.clone());
//!
//! let mut picker = PickerCoordinator::new(
//!     Box::new(TwoAtMost),
//!     vec![album.into_shared()],
//!     PickerConfig::default(),
//! );
//! picker.present().unwrap();
//!
//! assert_eq!(picker.attempt_select(&assets[0]).unwrap(), SelectionOutcome::Committed);
//! assert_eq!(picker.attempt_select(&assets[1]).unwrap(), SelectionOutcome::Committed);
//! assert_eq!(picker.attempt_select(&assets[2]).unwrap(), SelectionOutcome::Vetoed);
//!
//! let picked = picker.finish().unwrap();
//! assert_eq!(picked.len(), 2);
//! ```
//!
//! # Features
//!
//! - **Ordered Selection** - Selection order is insertion order; reselecting
//!   appends at the end
//! - **Veto Hooks** - Every transition can be refused by the host
//! - **Dual Observation** - Typed delegate callbacks and a publish/subscribe bus,
//!   fed from one emission point
//! - **Pluggable Libraries** - Any media store behind two small traits
//! - **Comprehensive Testing** - Mock libraries and a recording delegate

// Core modules - always available
pub mod cli;
pub mod core;
pub mod library;
pub mod testdb;
pub mod ui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
