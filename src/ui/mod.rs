//! Picker UI Support Module
//!
//! This module holds everything that sits between the selection core and a
//! rendering surface. It is framework agnostic: any UI toolkit (egui, iced,
//! a terminal grid, a platform view) drives a session through the same
//! coordinator.
//!
//! # Architecture
//!
//! - [`coordinator`] - Session owner: lifecycle, gestures, read-side views
//! - [`delegate`] - Host delegate protocol and the single dispatch point
//! - [`events`] - Publish/subscribe notifications for aggregate observers
//! - [`layout`] - Grid layout hints exchanged with the delegate
//!
//! # Threading Model
//!
//! A session is single-threaded and run-to-completion: every call returns after
//! the mutation and all notifications it caused. Only bus subscriptions may be
//! moved to other threads.
//!
//! # Example Usage
//!
//! ```rust
//! use asset_picker::core::config::PickerConfig;
//! use asset_picker::library::{AssetRef, MemoryAsset, MemoryCollection};
//! use asset_picker::ui::{PickerCoordinator, PickerDelegate};
//!
//! struct Host;
//!
//! impl PickerDelegate for Host {
//!     fn did_finish_picking(&mut self, assets: Vec<AssetRef>) {
//!         println!("picked {}", assets.len());
//!     }
//! }
//!
//! let photo = MemoryAsset::photo("IMG_0001");
//! let album = MemoryCollection::new("Recents").with_asset(photo.clone());
//!
//! let mut picker =
//!     PickerCoordinator::new(Box::new(Host), vec![album.into_shared()], PickerConfig::default());
//! let notifications = picker.subscribe();
//!
//! picker.present().unwrap();
//! picker.attempt_select(&photo).unwrap();
//! let picked = picker.finish().unwrap();
//!
//! assert_eq!(picked.len(), 1);
//! assert_eq!(notifications.drain().len(), 2);
//! ```

pub mod coordinator;
pub mod delegate;
pub mod events;
pub mod layout;

pub use coordinator::{AssetState, CollectionSummary, PickerCoordinator, SessionState};
pub use delegate::{resolve_gate, DelegateDispatch, Gate, PickerDelegate, PickerEvent};
pub use events::{Notification, NotificationBus, Subscription};
pub use layout::{ContentSize, GridLayout, SizeClass, TraitContext};
