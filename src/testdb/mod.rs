//! Test Database Module
//!
//! Test fixtures for exercising picker sessions without a platform media
//! store or a real host application.
//!
//! # Features
//!
//! - **Mock Library**: A fixed album layout (Recents, Favorites, Videos, Hidden)
//! - **Library Generator**: Seeded random libraries and gesture streams
//! - **Recording Delegate**: A delegate that records every hook call and
//!   vetoes by id
//!
//! # Quick Start
//!
//! ```rust
//! use asset_picker::core::config::PickerConfig;
//! use asset_picker::testdb::{DelegateCall, MockLibrary, RecordingDelegate};
//! use asset_picker::ui::PickerCoordinator;
//!
//! let mock = MockLibrary::new();
//! let delegate = RecordingDelegate::new().vetoing_select(&["IMG_0002"]);
//! let log = delegate.log();
//!
//! let mut picker =
//!     PickerCoordinator::new(Box::new(delegate), mock.collections(), PickerConfig::default());
//! picker.present().unwrap();
//! picker.attempt_select(&mock.photo(1)).unwrap();
//! picker.attempt_select(&mock.photo(2)).unwrap();
//! picker.finish().unwrap();
//!
//! assert_eq!(log.finished(), Some(vec!["IMG_0001".to_string()]));
//! assert!(log.contains(&DelegateCall::ShouldSelect("IMG_0002".into())));
//! ```

pub mod generator;
pub mod mock_library;
pub mod recorder;

#[cfg(test)]
mod integration;

// Re-export commonly used types for convenience
pub use generator::{GeneratorConfig, LibraryGenerator, RandomGesture};
pub use mock_library::MockLibrary;
pub use recorder::{CallLog, DelegateCall, RecordingDelegate};
