//! Core functionality module
//!
//! This module contains the selection core of the asset picker, including
//! configuration management and error handling.
//!
//! # Submodules
//!
//! - `config` - Configuration loading, saving, and picker toggles
//! - `error` - Error types and result aliases
//! - `selection` - Ordered selection set and validated mutation

pub mod config;
pub mod error;
pub mod selection;
