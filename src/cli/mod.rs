//! CLI module for the asset picker
//!
//! This module contains the scripted command-line host: argument parsing,
//! gesture scripts, the policy-driven delegate and command handlers.
//!
//! # Submodules
//!
//! - `args` - Command-line argument definitions using clap
//! - `commands` - Command handler implementations
//! - `host` - Delegate answering picker predicates from the host policy
//! - `output` - Session reports and the dual console/file log writer
//! - `script` - Gesture script parsing

pub mod args;
pub mod commands;
pub mod host;
pub mod output;
pub mod script;

// Re-export commonly used types for convenience
pub use args::{Args, Commands};
pub use commands::{run_command, run_script};
pub use host::{HostHandle, ScriptHost};
pub use output::{DualWriter, SessionReport};
pub use script::{Gesture, GestureScript};
