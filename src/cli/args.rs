//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Drive an asset picker session from a library manifest and a gesture script
#[derive(Parser, Debug)]
#[command(name = "asset-picker")]
#[command(author = "Vihaan Reddy M")]
#[command(version = "1.0.0")]
#[command(about = "Scripted host for the asset picker selection core", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Show 1-based selection badges (overrides config)
    #[arg(long, global = true)]
    pub show_selection_index: bool,

    /// Hide albums with no visible assets (overrides config)
    #[arg(long, global = true)]
    pub hide_empty_albums: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the albums of a library as the picker would show them
    Collections {
        /// Library manifest (TOML)
        #[arg(short = 'L', long)]
        library: PathBuf,
    },

    /// Replay a gesture script against a library and print the result
    ///
    /// Script lines are `select ID`, `deselect ID`, `toggle ID`,
    /// `highlight ID`, `unhighlight`, `finish` or `cancel`. Lines starting
    /// with `#` are comments. A script without `finish` or `cancel` finishes
    /// after its last line.
    Run {
        /// Library manifest (TOML)
        #[arg(short = 'L', long)]
        library: PathBuf,

        /// Gesture script
        #[arg(short, long)]
        script: PathBuf,

        /// Preselect an asset (can be specified multiple times)
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a configuration file
    InitConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,
}

impl Args {
    /// Fold command-line overrides into a loaded configuration
    pub fn apply_overrides(&self, config: &mut crate::core::config::Config) {
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.show_selection_index {
            config.picker.shows_selection_index = true;
        }
        if self.hide_empty_albums {
            config.picker.shows_empty_albums = false;
        }
    }
}
