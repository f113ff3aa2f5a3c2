//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::cli::host::ScriptHost;
use crate::cli::output::{self, SessionReport, StepReport};
use crate::cli::script::{Gesture, GestureScript, ScriptStep};
use crate::cli::{Args, Commands};
use crate::core::config::{init_config, Config};
use crate::core::error::PickerError;
use crate::library::{Asset, AssetId, Library, LibraryManifest};
use crate::ui::coordinator::{PickerCoordinator, SessionState};
use crate::ui::events::describe;

/// Dispatch the parsed command
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Commands::Collections { library } => list_collections(config, library),
        Commands::Run {
            library,
            script,
            select,
            json,
        } => run_session(config, library, script, select, *json),
        Commands::InitConfig { output } => generate_config_file(output.clone()),
        Commands::ShowConfig => {
            show_config(config);
            Ok(())
        }
    }
}

fn load_library(path: &Path) -> Result<Library> {
    let manifest = LibraryManifest::load(path)?;
    let library = manifest.resolve();
    info!(
        "Loaded library '{}': {} collections, {} assets",
        path.display(),
        library.collections().len(),
        library.asset_count()
    );
    Ok(library)
}

/// List the albums of a library as the picker would show them
pub fn list_collections(config: &Config, library_path: &Path) -> Result<()> {
    let library = load_library(library_path)?;
    let (host, _) = ScriptHost::new(config.host.clone());
    let picker = PickerCoordinator::new(Box::new(host), library.into_collections(), config.picker);

    let rows = picker.visible_collections();
    if rows.is_empty() {
        println!("No collections to show");
    } else {
        print!("{}", output::format_collections(&rows));
    }
    Ok(())
}

/// Replay a gesture script and print the session report
pub fn run_session(
    config: &Config,
    library_path: &Path,
    script_path: &Path,
    initial: &[String],
    json: bool,
) -> Result<()> {
    let library = load_library(library_path)?;
    let script = GestureScript::load(script_path)
        .with_context(|| format!("Failed to load script '{}'", script_path.display()))?;
    debug!("Script has {} gestures", script.len());

    let report = run_script(config, &library, &script, initial)?;
    output::print_report(&report, json)?;
    Ok(())
}

/// Run one scripted session against an already loaded library
///
/// A script that neither finishes nor cancels is finished after its last
/// gesture.
pub fn run_script(
    config: &Config,
    library: &Library,
    script: &GestureScript,
    initial: &[String],
) -> std::result::Result<SessionReport, PickerError> {
    let preselected = initial
        .iter()
        .map(|id| library.require(id))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let (host, handle) = ScriptHost::new(config.host.clone());
    let mut picker = PickerCoordinator::new(
        Box::new(host),
        library.collections().to_vec(),
        config.picker,
    );
    let notifications = picker.subscribe();
    picker.present_with_initial_selection(preselected)?;

    let mut report = SessionReport::default();
    for step in script.steps() {
        let outcome = apply_step(&mut picker, library, step)?;
        debug!("line {}: {} -> {}", step.line, step.gesture, outcome);
        report.steps.push(StepReport {
            line: step.line,
            gesture: step.gesture.to_string(),
            outcome,
        });
    }
    if !script.ends_session() {
        picker.finish()?;
    }

    for notification in notifications.drain() {
        debug!("notification: {}", describe(&notification));
        report.notifications += 1;
    }

    report.state = picker.state().to_string();
    if let Some(picked) = handle.finished() {
        report.set_picked(&picked);
    }
    debug!(
        "Host saw {} selection changes, cancelled: {}",
        handle.change_count(),
        handle.cancelled()
    );
    Ok(report)
}

fn apply_step(
    picker: &mut PickerCoordinator,
    library: &Library,
    step: &ScriptStep,
) -> std::result::Result<String, PickerError> {
    let resolve = |id: &AssetId| {
        library.asset(id).ok_or_else(|| PickerError::Script {
            line: step.line,
            message: format!("unknown asset '{}'", id),
        })
    };

    let outcome = match &step.gesture {
        Gesture::Select(id) => picker.attempt_select(&resolve(id)?)?.as_str().to_string(),
        Gesture::Deselect(id) => picker.attempt_deselect(&resolve(id)?)?.as_str().to_string(),
        Gesture::Toggle(id) => picker.attempt_toggle(&resolve(id)?)?.as_str().to_string(),
        Gesture::Highlight(id) => {
            if picker.attempt_highlight(&resolve(id)?)? {
                "highlighted".to_string()
            } else {
                "refused".to_string()
            }
        }
        Gesture::Unhighlight => match picker.unhighlight()? {
            Some(previous) => format!("cleared {}", previous.id()),
            None => "nothing highlighted".to_string(),
        },
        Gesture::Finish => format!("finished with {} assets", picker.finish()?.len()),
        Gesture::Cancel => {
            picker.cancel()?;
            SessionState::Cancelled.to_string()
        }
    };
    Ok(outcome)
}

/// Generate a configuration file at the standard or given location
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let output_path = match output {
        Some(path) => {
            fs::write(&path, Config::generate_default_config())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            path
        }
        None => init_config()?,
    };

    info!("Configuration file: {}", output_path.display());
    info!("Edit this file to customize the picker and host settings.");
    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) {
    let config_path = Config::get_active_config_path();
    info!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        info!("(Using default settings - no config file found)");
    }
    info!("");
    info!("Current Configuration:");
    info!("----------------------");
    info!("[picker]");
    info!("  shows_cancel_button = {}", config.picker.shows_cancel_button);
    info!("  shows_empty_albums = {}", config.picker.shows_empty_albums);
    info!(
        "  shows_number_of_assets = {}",
        config.picker.shows_number_of_assets
    );
    info!(
        "  shows_selection_index = {}",
        config.picker.shows_selection_index
    );
    info!("");
    info!("[host]");
    info!(
        "  max_selection = {}",
        if config.host.max_selection == 0 {
            "unlimited".to_string()
        } else {
            config.host.max_selection.to_string()
        }
    );
    info!("  disabled_assets = {:?}", config.host.disabled_assets);
    info!("  locked_assets = {:?}", config.host.locked_assets);
    info!(
        "  unhighlightable_assets = {:?}",
        config.host.unhighlightable_assets
    );
    info!(
        "  scroll_to_bottom = {}",
        config
            .host
            .scroll_to_bottom
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(picker default)".to_string())
    );
    info!("");
    info!("[logging]");
    info!("  level = \"{}\"", config.logging.level);
    info!("  log_to_file = {}", config.logging.log_to_file);
    info!("  log_file = \"{}\"", config.logging.log_file.display());
}
