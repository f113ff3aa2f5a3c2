//! CLI output utilities
//!
//! Session reports, album listings and the dual console/file log writer.

use std::io::Write;

use serde::Serialize;

use crate::library::{Asset, AssetRef};
use crate::ui::coordinator::CollectionSummary;

/// Outcome of one script step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Script line
    pub line: usize,
    /// Gesture as written
    pub gesture: String,
    /// What the picker did with it
    pub outcome: String,
}

/// A selected asset as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickedAsset {
    /// 1-based pick order
    pub order: usize,
    /// Asset id
    pub id: String,
    /// "photo" or "video"
    pub kind: String,
}

/// Everything a scripted session produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Final session state
    pub state: String,
    /// Assets handed to the host on finish; empty when cancelled
    pub picked: Vec<PickedAsset>,
    /// Per-step outcomes
    pub steps: Vec<StepReport>,
    /// Notifications seen on the bus
    pub notifications: usize,
}

impl SessionReport {
    /// Record the finished selection
    pub fn set_picked(&mut self, assets: &[AssetRef]) {
        self.picked = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| PickedAsset {
                order: index + 1,
                id: asset.id().to_string(),
                kind: asset.media_kind().display_name().to_lowercase(),
            })
            .collect();
    }
}

/// Render a report as human-readable text
pub fn format_report(report: &SessionReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        out.push_str(&format!(
            "  {:>3}  {:<24} {}\n",
            step.line, step.gesture, step.outcome
        ));
    }
    out.push_str(&format!(
        "Session {} ({} notifications)\n",
        report.state, report.notifications
    ));
    if report.picked.is_empty() {
        out.push_str("No assets picked\n");
    } else {
        out.push_str(&format!("Picked {} assets:\n", report.picked.len()));
        for asset in &report.picked {
            out.push_str(&format!("  #{} {} ({})\n", asset.order, asset.id, asset.kind));
        }
    }
    out
}

/// Print a report to stdout as text or JSON
pub fn print_report(report: &SessionReport, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report));
    }
    Ok(())
}

/// Render album list rows
pub fn format_collections(rows: &[CollectionSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        match row.asset_count {
            Some(count) => out.push_str(&format!("{:>3}  {} ({})\n", row.index, row.title, count)),
            None => out.push_str(&format!("{:>3}  {}\n", row.index, row.title)),
        }
    }
    out
}

/// A writer that writes to both stderr and a file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // Console failures must not lose the file copy
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

// ============================================================================
// Tests
// ============================================================================
