//! Gesture scripts
//!
//! A gesture script is a plain text file with one gesture per line:
//!
//! ```text
//! # pick two photos, change our mind about one
//! select IMG_0001
//! select IMG_0002
//! highlight IMG_0003
//! unhighlight
//! deselect IMG_0001
//! finish
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Nothing may follow a
//! `finish` or `cancel`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::{PickerError, Result};
use crate::library::AssetId;

/// One user gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Tap on an unselected asset
    Select(AssetId),
    /// Tap on a selected asset
    Deselect(AssetId),
    /// Tap, whatever the current state
    Toggle(AssetId),
    /// Touch down
    Highlight(AssetId),
    /// Touch up
    Unhighlight,
    /// "Done"
    Finish,
    /// "Cancel"
    Cancel,
}

impl Gesture {
    /// Whether this gesture ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Gesture::Finish | Gesture::Cancel)
    }

    /// Asset the gesture targets, if any
    pub fn asset_id(&self) -> Option<&AssetId> {
        match self {
            Gesture::Select(id)
            | Gesture::Deselect(id)
            | Gesture::Toggle(id)
            | Gesture::Highlight(id) => Some(id),
            Gesture::Unhighlight | Gesture::Finish | Gesture::Cancel => None,
        }
    }

    /// Script keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Gesture::Select(_) => "select",
            Gesture::Deselect(_) => "deselect",
            Gesture::Toggle(_) => "toggle",
            Gesture::Highlight(_) => "highlight",
            Gesture::Unhighlight => "unhighlight",
            Gesture::Finish => "finish",
            Gesture::Cancel => "cancel",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.asset_id() {
            Some(id) => write!(f, "{} {}", self.keyword(), id),
            None => f.write_str(self.keyword()),
        }
    }
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let keyword = words.next().ok_or_else(|| "empty gesture".to_string())?;
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected '{}' after '{}'", extra, keyword));
        }

        let id = || {
            argument
                .map(AssetId::from)
                .ok_or_else(|| format!("'{}' needs an asset id", keyword))
        };
        let bare = |gesture: Gesture| match argument {
            Some(arg) => Err(format!("'{}' takes no argument, got '{}'", keyword, arg)),
            None => Ok(gesture),
        };

        match keyword.to_lowercase().as_str() {
            "select" => Ok(Gesture::Select(id()?)),
            "deselect" => Ok(Gesture::Deselect(id()?)),
            "toggle" => Ok(Gesture::Toggle(id()?)),
            "highlight" => Ok(Gesture::Highlight(id()?)),
            "unhighlight" => bare(Gesture::Unhighlight),
            "finish" | "done" => bare(Gesture::Finish),
            "cancel" => bare(Gesture::Cancel),
            other => Err(format!("unknown gesture '{}'", other)),
        }
    }
}

/// A gesture with the script line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// 1-based line number
    pub line: usize,
    /// Parsed gesture
    pub gesture: Gesture,
}

/// A parsed gesture script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureScript {
    steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Parse script text
    pub fn parse(content: &str) -> Result<Self> {
        let mut steps: Vec<ScriptStep> = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            if let Some(last) = steps.last().filter(|step| step.gesture.is_terminal()) {
                return Err(PickerError::Script {
                    line,
                    message: format!(
                        "no gesture may follow '{}' on line {}",
                        last.gesture, last.line
                    ),
                });
            }

            let gesture = text
                .parse::<Gesture>()
                .map_err(|message| PickerError::Script { line, message })?;
            steps.push(ScriptStep { line, gesture });
        }

        Ok(Self { steps })
    }

    /// Load and parse a script file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Steps in script order
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Number of gestures
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no gestures
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the last gesture is `finish` or `cancel`
    pub fn ends_session(&self) -> bool {
        self.steps
            .last()
            .is_some_and(|step| step.gesture.is_terminal())
    }
}
