//! Grid layout hints
//!
//! The rendering surface asks the delegate for a grid layout whenever its
//! content size or trait context changes. These types carry that exchange;
//! the selection core never reads them.

use serde::{Deserialize, Serialize};

/// Size of the area the asset grid is laid out in, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentSize {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl ContentSize {
    /// Create a new content size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the area is taller than it is wide
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }
}

/// Coarse width/height classification of the presenting environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Phone-like constrained dimension
    #[default]
    Compact,
    /// Tablet or desktop dimension
    Regular,
}

/// Environment traits the layout may depend on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitContext {
    /// Horizontal size class
    pub horizontal: SizeClass,
    /// Vertical size class
    pub vertical: SizeClass,
    /// Pixels per point
    pub display_scale: f32,
}

impl Default for TraitContext {
    fn default() -> Self {
        Self {
            horizontal: SizeClass::Compact,
            vertical: SizeClass::Regular,
            display_scale: 2.0,
        }
    }
}

/// A uniform square grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of columns
    pub columns: usize,
    /// Horizontal gap between items
    pub item_spacing: f32,
    /// Vertical gap between rows
    pub line_spacing: f32,
    /// Edge length of one square item
    pub item_size: f32,
}

/// Gap used by the default layout
pub const DEFAULT_SPACING: f32 = 2.0;

impl GridLayout {
    /// Default layout: 4 columns for compact portrait, 6 for compact
    /// landscape, 7 for regular width.
    pub fn default_for(content_size: ContentSize, traits: TraitContext) -> Self {
        let columns = match traits.horizontal {
            SizeClass::Regular => 7,
            SizeClass::Compact if content_size.is_portrait() => 4,
            SizeClass::Compact => 6,
        };
        Self::with_columns(content_size, columns, DEFAULT_SPACING)
    }

    /// Fit `columns` square items across the content width
    pub fn with_columns(content_size: ContentSize, columns: usize, spacing: f32) -> Self {
        let columns = columns.max(1);
        let gaps = spacing * (columns - 1) as f32;
        let item_size = ((content_size.width - gaps) / columns as f32).max(0.0);
        Self {
            columns,
            item_spacing: spacing,
            line_spacing: spacing,
            item_size,
        }
    }
}
