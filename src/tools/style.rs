//! Tool style definitions and their built-in defaults.

use super::kind::ToolKind;
use crate::draw::{Color, color::RED};
use serde::Serialize;

/// Stroke width for every tool type except the eraser.
pub const DEFAULT_WIDTH: u32 = 7;

/// Eraser width; erasing wants a much wider footprint than drawing.
pub const DEFAULT_ERASER_WIDTH: u32 = 75;

pub const DEFAULT_COLOR: Color = RED;

/// Arrowhead size for [`ToolKind::Arrow`], relative to the stroke width.
pub const DEFAULT_ARROW_SIZE: f64 = 1.0;

/// Lower bound for pressure-scaled width.
pub const DEFAULT_MIN_WIDTH: u32 = 1;

/// Upper bound for pressure-scaled width (effectively unbounded).
pub const DEFAULT_MAX_WIDTH: u32 = u32::MAX;

/// Visual style of one tool.
///
/// This is both the working record filled in while a tool definition is
/// parsed and the style stored in a committed [`ToolEntry`](super::ToolEntry).
/// A valid style has `width > 0` and `minwidth <= maxwidth`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDef {
    pub tool: ToolKind,
    /// Paint color; `None` for tools that do not paint.
    pub color: Option<Color>,
    pub width: u32,
    /// Arrowhead size, only meaningful for [`ToolKind::Arrow`].
    pub arrowsize: f64,
    pub minwidth: u32,
    pub maxwidth: u32,
}

impl StyleDef {
    /// Returns the built-in style for a tool type, as used when a definition
    /// carries no style clause.
    pub fn defaults_for(tool: ToolKind) -> Self {
        Self {
            tool,
            color: tool.uses_color().then_some(DEFAULT_COLOR),
            width: match tool {
                ToolKind::Eraser => DEFAULT_ERASER_WIDTH,
                _ => DEFAULT_WIDTH,
            },
            arrowsize: match tool {
                ToolKind::Arrow => DEFAULT_ARROW_SIZE,
                _ => 0.0,
            },
            minwidth: DEFAULT_MIN_WIDTH,
            maxwidth: DEFAULT_MAX_WIDTH,
        }
    }

    pub fn width_bounds_valid(&self) -> bool {
        self.minwidth <= self.maxwidth
    }
}
