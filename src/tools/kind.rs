//! Drawing tool types.

use serde::Serialize;
use std::fmt;

/// Drawing mode of a configured tool.
///
/// The tool type decides what a stroke with the tool produces and which style
/// fields matter (arrow size only for [`ToolKind::Arrow`], no color for
/// [`ToolKind::Eraser`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Freehand drawing - follows the pointer path
    Pen,
    /// Straight line between start and end points
    Line,
    /// Straight line with a directional head
    Arrow,
    /// Rectangle outline - from corner to corner
    #[serde(rename = "rect")]
    RectOutline,
    /// Filled rectangle - from corner to corner
    #[serde(rename = "fillrect")]
    RectFilled,
    /// Removes paint under the stroke
    Eraser,
    /// Repaints existing strokes under the pointer with the tool color
    Recolor,
}

impl ToolKind {
    /// Whether strokes made with this tool carry a paint color.
    pub fn uses_color(self) -> bool {
        !matches!(self, ToolKind::Eraser)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::RectOutline => "rect",
            ToolKind::RectFilled => "fillrect",
            ToolKind::Eraser => "eraser",
            ToolKind::Recolor => "recolor",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
