//! Drawing primitives shared with the rendering side.
//!
//! Only the color model lives here: tool styles carry a [`Color`] that the
//! painting subsystem turns into its own paint source.

pub mod color;

pub use color::Color;

// Re-export color constants for public API
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
