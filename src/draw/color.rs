//! RGBA color type, the named palette, and color-spec parsing.
//!
//! The palette is the set of opaque colors config files may name: red,
//! green, blue, yellow, orange, pink (alias magenta), white and black.

use serde::Serialize;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use inkscribe::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(Color::parse("#ff0000"), Some(red));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color specification as written in the tool configuration.
    ///
    /// Accepts the palette names (case-insensitive) and hex forms `#rgb`,
    /// `#rrggbb` and `#rrggbbaa`. Returns `None` for anything else.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        match spec.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => name_to_color(spec),
        }
    }

    /// Formats the color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        );
        if channel(self.a) == u8::MAX {
            rgb
        } else {
            format!("{rgb}{:02x}", channel(self.a))
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);

    match hex.len() {
        3 => {
            // #rgb expands each nibble: f -> ff
            let nibble = |i: usize| byte(&hex[i..i + 1].repeat(2));
            Some(Color::new(nibble(0)?, nibble(1)?, nibble(2)?, 1.0))
        }
        6 => Some(Color::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            1.0,
        )),
        8 => Some(Color::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" | "magenta" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);
/// Also reachable as "magenta" in config files.
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_names_case_insensitively() {
        assert_eq!(Color::parse("red"), Some(RED));
        assert_eq!(Color::parse("Black"), Some(BLACK));
        assert_eq!(Color::parse("MAGENTA"), Some(PINK));
        assert_eq!(Color::parse("chartreuse"), None);
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#00ff00"), Some(GREEN));
        assert_eq!(Color::parse("#fff"), Some(WHITE));

        let translucent = Color::parse("#0000ff80").unwrap();
        assert_eq!(translucent.b, 1.0);
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gg0000"), None);
        assert_eq!(Color::parse("#"), None);
    }

    #[test]
    fn palette_names_map_to_opaque_colors() {
        let palette = [
            ("red", "#ff0000"),
            ("green", "#00ff00"),
            ("blue", "#0000ff"),
            ("yellow", "#ffff00"),
            ("orange", "#ff8000"),
            ("pink", "#ff00ff"),
            ("white", "#ffffff"),
            ("black", "#000000"),
        ];
        for (name, hex) in palette {
            assert_eq!(Color::parse(name).map(|c| c.to_hex()).as_deref(), Some(hex), "{name}");
        }
    }

    #[test]
    fn hex_output_drops_opaque_alpha() {
        assert_eq!(ORANGE.to_hex(), "#ff8000");
        assert_eq!(Color::new(0.0, 0.0, 0.0, 0.0).to_hex(), "#00000000");
    }
}
