//! CSS colors for box fills, strokes and backgrounds.
//!
//! [`Color`] keeps whatever notation it was parsed from, so a named color is
//! written back to SVG by name (`lightblue`, not `#add8e6`).

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
///
/// ```
/// use classgram_core::color::Color;
///
/// let fill = Color::new("lightblue").unwrap();
/// assert_eq!(fill.to_string(), "lightblue");
/// assert!(Color::new("#00000080").unwrap().alpha() < 1.0);
/// assert!(Color::new("bluish").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses any CSS color string: names, hex, `rgb()`, `hsl()` and so on.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input.
    pub fn new(value: &str) -> Result<Self, String> {
        DynamicColor::from_str(value)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{value}`: {err}"))
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::new("white").expect("'white' is a valid CSS color")
    }

    /// Opacity between 0.0 and 1.0, written as `fill-opacity` or
    /// `stroke-opacity`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

/// Black, the stroke color of every line and outline.
impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.color, f)
    }
}
