//! How lines and outlines are stroked.
//!
//! Connector lines are round-joined; glyph outlines switch to miter joins so
//! that triangle and diamond tips stay sharp. The only dash pattern in use is
//! the 5/5 dash of implementation and dependency connectors.
//!
//! ```
//! use classgram_core::{apply_stroke, color::Color, draw::StrokeDefinition};
//! use svg::node::element::Line;
//!
//! let stroke = StrokeDefinition::dashed(Color::default(), 1.5);
//! let line = apply_stroke!(Line::new(), &stroke).to_string();
//! assert!(line.contains("stroke-dasharray=\"5,5\""));
//! ```

use crate::color::Color;

/// Solid or dashed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// The `stroke-dasharray` value; solid strokes have none.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// Corner rendering, written as `stroke-linejoin`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Round,
    Miter,
}

impl StrokeJoin {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Miter => "miter",
        }
    }
}

/// Color, width, dash style and join of a stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    join: StrokeJoin,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            join: StrokeJoin::default(),
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::solid(color, width)
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

/// A one unit black solid stroke, used for box borders.
impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Writes a [`StrokeDefinition`] onto an SVG element.
///
/// Sets `stroke`, `stroke-opacity`, `stroke-width` and `stroke-linejoin`,
/// plus `stroke-dasharray` for dashed strokes.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linejoin", stroke.join().to_svg_value());

        match stroke.style().dasharray() {
            Some(dasharray) => element.set("stroke-dasharray", dasharray),
            None => element,
        }
    }};
}
