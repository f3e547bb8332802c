//! Drawing primitives for class diagrams.
//!
//! Everything that ends up in the SVG output is built from the types in this
//! module: strokes, text, class boxes and the terminal glyphs of connectors.
//! Drawables emit their SVG nodes into a [`LayeredOutput`] so that the final
//! document can be assembled in z-order regardless of the order in which the
//! elements were produced.

mod class_box;
mod glyph;
mod layer;
mod positioned;
mod stroke;
mod text;

pub use class_box::{BOX_PADDING, ClassBox, PLACEHOLDER_LINE};
pub use glyph::{Glyph, GlyphShape};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use stroke::{StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// An element that knows its own size and can render itself around a center
/// point.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element centered on `position`, grouped by layer.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The full size occupied by the element.
    fn size(&self) -> Size;
}
