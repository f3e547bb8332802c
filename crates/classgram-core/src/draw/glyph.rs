//! Terminal glyphs drawn at connector ends.
//!
//! A [`Glyph`] is defined purely by the two connector end points and a size:
//! the same inputs always give the same vertices. Angles follow SVG screen
//! coordinates (y grows downwards).

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, StrokeJoin},
    geometry::{Bounds, Point},
};

/// The outline a glyph is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphShape {
    /// Closed triangle with its tip on the box boundary.
    Triangle,
    /// Closed four-point diamond starting on the box boundary.
    Diamond,
    /// Two open strokes meeting at the tip.
    OpenArrow,
}

/// A positioned terminal glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    shape: GlyphShape,
    vertices: Vec<Point>,
    fill: Option<Color>,
    stroke: StrokeDefinition,
}

impl Glyph {
    /// Triangle with its tip at `tip` and its base toward `from`.
    ///
    /// The base vertices lie `size` away from the tip, 30° either side of the
    /// direction back to `from`. The triangle is filled white.
    ///
    /// ```
    /// # use classgram_core::draw::Glyph;
    /// # use classgram_core::geometry::Point;
    /// let glyph = Glyph::triangle(Point::new(100.0, 50.0), Point::new(0.0, 50.0), 10.0);
    /// assert_eq!(glyph.vertices().len(), 3);
    /// assert_eq!(glyph.vertices()[0], Point::new(100.0, 50.0));
    /// ```
    pub fn triangle(tip: Point, from: Point, size: f32) -> Self {
        let angle = tip.angle_to(from);
        Self {
            shape: GlyphShape::Triangle,
            vertices: vec![
                tip,
                tip.polar_offset(angle + FRAC_PI_6, size),
                tip.polar_offset(angle - FRAC_PI_6, size),
            ],
            fill: Some(Color::white()),
            stroke: StrokeDefinition::default(),
        }
    }

    /// Diamond starting at `start` and pointing toward `toward`.
    ///
    /// With `a` the angle from `start` to `toward`, the vertices are `start`,
    /// `start + size∠(a+45°)`, `start + 2·size∠a` and `start + size∠(a−45°)`.
    /// Filled diamonds are black, open ones white.
    pub fn diamond(start: Point, toward: Point, size: f32, filled: bool) -> Self {
        let angle = start.angle_to(toward);
        let fill = if filled {
            Color::default()
        } else {
            Color::white()
        };
        Self {
            shape: GlyphShape::Diamond,
            vertices: vec![
                start,
                start.polar_offset(angle + FRAC_PI_4, size),
                start.polar_offset(angle, size * 2.0),
                start.polar_offset(angle - FRAC_PI_4, size),
            ],
            fill: Some(fill),
            stroke: StrokeDefinition::default(),
        }
    }

    /// Open arrowhead at `tip`, its wings pointing back toward `from`.
    ///
    /// Vertices are `[wing, tip, wing]` so they can be drawn as one polyline.
    pub fn open_arrow(tip: Point, from: Point, size: f32) -> Self {
        let angle = tip.angle_to(from);
        Self {
            shape: GlyphShape::OpenArrow,
            vertices: vec![
                tip.polar_offset(angle + FRAC_PI_6, size),
                tip,
                tip.polar_offset(angle - FRAC_PI_6, size),
            ],
            fill: None,
            stroke: StrokeDefinition::default(),
        }
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn shape(&self) -> GlyphShape {
        self.shape
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn fill(&self) -> Option<&Color> {
        self.fill.as_ref()
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Smallest axis-aligned box containing every vertex.
    pub fn bounds(&self) -> Bounds {
        self.vertices
            .iter()
            .map(|v| Bounds::new_from_top_left(*v, Default::default()))
            .reduce(|acc, b| acc.merge(&b))
            .unwrap_or_default()
    }

    /// Renders the glyph on the [`RenderLayer::Glyph`] layer.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let points = self
            .vertices
            .iter()
            .map(|v| format!("{},{}", v.x(), v.y()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut stroke = self.stroke.clone();
        stroke.set_join(StrokeJoin::Miter);

        let node: Box<dyn svg::Node> = match self.fill {
            Some(fill) => {
                let polygon = svg_element::Polygon::new()
                    .set("points", points)
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha());
                Box::new(apply_stroke!(polygon, &stroke))
            }
            None => {
                let polyline = svg_element::Polyline::new()
                    .set("points", points)
                    .set("fill", "none");
                Box::new(apply_stroke!(polyline, &stroke))
            }
        };

        output.add_to_layer(RenderLayer::Glyph, node);
        output
    }
}
