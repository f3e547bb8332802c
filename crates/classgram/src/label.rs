//! Placement of relationship names and cardinalities.
//!
//! All labels share one style: 10pt text on an opaque white background with
//! 2 units of padding. Positions are top-left corners of the padded label.

use std::f32::consts::FRAC_PI_2;

use classgram_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, Text, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
    model::Relationship,
};

use crate::route::ConnectorEndpoints;

/// Font size of connector labels, in points.
pub const LABEL_FONT_SIZE: u16 = 10;
/// Padding around connector label text.
pub const LABEL_PADDING: f32 = 2.0;
/// Distance of the name label's top edge above the connector midpoint.
pub const NAME_OFFSET: f32 = 15.0;
/// Perpendicular distance of the source cardinality anchor.
pub const SOURCE_CARDINALITY_OFFSET: f32 = 10.0;
/// Perpendicular distance of the target cardinality anchor. Larger than the
/// source offset to clear the target glyph.
pub const TARGET_CARDINALITY_OFFSET: f32 = 20.0;
/// Distance the cardinality label is lifted above its anchor.
const CARDINALITY_LIFT: f32 = 10.0;

/// What a label annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Name,
    SourceCardinality,
    TargetCardinality,
}

/// A positioned label of one connector.
#[derive(Debug, Clone)]
pub struct ConnectorLabel {
    text: String,
    role: LabelRole,
    top_left: Point,
    size: Size,
    definition: TextDefinition,
}

impl ConnectorLabel {
    fn new(text: &str, role: LabelRole, definition: &TextDefinition) -> Self {
        let size = Text::new(definition, text).calculate_size();
        Self {
            text: text.to_string(),
            role,
            top_left: Point::default(),
            size,
            definition: definition.clone(),
        }
    }

    fn with_top_left(mut self, top_left: Point) -> Self {
        self.top_left = top_left;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.top_left, self.size)
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        Text::new(&self.definition, &self.text).render_to_layers(self.bounds().center())
    }
}

/// The shared text style of connector labels.
pub fn label_definition() -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_size(LABEL_FONT_SIZE);
    definition.set_background_color(Some(Color::white()));
    definition.set_padding(Insets::uniform(LABEL_PADDING));
    definition
}

/// Places the name and cardinality labels of `relationship` along its
/// connector. Absent or blank texts produce no label.
pub fn place_labels(
    relationship: &Relationship,
    endpoints: &ConnectorEndpoints,
) -> Vec<ConnectorLabel> {
    let definition = label_definition();
    let mut labels = Vec::new();

    if let Some(name) = non_blank(relationship.name()) {
        let label = ConnectorLabel::new(name, LabelRole::Name, &definition);
        let mid = endpoints.midpoint();
        let top_left = Point::new(mid.x() - label.size().width() / 2.0, mid.y() - NAME_OFFSET);
        labels.push(label.with_top_left(top_left));
    }

    let source = endpoints.source();
    let target = endpoints.target();

    if let Some(text) = non_blank(relationship.source_cardinality()) {
        let top_left = cardinality_top_left(source, target, SOURCE_CARDINALITY_OFFSET);
        labels.push(
            ConnectorLabel::new(text, LabelRole::SourceCardinality, &definition)
                .with_top_left(top_left),
        );
    }

    if let Some(text) = non_blank(relationship.target_cardinality()) {
        let top_left = cardinality_top_left(target, source, TARGET_CARDINALITY_OFFSET);
        labels.push(
            ConnectorLabel::new(text, LabelRole::TargetCardinality, &definition)
                .with_top_left(top_left),
        );
    }

    labels
}

/// Top-left corner of a cardinality label at `end`, offset to the left of the
/// direction toward `other`.
fn cardinality_top_left(end: Point, other: Point, distance: f32) -> Point {
    let angle = end.angle_to(other);
    let anchor = end.polar_offset(angle + FRAC_PI_2, distance);
    Point::new(anchor.x(), anchor.y() - CARDINALITY_LIFT)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
