//! Line style and terminal glyph per relationship kind.
//!
//! | Kind           | Line            | Glyph                   | At     |
//! |----------------|-----------------|-------------------------|--------|
//! | Inheritance    | solid           | open triangle           | target |
//! | Implementation | dashed          | open triangle           | target |
//! | Composition    | solid, width 2  | filled diamond          | source |
//! | Aggregation    | solid           | open diamond            | source |
//! | Association    | solid           | open arrow              | target |
//! | Dependency     | dashed          | open arrow              | target |

use classgram_core::{
    color::Color,
    draw::{Glyph, StrokeDefinition},
    model::RelationshipKind,
};

use crate::route::ConnectorEndpoints;

/// Length of glyph edges.
pub const ARROW_SIZE: f32 = 10.0;
/// Width of ordinary connector lines.
pub const LINE_WIDTH: f32 = 1.5;
/// Width of composition lines.
pub const COMPOSITION_LINE_WIDTH: f32 = 2.0;

/// Stroke of the connector line for `kind`.
pub fn line_stroke(kind: RelationshipKind) -> StrokeDefinition {
    match kind {
        RelationshipKind::Implementation | RelationshipKind::Dependency => {
            StrokeDefinition::dashed(Color::default(), LINE_WIDTH)
        }
        RelationshipKind::Composition => {
            StrokeDefinition::solid(Color::default(), COMPOSITION_LINE_WIDTH)
        }
        RelationshipKind::Inheritance
        | RelationshipKind::Aggregation
        | RelationshipKind::Association => StrokeDefinition::solid(Color::default(), LINE_WIDTH),
    }
}

/// The terminal glyph for `kind` on a connector with the given end points.
///
/// Glyph outlines are always solid, even on dashed connectors.
pub fn terminal_glyph(kind: RelationshipKind, endpoints: &ConnectorEndpoints) -> Glyph {
    let source = endpoints.source();
    let target = endpoints.target();
    let glyph = match kind {
        RelationshipKind::Inheritance | RelationshipKind::Implementation => {
            Glyph::triangle(target, source, ARROW_SIZE)
        }
        RelationshipKind::Composition => Glyph::diamond(source, target, ARROW_SIZE, true),
        RelationshipKind::Aggregation => Glyph::diamond(source, target, ARROW_SIZE, false),
        RelationshipKind::Association | RelationshipKind::Dependency => {
            Glyph::open_arrow(target, source, ARROW_SIZE)
        }
    };
    glyph.with_stroke(StrokeDefinition::solid(Color::default(), LINE_WIDTH))
}
