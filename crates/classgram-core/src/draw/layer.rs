//! Z-ordered layers for SVG output.
//!
//! Drawables add their nodes to a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]. Rendering the output sorts the nodes by layer and wraps
//! each layer in a `<g data-layer="...">` group, so connectors are always drawn
//! above class boxes and labels above everything else.
//!
//! # Example
//!
//! ```
//! # use classgram_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
//!
//! // The class box group comes out first even though it was added last.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("data-layer=\"content\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element as svg_element;

/// A boxed SVG node of any element type.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Label backgrounds and other fills behind text.
    Background,
    /// Class boxes and their compartment separators.
    Content,
    /// Connector lines between class boxes.
    Connector,
    /// Triangles, diamonds and arrowheads at connector ends.
    Glyph,
    /// All text.
    Text,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Glyph => "glyph",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to a layer. Nodes keep their insertion order within the
    /// layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other` to this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the output and returns one `<g>` group per non-empty layer,
    /// bottom layer first.
    pub fn render(self) -> Vec<SvgNode> {
        let mut groups: BTreeMap<RenderLayer, svg_element::Group> = BTreeMap::new();
        for (layer, node) in self.items {
            let group = groups
                .remove(&layer)
                .unwrap_or_else(|| svg_element::Group::new().set("data-layer", layer.name()));
            groups.insert(layer, group.add(node));
        }

        groups
            .into_values()
            .map(|group| Box::new(group) as SvgNode)
            .collect()
    }
}
