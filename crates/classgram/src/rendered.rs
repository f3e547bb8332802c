//! The output of a render pass and the view state layered on top of it.
//!
//! [`render`] runs every stage once and returns a [`RenderedDiagram`].
//! Zooming and hiding relationship kinds afterwards only changes how the
//! diagram is exported; box geometry and connectors stay as computed.

use std::collections::BTreeSet;

use log::{debug, info, trace, warn};
use svg::node::element as svg_element;

use classgram_core::{
    apply_stroke,
    color::Color,
    draw::{ClassBox, Drawable, Glyph, LayeredOutput, PositionedDrawable, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
    model::{Diagram, RelationshipKind},
};

use crate::{
    canvas::{CANVAS_MARGIN, canvas_size},
    config::AppConfig,
    error::ClassgramError,
    export,
    glyph::{line_stroke, terminal_glyph},
    label::{ConnectorLabel, place_labels},
    layout::{BoxGeometry, EngineBuilder},
    measure::measure,
    route::{ConnectorEndpoints, route},
    structure::{ClassGraph, ClassIndex},
};

/// Factor applied by one zoom step.
pub const ZOOM_STEP: f32 = 1.2;

/// Which relationship kinds are shown. All kinds are visible by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindVisibility {
    hidden: BTreeSet<RelationshipKind>,
}

impl KindVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, kind: RelationshipKind) -> bool {
        !self.hidden.contains(&kind)
    }

    pub fn set(&mut self, kind: RelationshipKind, visible: bool) {
        if visible {
            self.hidden.remove(&kind);
        } else {
            self.hidden.insert(kind);
        }
    }

    /// Hidden kinds in declaration order.
    pub fn hidden_kinds(&self) -> impl Iterator<Item = RelationshipKind> + '_ {
        self.hidden.iter().copied()
    }
}

impl FromIterator<RelationshipKind> for KindVisibility {
    /// Collects the kinds to hide.
    fn from_iter<I: IntoIterator<Item = RelationshipKind>>(iter: I) -> Self {
        Self {
            hidden: iter.into_iter().collect(),
        }
    }
}

/// A measured class box at its final position.
#[derive(Debug, Clone)]
pub struct PlacedBox {
    index: ClassIndex,
    name: String,
    geometry: BoxGeometry,
    drawable: PositionedDrawable<ClassBox>,
}

impl PlacedBox {
    fn new(index: ClassIndex, name: &str, position: Point, class_box: ClassBox) -> Self {
        let geometry = BoxGeometry::new(position, class_box.size());
        Self {
            index,
            name: name.to_string(),
            geometry,
            drawable: PositionedDrawable::new(class_box).with_top_left(position),
        }
    }

    pub fn index(&self) -> ClassIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    pub fn class_box(&self) -> &ClassBox {
        self.drawable.inner()
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers()
    }
}

/// A routed relationship with its line style, glyph and labels.
#[derive(Debug, Clone)]
pub struct Connector {
    relationship_index: usize,
    kind: RelationshipKind,
    source: ClassIndex,
    target: ClassIndex,
    endpoints: ConnectorEndpoints,
    stroke: StrokeDefinition,
    glyph: Glyph,
    labels: Vec<ConnectorLabel>,
}

impl Connector {
    /// Position of the relationship in the model's relationship list.
    pub fn relationship_index(&self) -> usize {
        self.relationship_index
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn source(&self) -> ClassIndex {
        self.source
    }

    pub fn target(&self) -> ClassIndex {
        self.target
    }

    pub fn endpoints(&self) -> &ConnectorEndpoints {
        &self.endpoints
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    pub fn labels(&self) -> &[ConnectorLabel] {
        &self.labels
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let source = self.endpoints.source();
        let target = self.endpoints.target();

        let line = svg_element::Line::new()
            .set("x1", source.x())
            .set("y1", source.y())
            .set("x2", target.x())
            .set("y2", target.y())
            .set("data-kind", self.kind.name());
        output.add_to_layer(RenderLayer::Connector, Box::new(apply_stroke!(line, &self.stroke)));

        output.merge(self.glyph.render_to_layers());
        for label in &self.labels {
            output.merge(label.render_to_layers());
        }
        output
    }
}

/// A fully laid out class diagram plus its view state.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    name: Option<String>,
    boxes: Vec<PlacedBox>,
    connectors: Vec<Connector>,
    canvas: Size,
    background: Option<Color>,
    zoom: f32,
    visibility: KindVisibility,
}

impl RenderedDiagram {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Placed boxes in model order.
    pub fn boxes(&self) -> &[PlacedBox] {
        &self.boxes
    }

    /// Looks up a placed box by class name.
    pub fn box_named(&self, name: &str) -> Option<&PlacedBox> {
        self.boxes.iter().find(|b| b.name() == name)
    }

    /// All connectors, hidden kinds included.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Connectors whose kind is currently visible.
    pub fn visible_connectors(&self) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors
            .iter()
            .filter(|c| self.visibility.is_visible(c.kind()))
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn background(&self) -> Option<&Color> {
        self.background.as_ref()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= ZOOM_STEP;
    }

    /// Sets the zoom factor. Non-positive or non-finite factors are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            warn!(zoom; "Ignoring invalid zoom factor");
        }
    }

    /// Zooms so the whole canvas fits into `viewport`.
    ///
    /// Leaves the zoom unchanged when either size is degenerate.
    pub fn zoom_to_fit(&mut self, viewport: Size) {
        if viewport.is_degenerate() || self.canvas.is_degenerate() {
            debug!("Skipping zoom to fit for degenerate size");
            return;
        }
        self.zoom = (viewport.width() / self.canvas.width())
            .min(viewport.height() / self.canvas.height());
    }

    pub fn visibility(&self) -> &KindVisibility {
        &self.visibility
    }

    pub fn set_visibility(&mut self, visibility: KindVisibility) {
        self.visibility = visibility;
    }

    pub fn set_kind_visible(&mut self, kind: RelationshipKind, visible: bool) {
        self.visibility.set(kind, visible);
    }

    pub fn is_kind_visible(&self, kind: RelationshipKind) -> bool {
        self.visibility.is_visible(kind)
    }

    /// Renders the current view to SVG text.
    pub fn to_svg(&self) -> String {
        export::svg::render_document(self).to_string()
    }

    /// Writes the current view as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns `ClassgramError::Export` if the file cannot be written.
    pub fn write_svg(&self, file_name: &str) -> Result<(), ClassgramError> {
        use export::Exporter;

        let mut exporter = export::svg::Svg::new(file_name);
        exporter.export_diagram(self)?;
        Ok(())
    }
}

/// Runs the layout and rendering pipeline over `diagram`.
///
/// # Errors
///
/// Returns `ClassgramError::Layout` for unusable layout settings and
/// `ClassgramError::Export` for style colors that cannot be parsed.
pub fn render(diagram: &Diagram, config: &AppConfig) -> Result<RenderedDiagram, ClassgramError> {
    let layout_config = config.layout();
    layout_config.validate().map_err(ClassgramError::Layout)?;
    let background = config
        .style()
        .background_color()
        .map_err(export::Error::Render)?;
    let box_fill = config.style().box_fill_color().map_err(export::Error::Render)?;

    info!(
        classes = diagram.classes().len(),
        relationships = diagram.relationships().len();
        "Rendering diagram"
    );
    let graph = ClassGraph::from_diagram(diagram);

    // Shadowed duplicates are not measured, so they are never placed.
    let mut class_boxes: Vec<Option<ClassBox>> = graph
        .classes()
        .map(|(idx, class)| {
            (graph.index_of(class.name()) == Some(idx))
                .then(|| measure(class).with_fill_color(Some(box_fill)))
        })
        .collect();
    let sizes: Vec<Option<Size>> = class_boxes
        .iter()
        .map(|b| b.as_ref().map(|class_box| class_box.size()))
        .collect();
    debug!(measured = sizes.iter().flatten().count(); "Class boxes measured");

    let mut engines = EngineBuilder::new()
        .with_spacing(layout_config.spacing())
        .with_available_size(layout_config.available_size());
    let placement = engines.place(layout_config.engine(), &graph, &sizes)?;

    let mut boxes = Vec::with_capacity(placement.len());
    let mut geometries: Vec<Option<BoxGeometry>> = vec![None; graph.len()];
    for (idx, class) in graph.classes() {
        let Some(&position) = placement.get(&idx) else {
            continue;
        };
        let Some(class_box) = class_boxes[idx.index()].take() else {
            return Err(ClassgramError::Layout(format!(
                "class `{}` was placed without a size",
                class.name()
            )));
        };
        let placed = PlacedBox::new(idx, class.name(), position, class_box);
        geometries[idx.index()] = Some(*placed.geometry());
        boxes.push(placed);
    }

    let mut connectors = Vec::with_capacity(graph.relationship_count());
    for resolved in graph.relationships() {
        let (Some(source), Some(target)) = (
            geometries[resolved.source().index()],
            geometries[resolved.target().index()],
        ) else {
            trace!(index = resolved.index(); "Skipping connector to unplaced class");
            continue;
        };

        let relationship = resolved.relationship();
        let kind = relationship.kind();
        let endpoints = route(&source, &target);
        connectors.push(Connector {
            relationship_index: resolved.index(),
            kind,
            source: resolved.source(),
            target: resolved.target(),
            endpoints,
            stroke: line_stroke(kind),
            glyph: terminal_glyph(kind, &endpoints),
            labels: place_labels(relationship, &endpoints),
        });
    }
    debug!(connectors = connectors.len(); "Connectors routed");

    let canvas = canvas_size(
        boxes.iter().map(PlacedBox::geometry),
        layout_config.available_size(),
        CANVAS_MARGIN,
    );
    info!(width = canvas.width(), height = canvas.height(); "Diagram rendered");

    Ok(RenderedDiagram {
        name: diagram.name().map(str::to_string),
        boxes,
        connectors,
        canvas,
        background,
        zoom: 1.0,
        visibility: KindVisibility::default(),
    })
}
