//! SVG output for rendered class diagrams.
//!
//! The document's `viewBox` is the canvas; its `width` and `height` are the
//! canvas scaled by the zoom factor. Content is grouped by render layer so
//! connectors sit above boxes and labels above connectors. Hidden relationship
//! kinds are left out entirely.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use classgram_core::{draw::LayeredOutput, geometry::Size};

use crate::{
    export::{self, Exporter},
    rendered::RenderedDiagram,
};

/// Writes rendered diagrams to an SVG file.
pub struct Svg {
    file_name: String,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_diagram(&mut self, diagram: &RenderedDiagram) -> Result<(), export::Error> {
        let doc = render_document(diagram);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// Builds the SVG document for the current view of `diagram`.
pub fn render_document(diagram: &RenderedDiagram) -> Document {
    let canvas = diagram.canvas_size();
    let display = canvas.scale(diagram.zoom());

    let doc = Document::new()
        .set(
            "viewBox",
            format!("0 0 {} {}", canvas.width(), canvas.height()),
        )
        .set("width", display.width())
        .set("height", display.height());

    let mut doc = add_background(doc, diagram, canvas);

    let mut output = LayeredOutput::new();
    for placed in diagram.boxes() {
        output.merge(placed.render_to_layers());
    }
    for connector in diagram.visible_connectors() {
        output.merge(connector.render_to_layers());
    }

    for node in output.render() {
        doc = doc.add(node);
    }
    doc
}

fn add_background(doc: Document, diagram: &RenderedDiagram, size: Size) -> Document {
    let Some(color) = diagram.background() else {
        return doc;
    };
    let bg = svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", size.width())
        .set("height", size.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha());
    doc.add(bg)
}
