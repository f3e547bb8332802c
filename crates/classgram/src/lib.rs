//! classgram - layout and rendering for UML class diagrams.
//!
//! A JSON description of classes and relationships is loaded into the
//! diagram model, measured, placed, routed and rendered to SVG.
//!
//! # Pipeline
//!
//! ```text
//! JSON ─parse→ Diagram ─structure→ ClassGraph ─measure→ sizes
//!      ─layout→ Placement ─route/glyph/label→ connectors
//!      ─canvas→ RenderedDiagram ─export→ SVG
//! ```

pub mod canvas;
pub mod config;
pub mod export;
pub mod glyph;
pub mod label;
pub mod layout;
pub mod measure;
pub mod rendered;
pub mod route;
pub mod structure;
pub mod view;

mod error;

pub use classgram_core::{color, draw, geometry, model};

pub use error::ClassgramError;
pub use rendered::{KindVisibility, RenderedDiagram};
pub use view::ClassDiagramView;

use log::{debug, info, trace};

use config::AppConfig;
use model::Diagram;

/// Builder for parsing and rendering class diagrams.
///
/// # Examples
///
/// ```rust
/// use classgram::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{"Diagram": {"Classes": [{"ClassName": "Shape"}]}}"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
/// assert!(svg.contains("Shape"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load a JSON diagram description into the diagram model.
    ///
    /// # Errors
    ///
    /// Returns `ClassgramError::Parse` carrying every diagnostic found.
    pub fn parse(&self, source: &str) -> Result<Diagram, ClassgramError> {
        info!("Parsing diagram");

        let diagram = classgram_parser::parse(source)
            .map_err(|err| ClassgramError::new_parse_error(err, source))?;

        debug!("Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Lay out and render a diagram with this builder's configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClassgramError` for invalid layout or style settings.
    pub fn render(&self, diagram: &Diagram) -> Result<RenderedDiagram, ClassgramError> {
        rendered::render(diagram, &self.config)
    }

    /// Render a diagram straight to SVG text at zoom 1 with every
    /// relationship visible.
    ///
    /// # Errors
    ///
    /// Returns `ClassgramError` for invalid layout or style settings.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, ClassgramError> {
        let svg = self.render(diagram)?.to_svg();
        info!("SVG rendered successfully");
        Ok(svg)
    }
}
