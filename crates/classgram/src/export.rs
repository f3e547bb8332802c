//! Export of rendered class diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON source
//!     ↓ parse
//! Diagram model
//!     ↓ structure, measure, layout, route
//! RenderedDiagram
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`ClassgramError::Export`] at the crate boundary.
//!
//! [`ClassgramError::Export`]: crate::ClassgramError::Export

/// SVG export backend.
pub mod svg;

use crate::rendered::RenderedDiagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports the current view of a rendered diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &RenderedDiagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
