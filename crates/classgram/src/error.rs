//! Error types for classgram operations.
//!
//! [`ClassgramError`] wraps every failure that can stop a render: reading
//! input, loading the diagram description, placing boxes and writing SVG.

use std::io;

use thiserror::Error;

use classgram_parser::ParseError;

/// The main error type for classgram operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so hosts can render labelled snippets.
#[derive(Debug, Error)]
pub enum ClassgramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ClassgramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ClassgramError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Returns the diagnostics of a `Parse` error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { err, .. } => Some(err),
            _ => None,
        }
    }
}
