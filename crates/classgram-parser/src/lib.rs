//! # Classgram Parser
//!
//! Loads the JSON class diagram description into the
//! [`classgram_core::model::Diagram`] model.
//!
//! ## Usage
//!
//! ```
//! # use classgram_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "Diagram": {
//!             "Classes": [{ "ClassName": "Shape" }, { "ClassName": "Circle" }],
//!             "Relationships": [
//!                 { "RelationshipType": "Inherits", "SourceClass": "Circle", "TargetClass": "Shape" }
//!             ]
//!         }
//!     }"#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.classes().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod input;
mod locate;
mod lower;
mod span;

pub use error::ParseError;
pub use span::Span;

use log::debug;
use serde_json::error::Category;

use classgram_core::model::Diagram;

use error::{Diagnostic, ErrorCode};
use input::Document;

/// Parse a JSON class diagram description.
///
/// The pipeline has two steps:
///
/// 1. **Deserialize** - JSON syntax and structure errors (`E1xx`) stop here
///    with a single diagnostic pointing at the reported position
/// 2. **Lower** - every class is validated (`E2xx`) and all problems are
///    reported together
///
/// Missing or `null` fields fall back to defaults: empty member lists, the
/// `class` stereotype, unknown visibility and association relationships.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found.
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    debug!(bytes = source.len(); "Parsing diagram source");

    let document: Document =
        serde_json::from_str(source).map_err(|err| json_diagnostic(&err, source))?;

    lower::lower_document(document, source)
}

/// Translates a `serde_json` error into a diagnostic labeled at the reported
/// position.
fn json_diagnostic(err: &serde_json::Error, source: &str) -> Diagnostic {
    let (code, label) = match err.classify() {
        Category::Eof => (ErrorCode::E101, "input ends here"),
        Category::Data => (ErrorCode::E102, "unexpected value"),
        Category::Syntax | Category::Io => (ErrorCode::E100, "invalid JSON"),
    };

    // serde_json appends " at line L column C" to its message.
    let full = err.to_string();
    let message = full
        .rsplit_once(" at line ")
        .map_or(full.as_str(), |(message, _)| message)
        .to_string();

    let mut diag = Diagnostic::error(message).with_code(code);
    if err.line() > 0 {
        diag = diag.with_label(Span::from_line_column(source, err.line(), err.column()), label);
    }
    if code == ErrorCode::E102 {
        diag = diag.with_help(
            "classes and relationships must be lists of objects and flags must be booleans",
        );
    }
    diag
}
