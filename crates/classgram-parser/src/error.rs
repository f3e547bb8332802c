//! Diagnostics reported while loading a class diagram description.
//!
//! Every problem found in the input becomes a [`Diagnostic`] with an
//! [`ErrorCode`], a message, optional source [`Label`]s and optional help text.
//! Validation keeps going after the first problem, so a single [`ParseError`]
//! may carry several diagnostics.
//!
//! # Example
//!
//! ```
//! # use classgram_parser::error::{Diagnostic, ErrorCode};
//! # use classgram_parser::Span;
//! let diag = Diagnostic::error("class `Shape` is defined multiple times")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(120..127), "duplicate definition")
//!     .with_secondary_label(Span::new(30..37), "first defined here")
//!     .with_help("class names must be unique; the first definition is class #0");
//!
//! assert_eq!(diag.to_string(), "error[E201]: class `Shape` is defined multiple times");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
