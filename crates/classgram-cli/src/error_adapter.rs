//! Bridges [`ClassgramError`] to miette diagnostics for terminal output.
//!
//! A [`classgram_parser::ParseError`] may hold several diagnostics (every
//! invalid class is reported); each one becomes its own [`Reportable`] so the
//! CLI prints a labelled snippet per problem.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use classgram::ClassgramError;
use classgram_parser::{Span, error::Diagnostic};

/// A single parser diagnostic together with the JSON source it points into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Wraps the [`ClassgramError`] variants that carry no source location.
pub struct ErrorAdapter<'a>(pub &'a ClassgramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            ClassgramError::Io(_) => "classgram::io",
            ClassgramError::Parse { .. } => return None,
            ClassgramError::Layout(_) => "classgram::layout",
            ClassgramError::Export(_) => "classgram::export",
        };
        Some(Box::new(code))
    }
}

/// Either a located parser diagnostic or a plain error.
#[derive(Debug)]
pub enum Reportable<'a> {
    Diagnostic(DiagnosticAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits a [`ClassgramError`] into the reports the CLI prints.
///
/// A `Parse` error yields one [`Reportable`] per diagnostic; every other
/// variant yields exactly one.
pub fn to_reportables(err: &ClassgramError) -> Vec<Reportable<'_>> {
    match err {
        ClassgramError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::new(diag, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use classgram_parser::{
        ParseError,
        error::{Diagnostic, ErrorCode},
    };

    use super::*;

    fn parse_failure(source: &str) -> ClassgramError {
        let err = classgram_parser::parse(source).unwrap_err();
        ClassgramError::new_parse_error(err, source)
    }

    #[test]
    fn test_every_invalid_class_is_reported() {
        let err = parse_failure(
            r#"{ "Diagram": { "Classes": [
                { "ClassName": "" },
                { "ClassName": "A" },
                { "ClassName": "A" }
            ] } }"#,
        );

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        for reportable in &reportables {
            assert!(matches!(reportable, Reportable::Diagnostic(_)));
            assert!(reportable.code().is_some());
        }
    }

    #[test]
    fn test_diagnostic_code_and_help() {
        let diag = Diagnostic::error("class `Shape` is defined multiple times")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(0..5), "duplicate definition")
            .with_help("class names must be unique");
        let adapter = DiagnosticAdapter::new(&diag, "Shape Shape");

        assert_eq!(adapter.to_string(), "class `Shape` is defined multiple times");
        assert_eq!(adapter.code().unwrap().to_string(), "E201");
        assert_eq!(adapter.help().unwrap().to_string(), "class names must be unique");
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("class `Shape` is defined multiple times")
            .with_label(Span::new(6..11), "duplicate definition")
            .with_secondary_label(Span::new(0..5), "first defined here");
        let adapter = DiagnosticAdapter::new(&diag, "Shape Shape");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 6);
        assert_eq!(labels[1].label(), Some("first defined here"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_diagnostic_without_labels() {
        let diag = Diagnostic::error("document has no `Diagram` object");
        let adapter = DiagnosticAdapter::new(&diag, "{}");
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_non_parse_errors() {
        let err = ClassgramError::Layout("bad sizes".to_string());
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "Layout error: bad sizes");
        assert_eq!(reportables[0].code().unwrap().to_string(), "classgram::layout");
    }

    #[test]
    fn test_parse_error_from_single_diagnostic() {
        let err = ClassgramError::new_parse_error(
            ParseError::from(Diagnostic::error("invalid JSON").with_code(ErrorCode::E100)),
            "{",
        );
        assert_eq!(to_reportables(&err).len(), 1);
    }
}
