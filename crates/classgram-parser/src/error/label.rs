//! Spans of the JSON input annotated with a short message.

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    /// Where the problem is.
    Primary,
    /// Context for the problem, e.g. an earlier definition.
    Secondary,
}

/// A message pointing at a span of the input.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    emphasis: Emphasis,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, Emphasis::Primary)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, Emphasis::Secondary)
    }

    fn new(span: Span, message: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            span,
            message: message.into(),
            emphasis,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.emphasis == Emphasis::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.emphasis == Emphasis::Secondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_emphasis() {
        let here = Label::primary(Span::new(40..47), "duplicate definition");
        let there = Label::secondary(Span::new(12..19), "first defined here");

        assert!(here.is_primary() && !here.is_secondary());
        assert!(there.is_secondary() && !there.is_primary());
    }

    #[test]
    fn test_label_keeps_span_and_message() {
        let label = Label::primary(Span::new(40..47), "duplicate definition");

        assert_eq!((label.span().start(), label.span().end()), (40, 47));
        assert_eq!(label.message(), "duplicate definition");
    }
}
