//! Byte ranges into the JSON source, used to anchor diagnostics.

use std::ops::Range;

/// A half-open byte range `start..end` in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a span from a 1-based line and column as reported by
    /// `serde_json`.
    ///
    /// The span covers the single byte at that position, or is empty when the
    /// position is at or past the end of the source.
    ///
    /// ```
    /// # use classgram_parser::Span;
    /// let source = "{\n  \"Diagram\": ?\n}";
    /// let span = Span::from_line_column(source, 2, 14);
    /// assert_eq!(&source[span.start()..span.end()], "?");
    /// ```
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let start = (line_start + column.saturating_sub(1)).min(source.len());
        let end = if start < source.len() { start + 1 } else { start };
        Self::new(start..end)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
