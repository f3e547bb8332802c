//! Finds the source location of `"Key": "value"` pairs.
//!
//! `serde_json` does not report positions for values that deserialize
//! successfully, so validation diagnostics locate the offending value by
//! scanning the raw text.

use crate::span::Span;

/// Returns the spans of every string value bound to `key` whose raw literal
/// content equals `value`, in source order.
///
/// The span covers the quoted literal. Values containing escape sequences are
/// compared in their escaped form.
pub(crate) fn string_values(source: &str, key: &str, value: &str) -> Vec<Span> {
    let needle = format!("\"{key}\"");
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut search_from = 0;

    while let Some(found) = source[search_from..].find(&needle) {
        let key_end = search_from + found + needle.len();
        search_from = key_end;

        let mut pos = skip_whitespace(bytes, key_end);
        if bytes.get(pos) != Some(&b':') {
            continue;
        }
        pos = skip_whitespace(bytes, pos + 1);
        if bytes.get(pos) != Some(&b'"') {
            continue;
        }

        let Some(literal_end) = closing_quote(bytes, pos + 1) else {
            break;
        };
        if &source[pos + 1..literal_end] == value {
            spans.push(Span::new(pos..literal_end + 1));
        }
        search_from = literal_end + 1;
    }

    spans
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

fn closing_quote(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'\\' => pos += 2,
            b'"' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}
