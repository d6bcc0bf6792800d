//! Plain-text reductions over the owned tree
//!
//! Pure read-only passes: [`extract_text`] concatenates text payloads in
//! document order, ignoring element structure entirely; [`excerpt`] bounds
//! that text for previews and search indexing. Neither adds separators, so
//! adjacent blocks run together unless the source text already contains
//! whitespace.

use crate::dom::{Fragment, Node};
use crate::error::SanitizeError;

/// Marker appended when an excerpt is truncated.
pub const ELLIPSIS: char = '\u{2026}';

/// Concatenate all text node payloads in depth-first document order.
pub fn extract_text(fragment: &Fragment) -> String {
    let mut out = String::new();
    collect_text(&fragment.nodes, &mut out);
    out
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// A length-bounded excerpt of the fragment's plain text.
///
/// Returns the full text when it fits within `max_length` characters;
/// otherwise the first `max_length` characters with trailing whitespace
/// trimmed and [`ELLIPSIS`] appended. Lengths are counted in characters
/// (Unicode scalar values), never bytes, so truncation cannot split a
/// multi-byte character.
///
/// # Errors
///
/// Returns [`SanitizeError::InvalidArgument`] when `max_length` is zero.
/// Failing fast here catches caller bugs instead of silently producing an
/// empty excerpt.
pub fn excerpt(fragment: &Fragment, max_length: usize) -> Result<String, SanitizeError> {
    if max_length == 0 {
        return Err(SanitizeError::InvalidArgument(
            "excerpt max_length must be greater than zero".to_string(),
        ));
    }

    let text = extract_text(fragment);
    if text.chars().count() <= max_length {
        return Ok(text);
    }

    let mut truncated: String = text.chars().take(max_length).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push(ELLIPSIS);
    Ok(truncated)
}
