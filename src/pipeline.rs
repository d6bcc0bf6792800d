//! String-level public operations
//!
//! Thin composition of parse → tree passes → serialize, for callers that deal
//! in markup strings rather than trees. Each call parses a fresh tree, owns it
//! exclusively for the duration of the call, and discards it afterwards, so
//! all operations here are safe to invoke concurrently from independent
//! threads.

use crate::error::SanitizeError;
use crate::parser::parse_fragment;
use crate::{normalizer, sanitizer, text};

/// Sanitize untrusted markup: strip, unwrap, and filter per the policy tables.
pub fn sanitize(raw_markup: &str) -> String {
    let mut fragment = parse_fragment(raw_markup);
    sanitizer::sanitize_fragment(&mut fragment);
    fragment.to_html()
}

/// Enforce a single top-level heading, demoting every later `h1` to `h2`.
pub fn normalize_headings(markup: &str) -> String {
    let mut fragment = parse_fragment(markup);
    normalizer::normalize_headings(&mut fragment);
    fragment.to_html()
}

/// The composed pipeline for all untrusted input: sanitize, then normalize
/// headings, over a single parse.
pub fn process_pasted(raw_markup: &str) -> String {
    let mut fragment = parse_fragment(raw_markup);
    sanitizer::sanitize_fragment(&mut fragment);
    normalizer::normalize_headings(&mut fragment);
    fragment.to_html()
}

/// The plain text of the markup: text node payloads in document order.
pub fn extract_text(markup: &str) -> String {
    text::extract_text(&parse_fragment(markup))
}

/// A length-bounded plain-text excerpt of the markup.
///
/// # Errors
///
/// Returns [`SanitizeError::InvalidArgument`] when `max_length` is zero.
pub fn excerpt(markup: &str, max_length: usize) -> Result<String, SanitizeError> {
    text::excerpt(&parse_fragment(markup), max_length)
}
