//! HTML5 parsing into the owned tree
//!
//! Parsing uses Mozilla's html5ever, which implements the WHATWG HTML5 parsing
//! algorithm: malformed markup is recovered the same way a browser would
//! recover it, so the sanitizer downstream always receives *some* tree. The
//! reference-counted DOM html5ever produces is immediately adapted into the
//! owned [`Fragment`] model; the rest of the engine never touches `RcDom`.
//!
//! # Fragment semantics
//!
//! Input is treated as body content: the document is parsed in full and the
//! children of the resulting `<body>` element become the fragment's top-level
//! nodes. Anything the HTML5 algorithm moves into `<head>` (bare `<style>`,
//! `<title>`, metadata tags) therefore never reaches the sanitizer; that is
//! acceptable, since none of it is allow-listed content anyway.
//!
//! # Configuration
//!
//! - **Scripting**: disabled (scripts are parsed as inert text, never run)
//! - **External entities**: not a concept in HTML5, so XXE is impossible by
//!   construction
//! - **Error recovery**: parse errors are recovered, not reported
//!
//! # Examples
//!
//! ```rust
//! use richtext_sanitizer::parser::parse_fragment;
//!
//! let fragment = parse_fragment("<p>Hello <em>world</em></p>");
//! assert_eq!(fragment.nodes.len(), 1);
//!
//! // Malformed markup still yields a tree
//! let fragment = parse_fragment("<p>unclosed <b>tags");
//! assert!(!fragment.nodes.is_empty());
//! ```

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::dom::{Element, ElementKind, Fragment, Node};
use crate::error::SanitizeError;

/// Parse a markup string into an owned [`Fragment`].
///
/// This never fails: html5ever is total over UTF-8 input, and empty input
/// simply yields an empty fragment.
pub fn parse_fragment(markup: &str) -> Fragment {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            // With scripting off, noscript content is tokenized as markup
            // rather than raw text; either way it is never executed.
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(markup);
    Fragment::new(body_children(&dom))
}

/// Parse markup bytes into an owned [`Fragment`].
///
/// # Errors
///
/// Returns [`SanitizeError::ParseError`] if the bytes are not valid UTF-8.
/// Callers holding content in a different encoding must transcode before
/// handing it to the engine.
pub fn parse_fragment_bytes(markup: &[u8]) -> Result<Fragment, SanitizeError> {
    let markup = std::str::from_utf8(markup).map_err(|e| {
        SanitizeError::ParseError(format!(
            "input is not valid UTF-8 at byte position {}: {}",
            e.valid_up_to(),
            e
        ))
    })?;
    Ok(parse_fragment(markup))
}

/// Locate the parsed `<body>` and adapt its children.
///
/// html5ever always synthesizes `html > head + body` for document parses; the
/// document-root fallback only matters if that ever changes.
fn body_children(dom: &RcDom) -> Vec<Node> {
    find_child_element(&dom.document, "html")
        .and_then(|html| find_child_element(&html, "body"))
        .map(|body| adapt_children(&body))
        .unwrap_or_else(|| adapt_children(&dom.document))
}

fn find_child_element(handle: &Handle, tag: &str) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| {
            matches!(&child.data, NodeData::Element { name, .. } if name.local.as_ref() == tag)
        })
        .cloned()
}

fn adapt_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(adapt_node)
        .collect()
}

/// Adapt one rcdom node into the owned model.
///
/// Elements and text map directly; comments become [`Node::Comment`] so the
/// sanitizer can drop them explicitly. Doctypes and processing instructions
/// carry no user content and are dropped here.
fn adapt_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(ElementKind::from_tag(name.local.as_ref()));
            // set_attr collapses duplicate names, last write wins
            for attr in attrs.borrow().iter() {
                element.set_attr(attr.name.local.as_ref(), &attr.value);
            }
            element.children = adapt_children(handle);
            Some(Node::Element(element))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}
