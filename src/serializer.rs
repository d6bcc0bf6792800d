//! Markup serialization from the owned tree
//!
//! Renders a node sequence back to an HTML string: kinds, attributes, text,
//! and child order are preserved exactly; no whitespace is added or removed.
//! Text payloads hold decoded characters (the parser resolves entities), so
//! markup-significant characters are re-escaped on the way out.

use std::fmt::Write;

use crate::dom::Node;

/// Serialize a node sequence to a markup string.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(text) => escape_text(out, text),
            // Comments are not rendered; the sanitizer drops them anyway
            Node::Comment(_) => {}
            Node::Element(el) => {
                let tag = el.kind.tag_name();
                out.push('<');
                out.push_str(tag);
                for (name, value) in &el.attrs {
                    // write! to String is infallible
                    let _ = write!(out, " {}=\"", name);
                    escape_attr(out, value);
                    out.push('"');
                }
                out.push('>');
                if !el.kind.is_void() {
                    write_nodes(out, &el.children);
                    let _ = write!(out, "</{}>", tag);
                }
            }
        }
    }
}

fn escape_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn escape_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}
