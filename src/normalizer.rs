//! Heading normalization
//!
//! Downstream rendering and SEO assume exactly one top-level heading per
//! document. This pass runs after sanitization and demotes every `h1` after
//! the first (in document order, depth-first pre-order) to `h2`, keeping
//! attributes, children, and tree position untouched.

use log::trace;

use crate::dom::{ElementKind, Fragment, Node};

/// Demote every top-level heading after the first to the next rank down.
pub fn normalize_headings(fragment: &mut Fragment) {
    let mut seen_top_level = false;
    walk(&mut fragment.nodes, &mut seen_top_level);
}

fn walk(nodes: &mut [Node], seen_top_level: &mut bool) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.kind == ElementKind::H1 {
                if *seen_top_level {
                    trace!("demoting extra top-level heading to h2");
                    element.kind = ElementKind::H2;
                } else {
                    *seen_top_level = true;
                }
            }
            walk(&mut element.children, seen_top_level);
        }
    }
}
