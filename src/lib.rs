//! Rich-Text Sanitizer - whitelist-based markup sanitization engine
//!
//! This library accepts arbitrary markup produced by a rich-text editor or
//! pasted from external sources and returns markup that is safe to store and
//! re-render to third-party visitors: no executable code, no disallowed
//! elements or attributes, while preserving the semantic structure (headings,
//! lists, tables, links, images, trusted embeds) needed for display and SEO.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `dom`: owned document-tree model (nodes, element kinds, fragments)
//! - `parser`: HTML5 parsing using html5ever, adapted into the owned tree
//! - `policy`: allow-list tables classifying every element kind and attribute
//! - `sanitizer`: the tree walk applying keep/unwrap/strip, attribute
//!   filtering, and embed validation
//! - `normalizer`: single-top-level-heading enforcement
//! - `text`: plain-text extraction and bounded excerpts
//! - `serializer`: rendering the owned tree back to markup
//! - `pipeline`: the string-to-string operations composing the above
//! - `error`: error types
//!
//! # Security model
//!
//! Every element kind is explicitly classified: allow-listed kinds survive
//! with filtered attributes, a fixed set of executable/interactive kinds is
//! deleted with its whole subtree, and everything else is unwrapped (children
//! kept and re-evaluated). There is no fallback that silently permits
//! anything. See the `policy` module for the full tables.
//!
//! # Example
//!
//! ```rust
//! use richtext_sanitizer::process_pasted;
//!
//! let raw = r#"<h1>Post</h1><script>alert(1)</script><p onclick="x()">Body</p>"#;
//! assert_eq!(process_pasted(raw), "<h1>Post</h1><p>Body</p>");
//! ```

// Module declarations
pub mod dom;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod policy;
pub mod sanitizer;
pub mod serializer;
pub mod text;

// Re-export the public operations and main types for convenience
pub use dom::{Element, ElementKind, Fragment, Node};
pub use error::SanitizeError;
pub use pipeline::{excerpt, extract_text, normalize_headings, process_pasted, sanitize};
