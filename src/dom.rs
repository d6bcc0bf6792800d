//! Owned document-tree model
//!
//! The sanitization passes operate on an explicit owned tree rather than the
//! reference-counted DOM produced by html5ever. Building a fresh child vector
//! per element during the walk avoids mutating a live node list while
//! iterating it, which is where sanitizers in host-DOM environments
//! traditionally go wrong.
//!
//! # Node model
//!
//! A [`Node`] is one of:
//! - [`Node::Element`]: a recognized or unknown element kind, an ordered
//!   attribute list with unique names, and an ordered child sequence
//! - [`Node::Text`]: an immutable text payload, no children
//! - [`Node::Comment`]: any non-element, non-text content the parser kept;
//!   always dropped by sanitization
//!
//! Element kinds are a closed enum ([`ElementKind`]) plus `Unknown(String)`,
//! so every match over kinds is forced to handle the unrecognized case
//! explicitly instead of falling through a string comparison.

use std::fmt;

/// A recognized element kind, or `Unknown` for anything outside the closed set.
///
/// Tag names are matched case-sensitively against the lowercase local names
/// html5ever produces for HTML content. The legacy `strike` tag maps to
/// [`ElementKind::S`], normalizing it to the semantic strikethrough kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    // Headings
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    // Block structure
    P,
    Br,
    Hr,
    Blockquote,
    Pre,
    Figure,
    Figcaption,
    Div,
    // Lists
    Ul,
    Ol,
    Li,
    // Inline semantics
    A,
    Strong,
    Em,
    B,
    I,
    U,
    S,
    Del,
    Code,
    Span,
    // Tables
    Table,
    Caption,
    Colgroup,
    Col,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
    // Media
    Img,
    Iframe,
    // Executable / interactive kinds, recognized so the policy can strip them
    Script,
    Style,
    Noscript,
    Object,
    Embed,
    Form,
    Input,
    Button,
    /// Any tag name outside the recognized set. Carries the original name so
    /// an unsanitized tree can still be serialized faithfully.
    Unknown(String),
}

impl ElementKind {
    /// Map a lowercase tag name to its kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "h5" => Self::H5,
            "h6" => Self::H6,
            "p" => Self::P,
            "br" => Self::Br,
            "hr" => Self::Hr,
            "blockquote" => Self::Blockquote,
            "pre" => Self::Pre,
            "figure" => Self::Figure,
            "figcaption" => Self::Figcaption,
            "div" => Self::Div,
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            "a" => Self::A,
            "strong" => Self::Strong,
            "em" => Self::Em,
            "b" => Self::B,
            "i" => Self::I,
            "u" => Self::U,
            "s" | "strike" => Self::S,
            "del" => Self::Del,
            "code" => Self::Code,
            "span" => Self::Span,
            "table" => Self::Table,
            "caption" => Self::Caption,
            "colgroup" => Self::Colgroup,
            "col" => Self::Col,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "tfoot" => Self::Tfoot,
            "tr" => Self::Tr,
            "th" => Self::Th,
            "td" => Self::Td,
            "img" => Self::Img,
            "iframe" => Self::Iframe,
            "script" => Self::Script,
            "style" => Self::Style,
            "noscript" => Self::Noscript,
            "object" => Self::Object,
            "embed" => Self::Embed,
            "form" => Self::Form,
            "input" => Self::Input,
            "button" => Self::Button,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The tag name used when serializing this kind.
    pub fn tag_name(&self) -> &str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
            Self::Br => "br",
            Self::Hr => "hr",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
            Self::Figure => "figure",
            Self::Figcaption => "figcaption",
            Self::Div => "div",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::A => "a",
            Self::Strong => "strong",
            Self::Em => "em",
            Self::B => "b",
            Self::I => "i",
            Self::U => "u",
            Self::S => "s",
            Self::Del => "del",
            Self::Code => "code",
            Self::Span => "span",
            Self::Table => "table",
            Self::Caption => "caption",
            Self::Colgroup => "colgroup",
            Self::Col => "col",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::Img => "img",
            Self::Iframe => "iframe",
            Self::Script => "script",
            Self::Style => "style",
            Self::Noscript => "noscript",
            Self::Object => "object",
            Self::Embed => "embed",
            Self::Form => "form",
            Self::Input => "input",
            Self::Button => "button",
            Self::Unknown(name) => name,
        }
    }

    /// Void elements serialize without children or a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Self::Br | Self::Hr | Self::Img | Self::Col | Self::Input | Self::Embed
        )
    }

    /// Whether this is one of the six heading ranks.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Self::H1 | Self::H2 | Self::H3 | Self::H4 | Self::H5 | Self::H6
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// An element node: kind, ordered unique-name attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    /// Name/value pairs in document order. Names are unique; [`Element::set_attr`]
    /// overwrites in place rather than appending a duplicate.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, overwriting any existing value under the same name
    /// (last write wins, position preserved).
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute by name, if present.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }
}

/// A single node in the owned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Comments and any other non-element, non-text parser output. Never
    /// survives sanitization.
    Comment(String),
}

/// The root of a parsed markup fragment: the ordered top-level nodes.
///
/// A `Fragment` is constructed fresh per call by [`crate::parser::parse_fragment`],
/// mutated in place by the sanitization and normalization passes, then
/// serialized or reduced to text. Nothing is shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Serialize the fragment back to a markup string.
    pub fn to_html(&self) -> String {
        crate::serializer::to_html(&self.nodes)
    }
}
