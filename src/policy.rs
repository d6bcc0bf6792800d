//! Sanitization policy tables
//!
//! This module is the single place where element kinds and attribute names are
//! classified. Every kind in [`crate::dom::ElementKind`] is assigned exactly
//! one [`Disposition`] by an exhaustive match, so adding a kind to the enum
//! without classifying it is a compile error rather than a silent allow.
//!
//! # Threat Model
//!
//! The input is **untrusted rich-text markup** authored in an editor or pasted
//! from arbitrary external sources, later stored and re-rendered to third-party
//! visitors. The policy therefore has no permissive default: an element either
//! appears in the structural allow-list, appears in the always-strip set, or is
//! unwrapped (deleted with its children retained and re-evaluated).
//!
//! # Defense Layers
//!
//! 1. **Element allow-list**: only known-safe structural kinds survive
//! 2. **Always-strip set**: executable and interactive kinds are deleted with
//!    their entire subtree
//! 3. **Attribute allow-lists**: per-kind plus a small global set; `style` is
//!    removed by a hard rule outside the tables
//! 4. **URL scheme blocking**: `href` values with a script-execution scheme
//!    are neutralized
//! 5. **Embed gating**: `iframe` is admitted only for trusted embed origins

use crate::dom::ElementKind;

/// What the tree walker does with an element of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the element, filter its attributes, recurse into its children.
    Keep,
    /// Remove the element but splice its children into its place.
    Unwrap,
    /// Remove the element and its entire subtree.
    Strip,
}

/// Attributes permitted on every element kind.
pub const GLOBAL_ATTRIBUTES: &[&str] = &["id", "class"];

/// URL schemes that must never survive in an `href` value.
///
/// Matching is case-insensitive after trimming leading/trailing whitespace.
pub const DANGEROUS_URL_SCHEMES: &[&str] = &[
    "javascript:", // JavaScript execution
    "data:",       // Can carry executable content
    "vbscript:",   // VBScript execution (legacy IE)
    "file:",       // Local file access
    "about:",      // Browser internal URLs
];

/// Origin+path prefixes an `iframe` src must match to survive.
///
/// Covers the trusted video host's primary and privacy-enhanced domains, with
/// and without the `www` label. The `/embed/` path prefix is part of the
/// pattern: a frame pointing at any other path on these hosts is stripped.
pub const TRUSTED_EMBED_PREFIXES: &[&str] = &[
    "https://www.youtube.com/embed/",
    "https://youtube.com/embed/",
    "https://www.youtube-nocookie.com/embed/",
    "https://youtube-nocookie.com/embed/",
];

/// Classify an element kind.
///
/// # Examples
///
/// ```
/// use richtext_sanitizer::dom::ElementKind;
/// use richtext_sanitizer::policy::{disposition, Disposition};
///
/// assert_eq!(disposition(&ElementKind::P), Disposition::Keep);
/// assert_eq!(disposition(&ElementKind::Script), Disposition::Strip);
/// assert_eq!(
///     disposition(&ElementKind::Unknown("marquee".into())),
///     Disposition::Unwrap
/// );
/// ```
pub fn disposition(kind: &ElementKind) -> Disposition {
    use ElementKind::*;
    match kind {
        // Structural allow-list. The full table substructure is kept intact:
        // these are the kinds the parser confines to table context, and
        // unwrapping one would splice its content where a re-parse of the
        // output relocates it via foster parenting.
        H1 | H2 | H3 | H4 | H5 | H6 | P | Br | Hr | Blockquote | Pre | Figure | Figcaption
        | Div | Ul | Ol | Li | A | Strong | Em | B | I | U | S | Del | Code | Span | Table
        | Caption | Colgroup | Col | Thead | Tbody | Tfoot | Tr | Th | Td | Img => {
            Disposition::Keep
        }

        // Allow-listed at the kind level; the embed validator decides per
        // instance whether it actually survives.
        Iframe => Disposition::Keep,

        // Executable and interactive kinds: delete with the whole subtree.
        // Script bodies and form internals must never leak as text.
        Script | Style | Noscript | Object | Embed | Form | Input | Button => Disposition::Strip,

        // Everything else degrades to unwrap: the element goes, its children
        // stay and are re-evaluated individually.
        Unknown(_) => Disposition::Unwrap,
    }
}

/// The kind-specific attribute allow-list (the global list is separate).
pub fn allowed_attributes(kind: &ElementKind) -> &'static [&'static str] {
    use ElementKind::*;
    match kind {
        A => &["href", "title", "target", "rel"],
        Img => &["src", "alt", "title", "width", "height", "loading"],
        Iframe => &[
            "src",
            "width",
            "height",
            "frameborder",
            "allow",
            "allowfullscreen",
            "title",
        ],
        Td => &["colspan", "rowspan"],
        Th => &["colspan", "rowspan", "scope"],
        Colgroup | Col => &["span"],
        _ => &[],
    }
}

/// Whether an attribute name is permitted on the given kind.
pub fn attribute_allowed(kind: &ElementKind, name: &str) -> bool {
    GLOBAL_ATTRIBUTES.contains(&name) || allowed_attributes(kind).contains(&name)
}

/// Whether an `iframe` src value points at a trusted embed origin.
///
/// `None` (no src at all) is never trusted.
pub fn is_trusted_embed(src: Option<&str>) -> bool {
    let Some(src) = src else {
        return false;
    };
    let src = src.trim().to_ascii_lowercase();
    TRUSTED_EMBED_PREFIXES
        .iter()
        .any(|prefix| src.starts_with(prefix))
}

/// Whether a URL value begins with a scheme from [`DANGEROUS_URL_SCHEMES`].
pub fn has_dangerous_scheme(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    DANGEROUS_URL_SCHEMES
        .iter()
        .any(|scheme| url.starts_with(scheme))
}
