use serde::{Deserialize, Serialize};

/// A link-shaped substring found during a single scan of the input text.
///
/// Borrows from the scanned text; `before` and `after` are the bounded context
/// windows on either side, clipped at neighbouring links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTextSpan<'a> {
    pub url: &'a str,
    pub start: usize,
    pub end: usize,
    pub before: &'a str,
    pub after: &'a str,
    /// Whether another link follows this one later in the text
    pub followed_by_link: bool,
}

/// Kind of shelf item a link most likely points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Podcast,
    Music,
}

/// One extracted link proposed for import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItemCandidate {
    /// Normalized absolute URL
    pub url: String,

    /// Best-effort title taken from text just before the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Best-effort description taken from text just after the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item kind inferred from well-known hosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,

    /// Zero-based order of first appearance
    pub position: usize,
}

impl ParsedItemCandidate {
    /// Creates a candidate with no inferred context
    pub fn new(url: impl Into<String>, position: usize) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            kind: None,
            position,
        }
    }
}
