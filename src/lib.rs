//! Link import core for Virtual Bookshelf.
//!
//! Pasted text is scanned for links with [`text_parser`], capped, and any
//! shortened links are followed to their destinations with [`url_resolver`]
//! before the user picks which items to add to a shelf.

pub mod config;
pub mod import;
pub mod text_parser;
pub mod url_resolver;
pub mod utils;

pub use config::ImportConfig;
pub use import::{preview_import, ImportPreview, PreviewItem};
pub use text_parser::{parse_text_with_context, validate_parse_results, ParsedItemCandidate, ValidatedCandidates};
pub use url_resolver::{resolve_urls, ResolutionBatchResult, UrlResolver};
