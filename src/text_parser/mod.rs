//! Link extraction from free-form pasted text.
//!
//! A single left-to-right pass finds link-shaped tokens, attaches the text
//! around each one as title/description guesses, and collapses duplicates to
//! their first occurrence.

pub mod candidate;
pub mod context;
pub mod kind;
pub mod normalize;
pub mod patterns;
pub mod validation;


use std::collections::HashSet;
use tracing::{debug, instrument, trace};

pub use candidate::{ItemKind, ParsedItemCandidate, RawTextSpan};
pub use validation::{validate_parse_results, ValidatedCandidates};

use context::{infer_description, infer_title};
use kind::infer_kind;
use normalize::{dedup_key, has_http_scheme, normalize_url, trim_trailing_punctuation};
use patterns::{KNOWN_TLDS, LINK_REGEX};

/// Maximum characters of context kept on each side of a link
pub const CONTEXT_WINDOW: usize = 200;

/// Extracts link candidates with surrounding context from `text`.
///
/// Never fails: fragments that do not parse as absolute URLs are skipped, and
/// blank input yields an empty list. Output order is the order of first
/// appearance and contains no duplicate normalized URLs.
#[instrument(level = "debug", skip_all, fields(text_len = text.len()))]
pub fn parse_text_with_context(text: &str) -> Vec<ParsedItemCandidate> {
    if text.trim().is_empty() {
        trace!("Blank input, nothing to scan");
        return Vec::new();
    }

    let spans = scan_spans(text);
    let mut seen = HashSet::with_capacity(spans.len());
    let mut candidates = Vec::with_capacity(spans.len());

    for span in spans {
        let Some(url) = normalize_url(span.url) else {
            debug!("Skipping unparseable link at {}..{}: {}", span.start, span.end, span.url);
            continue;
        };
        if !seen.insert(dedup_key(&url)) {
            debug!("Skipping duplicate link: {}", url);
            continue;
        }

        let position = candidates.len();
        candidates.push(ParsedItemCandidate {
            kind: infer_kind(&url),
            url: url.to_string(),
            title: infer_title(span.before),
            description: infer_description(span.after, span.followed_by_link),
            position,
        });
    }

    debug!("Extracted {} candidates", candidates.len());
    candidates
}

/// Finds link-shaped spans in `text` in left-to-right order.
///
/// Each span's context windows hold at most [`CONTEXT_WINDOW`] characters and
/// never reach past the previous or next span.
pub fn scan_spans(text: &str) -> Vec<RawTextSpan<'_>> {
    let bounds: Vec<(usize, usize)> = LINK_REGEX
        .find_iter(text)
        .filter_map(|m| accept_match(text, m.start(), m.as_str()).map(|len| (m.start(), m.start() + len)))
        .collect();

    bounds
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| {
            let floor = if i == 0 { 0 } else { bounds[i - 1].1 };
            let next_start = bounds.get(i + 1).map(|&(next, _)| next);
            RawTextSpan {
                url: &text[start..end],
                start,
                end,
                before: window_before(&text[floor..start]),
                after: window_after(&text[end..next_start.unwrap_or(text.len())]),
                followed_by_link: next_start.is_some(),
            }
        })
        .collect()
}

/// Length of the usable part of a regex match, or `None` to reject it
fn accept_match(text: &str, start: usize, raw: &str) -> Option<usize> {
    let trimmed = trim_trailing_punctuation(raw);
    if trimmed.is_empty() {
        return None;
    }
    if has_http_scheme(trimmed) {
        return Some(trimmed.len());
    }

    // Bare domains: skip email addresses and fragments of other URLs
    if matches!(text[..start].chars().last(), Some('@') | Some('/')) {
        trace!("Skipping bare domain inside email or path: {}", trimmed);
        return None;
    }

    let host = trimmed
        .split(|c| c == '/' || c == ':' || c == '?' || c == '#')
        .next()
        .unwrap_or(trimmed);
    let tld = host.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    let has_www = host.get(..4).map_or(false, |head| head.eq_ignore_ascii_case("www."));

    if has_www || KNOWN_TLDS.contains(tld.as_str()) {
        Some(trimmed.len())
    } else {
        trace!("Skipping bare token with unknown TLD: {}", trimmed);
        None
    }
}

fn window_before(slice: &str) -> &str {
    match slice.char_indices().rev().nth(CONTEXT_WINDOW - 1) {
        Some((idx, _)) => &slice[idx..],
        None => slice,
    }
}

fn window_after(slice: &str) -> &str {
    match slice.char_indices().nth(CONTEXT_WINDOW) {
        Some((idx, _)) => &slice[..idx],
        None => slice,
    }
}
