use serde::Serialize;
use tracing::{debug, warn};

use super::candidate::ParsedItemCandidate;

/// Candidates that survived the item cap, plus a warning when some were dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedCandidates {
    pub items: Vec<ParsedItemCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Caps the candidate list at `max_items`, keeping the earliest entries.
///
/// Returns the list untouched when it already fits. Otherwise the tail is
/// dropped and the warning says how many links were left out.
pub fn validate_parse_results(
    mut candidates: Vec<ParsedItemCandidate>,
    max_items: usize,
) -> ValidatedCandidates {
    let total = candidates.len();
    if total <= max_items {
        debug!("All {} candidates fit within the limit of {}", total, max_items);
        return ValidatedCandidates {
            items: candidates,
            warning: None,
        };
    }

    let dropped = total - max_items;
    candidates.truncate(max_items);
    warn!("Truncated {} candidates to {}, dropping {}", total, max_items, dropped);

    let warning = format!(
        "Found {} links but only {} can be imported at once; {} {} dropped",
        total,
        max_items,
        dropped,
        if dropped == 1 { "link was" } else { "links were" }
    );

    ValidatedCandidates {
        items: candidates,
        warning: Some(warning),
    }
}
