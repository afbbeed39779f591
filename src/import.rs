use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use crate::config::ImportConfig;
use crate::text_parser::{parse_text_with_context, validate_parse_results, ParsedItemCandidate};
use crate::url_resolver::{is_shortened_url, FailureReason, ResolutionBatchResult, UrlResolver};

/// One candidate as shown to the user before they confirm the import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewItem {
    #[serde(flatten)]
    pub candidate: ParsedItemCandidate,

    /// Final destination when the link was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,

    /// Why resolution failed, when it was attempted and failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_error: Option<FailureReason>,
}

impl PreviewItem {
    /// URL to store on the shelf: the resolved one when available
    pub fn effective_url(&self) -> &str {
        self.resolved_url.as_deref().unwrap_or(&self.candidate.url)
    }
}

/// Everything the import screen needs from one paste
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    pub items: Vec<PreviewItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub resolved_count: usize,
    pub failed_count: usize,
}

/// Extracts, caps and resolves the links in `text`.
///
/// Fails only when the text is too long or the HTTP client cannot be built.
/// Per-link resolution problems are reported on the individual items.
#[instrument(level = "debug", skip_all, fields(text_len = text.len()))]
pub async fn preview_import(text: &str, config: &ImportConfig) -> Result<ImportPreview> {
    let length = text.chars().count();
    if length > config.max_text_length {
        bail!(
            "Text is {} characters long; the maximum is {}",
            length,
            config.max_text_length
        );
    }

    let validated = validate_parse_results(parse_text_with_context(text), config.max_items);
    let to_resolve: Vec<String> = validated
        .items
        .iter()
        .filter(|candidate| config.resolve_all_links || is_shortened_url(&candidate.url))
        .map(|candidate| candidate.url.clone())
        .collect();
    debug!("{} of {} candidates need resolution", to_resolve.len(), validated.items.len());

    let batch = if to_resolve.is_empty() {
        ResolutionBatchResult::default()
    } else {
        let resolver = UrlResolver::new(config.resolver_config())?;
        resolver
            .resolve_batch(&to_resolve, config.concurrency_limit, config.timeout())
            .await
    };

    let failures: HashMap<&str, FailureReason> = batch
        .failed
        .iter()
        .map(|failure| (failure.url.as_str(), failure.reason))
        .collect();

    let items: Vec<PreviewItem> = validated
        .items
        .into_iter()
        .map(|candidate| PreviewItem {
            resolved_url: batch.resolved.get(&candidate.url).cloned(),
            resolution_error: failures.get(candidate.url.as_str()).copied(),
            candidate,
        })
        .collect();

    info!(
        "Import preview: {} items, {} resolved, {} failed",
        items.len(),
        batch.resolved.len(),
        batch.failed.len()
    );

    Ok(ImportPreview {
        items,
        warning: validated.warning,
        resolved_count: batch.resolved.len(),
        failed_count: batch.failed.len(),
    })
}
