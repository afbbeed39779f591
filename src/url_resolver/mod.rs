//! Bounded redirect resolution for batches of links.
//!
//! Shortened links are followed hop by hop to their final destination by a
//! fixed-size worker pool. Each URL gets its own deadline, and every failure is
//! reported as data rather than aborting the batch.

pub mod config;
pub mod models;
mod redirects;
pub mod shorteners;
mod workers;

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

pub use self::config::ResolverConfig;
pub use models::{
    BatchStats, FailedUrl, FailureReason, ResolutionBatchResult, ResolutionRequest, ResolutionState,
};
pub use shorteners::is_shortened_url;

/// Redirect resolver with a reusable HTTP client
#[derive(Debug, Clone)]
pub struct UrlResolver {
    client: Client,
    config: Arc<ResolverConfig>,
}

impl UrlResolver {
    /// Builds a resolver whose client never follows redirects on its own
    pub fn new(config: ResolverConfig) -> Result<Self> {
        debug!("Initializing HTTP client with user agent: {}", config.user_agent);
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .with_context(|| format!("Invalid user agent string '{}'", config.user_agent))?;
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every URL in `urls` to its final redirect target.
    ///
    /// At most `concurrency_limit` URLs are in flight at once (a limit of 0 is
    /// treated as 1), and each one is bounded by `per_url_timeout`. Duplicate
    /// inputs are resolved once. Every distinct input ends up in exactly one of
    /// `resolved` or `failed`.
    pub async fn resolve_batch(
        &self,
        urls: &[String],
        concurrency_limit: usize,
        per_url_timeout: Duration,
    ) -> ResolutionBatchResult {
        self.resolve_batch_with_stats(urls, concurrency_limit, per_url_timeout)
            .await
            .0
    }

    /// Like [`UrlResolver::resolve_batch`], also reporting pool statistics
    #[instrument(level = "debug", skip_all, fields(urls = urls.len(), concurrency_limit = concurrency_limit))]
    pub async fn resolve_batch_with_stats(
        &self,
        urls: &[String],
        concurrency_limit: usize,
        per_url_timeout: Duration,
    ) -> (ResolutionBatchResult, BatchStats) {
        let mut seen = HashSet::with_capacity(urls.len());
        let requests: Vec<ResolutionRequest> = urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .enumerate()
            .map(|(index, url)| ResolutionRequest::new(index, url.as_str()))
            .collect();

        if requests.len() < urls.len() {
            debug!("Collapsed {} duplicate URLs", urls.len() - requests.len());
        }
        if requests.is_empty() {
            return (ResolutionBatchResult::default(), BatchStats::default());
        }

        let originals: Vec<String> = requests.iter().map(|r| r.original_url().to_owned()).collect();
        let (finished, stats) = workers::run_pool(
            self.client.clone(),
            Arc::clone(&self.config),
            requests,
            concurrency_limit,
            per_url_timeout,
        )
        .await;

        // Re-slot by index so anything a worker lost is still accounted for
        let mut slots: Vec<Option<ResolutionRequest>> = originals.iter().map(|_| None).collect();
        for request in finished {
            let index = request.index();
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(request);
            }
        }
        let requests = slots
            .into_iter()
            .zip(originals)
            .enumerate()
            .map(|(index, (slot, url))| {
                slot.unwrap_or_else(|| {
                    error!("No result reported for {}", url);
                    ResolutionRequest::new(index, url)
                })
            })
            .collect();

        let result = ResolutionBatchResult::from_requests(requests);
        info!(
            "Resolved {} of {} URLs ({} failed) with {} workers, peak {} in flight, in {:?}",
            result.resolved.len(),
            result.len(),
            result.failed.len(),
            stats.workers,
            stats.peak_in_flight,
            stats.elapsed
        );
        (result, stats)
    }
}

/// Resolves `urls` with a default-configured resolver.
///
/// Only fails if the HTTP client cannot be built; individual URLs never cause
/// an error.
pub async fn resolve_urls(
    urls: &[String],
    concurrency_limit: usize,
    per_url_timeout: Duration,
) -> Result<ResolutionBatchResult> {
    let resolver = UrlResolver::new(ResolverConfig::default())?;
    Ok(resolver.resolve_batch(urls, concurrency_limit, per_url_timeout).await)
}
