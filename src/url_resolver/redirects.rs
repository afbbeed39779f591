use reqwest::{header::LOCATION, Client};
use std::collections::HashSet;
use tracing::{debug, error, trace, warn};
use url::Url;

use super::config::ResolverConfig;
use super::models::FailureReason;

/// Parses and checks an input URL before any network traffic
pub(crate) fn validate_input(url: &str, config: &ResolverConfig) -> Result<Url, FailureReason> {
    if url.is_empty() {
        warn!("Empty URL provided");
        return Err(FailureReason::InvalidUrl);
    }
    if url.len() > config.max_url_length {
        warn!("URL length {} exceeds maximum allowed length of {}", url.len(), config.max_url_length);
        return Err(FailureReason::InvalidUrl);
    }

    let parsed = Url::parse(url).map_err(|e| {
        warn!("Failed to parse URL '{}': {}", url, e);
        FailureReason::InvalidUrl
    })?;

    if !config.allows_scheme(parsed.scheme()) {
        warn!("Disallowed URL scheme: {}", parsed.scheme());
        return Err(FailureReason::InvalidUrl);
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        warn!("URL has no host: {}", url);
        return Err(FailureReason::InvalidUrl);
    }

    Ok(parsed)
}

/// Follows the redirect chain of `start_url` and returns the final URL.
///
/// The client must not auto-follow redirects. A URL that does not redirect
/// resolves to the input string unchanged. The caller bounds the whole chain
/// with a deadline.
pub(crate) async fn follow_redirects(
    client: &Client,
    config: &ResolverConfig,
    start_url: &str,
) -> Result<String, FailureReason> {
    let mut current = validate_input(start_url, config)?;
    let mut visited = HashSet::with_capacity(config.max_redirects + 1);
    let mut hops = 0;

    trace!("Beginning redirect chain traversal from {}", current);
    loop {
        if !visited.insert(current.as_str().to_owned()) {
            warn!("Redirect loop detected at {}", current);
            return Err(FailureReason::RedirectLoop);
        }

        debug!("Sending request to {} (hop {}/{})", current, hops, config.max_redirects);
        let resp = client.get(current.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Request to {} timed out: {}", current, e);
                FailureReason::Timeout
            } else {
                warn!("Failed to send request to {}: {}", current, e);
                FailureReason::NetworkError
            }
        })?;

        let status = resp.status();
        debug!("Response status: {}", status);
        trace!("Response headers: {:?}", resp.headers());

        let is_redirect = status.is_redirection() && status != reqwest::StatusCode::NOT_MODIFIED;
        if !is_redirect {
            if status.is_client_error() || status.is_server_error() {
                warn!("Chain from {} ended at {} with status {}", start_url, current, status);
            }
            break;
        }

        let Some(location) = resp.headers().get(LOCATION) else {
            warn!("Redirect status {} without Location header at {}", status, current);
            break;
        };
        let location = location.to_str().map_err(|e| {
            error!("Invalid redirect location header at {}: {}", current, e);
            FailureReason::InvalidRedirect
        })?;

        // Relative locations resolve against the current URL
        let next = current.join(location).map_err(|e| {
            error!("Failed to resolve redirect location '{}' from {}: {}", location, current, e);
            FailureReason::InvalidRedirect
        })?;

        if !config.allows_scheme(next.scheme()) {
            warn!("Redirect to disallowed scheme: {} (from {})", next.scheme(), current);
            break;
        }
        if hops >= config.max_redirects {
            warn!("Max redirect hops ({}) reached at {}", config.max_redirects, current);
            return Err(FailureReason::TooManyRedirects);
        }

        debug!("Redirected to: {}", next);
        current = next;
        hops += 1;
    }

    debug!("Resolved {} after {} hops", start_url, hops);
    if hops == 0 {
        Ok(start_url.to_owned())
    } else {
        Ok(current.into())
    }
}
