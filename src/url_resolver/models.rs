use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Why a single URL could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    Timeout,
    NetworkError,
    TooManyRedirects,
    RedirectLoop,
    InvalidUrl,
    InvalidRedirect,
    /// The worker handling the URL stopped before reporting back
    Aborted,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Timeout => "timeout",
            FailureReason::NetworkError => "network_error",
            FailureReason::TooManyRedirects => "too_many_redirects",
            FailureReason::RedirectLoop => "redirect_loop",
            FailureReason::InvalidUrl => "invalid_url",
            FailureReason::InvalidRedirect => "invalid_redirect",
            FailureReason::Aborted => "aborted",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Pending,
    InFlight,
    Succeeded { resolved_url: String },
    Failed { reason: FailureReason },
}

impl ResolutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResolutionState::Succeeded { .. } | ResolutionState::Failed { .. })
    }
}

/// An attempt to resolve one URL of a batch
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    index: usize,
    original_url: String,
    state: ResolutionState,
}

impl ResolutionRequest {
    pub fn new(index: usize, original_url: impl Into<String>) -> Self {
        Self {
            index,
            original_url: original_url.into(),
            state: ResolutionState::Pending,
        }
    }

    /// Position of the URL in the (deduplicated) batch input
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Marks the request as admitted into the worker pool
    pub fn admit(&mut self) {
        if self.state == ResolutionState::Pending {
            self.state = ResolutionState::InFlight;
        } else {
            warn!("Ignoring admit of {} in state {:?}", self.original_url, self.state);
        }
    }

    /// Records the outcome; only the first outcome after admission counts
    pub fn finish(&mut self, outcome: Result<String, FailureReason>) {
        if self.state != ResolutionState::InFlight {
            warn!("Ignoring outcome for {} in state {:?}", self.original_url, self.state);
            return;
        }
        self.state = match outcome {
            Ok(resolved_url) => ResolutionState::Succeeded { resolved_url },
            Err(reason) => ResolutionState::Failed { reason },
        };
    }
}

/// A URL that could not be resolved, with a machine-stable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedUrl {
    pub url: String,
    pub reason: FailureReason,
}

/// Outcome of a batch: every distinct input URL lands in exactly one partition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionBatchResult {
    /// Original URL -> final URL after redirects
    pub resolved: BTreeMap<String, String>,
    /// Failures in input order
    pub failed: Vec<FailedUrl>,
}

impl ResolutionBatchResult {
    /// Folds finished requests into the two partitions.
    ///
    /// Requests that never reached a terminal state are reported as aborted.
    pub fn from_requests(mut requests: Vec<ResolutionRequest>) -> Self {
        requests.sort_by_key(|request| request.index);

        let mut result = Self::default();
        for request in requests {
            match request.state {
                ResolutionState::Succeeded { resolved_url } => {
                    result.resolved.insert(request.original_url, resolved_url);
                }
                ResolutionState::Failed { reason } => result.failed.push(FailedUrl {
                    url: request.original_url,
                    reason,
                }),
                ResolutionState::Pending | ResolutionState::InFlight => {
                    warn!("Request for {} never finished", request.original_url);
                    result.failed.push(FailedUrl {
                        url: request.original_url,
                        reason: FailureReason::Aborted,
                    });
                }
            }
        }
        result
    }

    /// Number of URLs accounted for
    pub fn len(&self) -> usize {
        self.resolved.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// URLs that failed, in input order, ready to be retried in another batch
    pub fn failed_urls(&self) -> Vec<String> {
        self.failed.iter().map(|failure| failure.url.clone()).collect()
    }

    pub fn failure_for(&self, url: &str) -> Option<FailureReason> {
        self.failed
            .iter()
            .find(|failure| failure.url == url)
            .map(|failure| failure.reason)
    }
}

/// Per-batch observations from the worker pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub workers: usize,
    pub peak_in_flight: usize,
    pub elapsed: Duration,
}
