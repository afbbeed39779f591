use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;
use tracing::{debug, error, trace, warn};

use super::config::ResolverConfig;
use super::models::{BatchStats, FailureReason, ResolutionRequest};
use super::redirects::follow_redirects;

/// Counts attempts currently on the network and the most seen at once
#[derive(Debug, Default)]
pub(crate) struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightGauge {
    pub(crate) fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
        InFlightGuard { gauge: self }
    }

    pub(crate) fn current(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

pub(crate) struct InFlightGuard<'a> {
    gauge: &'a InFlightGauge,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Runs `requests` through a fixed pool of workers sharing one FIFO queue.
///
/// At most `concurrency_limit` attempts are in flight; each worker takes the
/// next queued URL as soon as its previous one settles. Every attempt gets its
/// own `per_url_timeout`, measured from admission. Finished requests come back
/// in completion order.
pub(crate) async fn run_pool(
    client: Client,
    config: Arc<ResolverConfig>,
    requests: Vec<ResolutionRequest>,
    concurrency_limit: usize,
    per_url_timeout: Duration,
) -> (Vec<ResolutionRequest>, BatchStats) {
    let started = Instant::now();
    let total = requests.len();
    if total == 0 {
        return (Vec::new(), BatchStats::default());
    }

    let worker_count = concurrency_limit.max(1).min(total);

    let (job_tx, job_rx) = mpsc::channel::<ResolutionRequest>(total);
    for request in requests {
        if let Err(e) = job_tx.try_send(request) {
            error!("Failed to enqueue resolution request: {}", e);
        }
    }
    // Closing the sender lets workers exit once the queue drains
    drop(job_tx);

    // Wrap the job receiver in a mutex so multiple workers can access it
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (done_tx, mut done_rx) = mpsc::channel::<ResolutionRequest>(total);
    let gauge = Arc::new(InFlightGauge::default());

    debug!("Spawning {} resolver workers for {} URLs", worker_count, total);
    let mut handles = Vec::with_capacity(worker_count);
    for worker_id in 0..worker_count {
        let client = client.clone();
        let config = Arc::clone(&config);
        let job_rx = Arc::clone(&job_rx);
        let done_tx = done_tx.clone();
        let gauge = Arc::clone(&gauge);

        handles.push(tokio::spawn(async move {
            trace!("Worker {} started", worker_id);
            loop {
                let next = { job_rx.lock().await.recv().await };
                let Some(mut request) = next else {
                    trace!("Worker {} shutting down - queue drained", worker_id);
                    break;
                };

                request.admit();
                let outcome = {
                    let _slot = gauge.enter();
                    match timeout(per_url_timeout, follow_redirects(&client, &config, request.original_url())).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            warn!("Resolution of {} timed out after {:?}", request.original_url(), per_url_timeout);
                            Err(FailureReason::Timeout)
                        }
                    }
                };

                match &outcome {
                    Ok(resolved) => debug!("Worker {} resolved {} -> {}", worker_id, request.original_url(), resolved),
                    Err(reason) => debug!("Worker {} failed {}: {}", worker_id, request.original_url(), reason),
                }
                request.finish(outcome);

                if done_tx.send(request).await.is_err() {
                    warn!("Worker {} failed to report result - receiver dropped", worker_id);
                    break;
                }
            }
        }));
    }
    drop(done_tx);

    for joined in futures::future::join_all(handles).await {
        if let Err(e) = joined {
            error!("Resolver worker stopped abnormally: {}", e);
        }
    }

    let mut finished = Vec::with_capacity(total);
    while let Some(request) = done_rx.recv().await {
        finished.push(request);
    }

    debug_assert_eq!(gauge.current(), 0);
    let stats = BatchStats {
        workers: worker_count,
        peak_in_flight: gauge.peak(),
        elapsed: started.elapsed(),
    };
    (finished, stats)
}
