//! Drives a server-side job to a terminal state.
//!
//! [`poll_until_done`] re-reads the job's status until one of:
//!
//! - the job reports `completed` or `failed`,
//! - the server answers with an error status (anything but 429),
//! - no response could be obtained (status `0`),
//! - the caller's `max_wait` deadline has passed (synthesized 408).
//!
//! A 429 pauses for the server's `retry_after` and asks again; it is never
//! returned. In-progress snapshots are reported through
//! [`PollOptions::on_event`] and never returned either.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::models::{ApiResponse, PollEvent};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(1800);

/// Anything that can report a job's current status.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn get_job(&self, job_id: &str) -> ApiResponse;
}

/// Time source and sleeper used by the poll loop.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time through `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polling config for [`poll_until_done`].
pub struct PollOptions {
    /// Pause between in-progress checks. Default: 15s.
    pub interval: Duration,
    /// Overall budget measured from the first check. Zero means no limit.
    /// Default: 30 minutes.
    pub max_wait: Duration,
    /// Called with every progress and rate-limit record.
    #[allow(clippy::type_complexity)]
    pub on_event: Option<Box<dyn Fn(&PollEvent) + Send + Sync>>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
            on_event: None,
        }
    }
}

impl PollOptions {
    fn emit(&self, event: PollEvent) {
        if let Some(ref cb) = self.on_event {
            cb(&event);
        }
    }
}

/// Poll `job_id` until it is terminal, errors out, or the deadline passes.
///
/// The deadline is fixed once, before the first check; a `max_wait` too large
/// to represent as an instant means no deadline. It is only compared
/// after an in-progress response, so a rate-limit pause may run past it and
/// a terminal answer received afterwards is still returned.
pub async fn poll_until_done<S, C>(
    source: &S,
    clock: &C,
    job_id: &str,
    opts: &PollOptions,
) -> ApiResponse
where
    S: JobStatusSource + ?Sized,
    C: Clock + ?Sized,
{
    let deadline = (!opts.max_wait.is_zero())
        .then(|| clock.now().checked_add(opts.max_wait))
        .flatten();

    loop {
        let response = source.get_job(job_id).await;

        if response.is_rate_limited() {
            let retry_after = response.retry_after();
            warn!(job_id, retry_after, "rate limited while polling");
            opts.emit(PollEvent::RateLimited {
                job_id: job_id.to_string(),
                retry_after,
            });
            clock.sleep(Duration::from_secs(retry_after)).await;
            continue;
        }

        if response.is_network_error() || response.status_code >= 400 {
            info!(job_id, status_code = response.status_code, "polling stopped on error");
            return response;
        }

        if response.is_terminal() {
            info!(job_id, status = response.job_status(), "job reached terminal state");
            return response;
        }

        debug!(job_id, status = response.job_status(), "job still in progress");
        opts.emit(PollEvent::progress(job_id, &response));

        if let Some(deadline) = deadline {
            if clock.now() >= deadline {
                info!(job_id, max_wait = ?opts.max_wait, "poll deadline reached");
                return ApiResponse::from_value(
                    408,
                    json!({ "error": "poll_timeout", "job_id": job_id }),
                );
            }
        }

        clock.sleep(opts.interval).await;
    }
}
