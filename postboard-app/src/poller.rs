//! Job poller
//!
//! Watches one effect job until it reaches a terminal state. The loop is
//! strictly sequential: wait, ask for the status once, react, repeat. A single
//! failed request ends monitoring; there is no retry or backoff.

use postboard_client::{ApiClient, ClassifiedError};
use postboard_core::domain::job::{Job, JobStatus};
use postboard_core::dto::job::JobStatusReport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::status::StatusSink;
use crate::view::StatusLine;

/// Poller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Running,
    Succeeded,
    Failed,
    PollError,
    Cancelled,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Running)
    }
}

/// How a polling run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub state: PollState,
    /// Status requests issued
    pub polls: u32,
    /// Last known job status
    pub job: Job,
}

/// Stops a running poller
///
/// Cancellation is observed before each wait and before each request, and
/// interrupts a wait or a status request in progress. A reply that arrives
/// after cancellation is ignored.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            let cancelled = *rx.borrow_and_update();
            if cancelled {
                return;
            }
            // The sender lives in `self`, so this cannot fail while we wait.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Polls one job's status endpoint at a fixed interval
pub struct JobPoller {
    client: ApiClient,
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel: CancelHandle,
}

impl JobPoller {
    pub fn new(client: ApiClient, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            client,
            clock,
            interval,
            cancel: CancelHandle::new(),
        }
    }

    /// Handle that can stop this poller from another task
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Poll `job_name` until it finishes
    ///
    /// `on_success` runs exactly once if the job succeeds and never otherwise.
    pub async fn run<F>(&self, job_name: &str, status: &dyn StatusSink, on_success: F) -> PollReport
    where
        F: FnOnce(),
    {
        info!("Polling job {} every {:?}", job_name, self.interval);
        status.show(StatusLine::Progress(format!("Job {} running…", job_name)));

        let mut job = Job::new(job_name);
        let mut polls = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Self::cancelled(job, polls);
            }

            tokio::select! {
                _ = self.clock.sleep(self.interval) => {}
                _ = self.cancel.cancelled() => return Self::cancelled(job, polls),
            }

            if self.cancel.is_cancelled() {
                return Self::cancelled(job, polls);
            }

            polls += 1;
            debug!("Polling job {} (attempt {})", job_name, polls);
            let outcome = tokio::select! {
                outcome = self.client.job_status(job_name) => outcome,
                _ = self.cancel.cancelled() => return Self::cancelled(job, polls),
            };

            if self.cancel.is_cancelled() {
                return Self::cancelled(job, polls);
            }

            let (state, line) = transition(&mut job, outcome);
            status.show(line);

            match state {
                PollState::Running => continue,
                PollState::Succeeded => {
                    info!("Job {} succeeded after {} poll(s)", job_name, polls);
                    on_success();
                    return PollReport { state, polls, job };
                }
                _ => {
                    warn!("Job {} ended in {:?} after {} poll(s)", job_name, state, polls);
                    return PollReport { state, polls, job };
                }
            }
        }
    }

    fn cancelled(job: Job, polls: u32) -> PollReport {
        info!("Stopped polling job {} after {} poll(s)", job.name, polls);
        PollReport {
            state: PollState::Cancelled,
            polls,
            job,
        }
    }
}

/// Apply one poll outcome to the job and decide the next state
fn transition(
    job: &mut Job,
    outcome: Result<JobStatusReport, ClassifiedError>,
) -> (PollState, StatusLine) {
    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            return (
                PollState::PollError,
                StatusLine::Error(format!("Failed to poll job: {}", e)),
            );
        }
    };

    job.apply(report);
    match &job.status {
        JobStatus::Succeeded => (
            PollState::Succeeded,
            StatusLine::Success(format!("Job {} succeeded.", job.name)),
        ),
        JobStatus::Failed => (
            PollState::Failed,
            StatusLine::Error(format!(
                "Job failed: {}",
                job.reason.as_deref().unwrap_or("unknown error")
            )),
        ),
        other => (
            PollState::Running,
            StatusLine::Progress(format!("Job {} {}…", job.name, other)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::InstantClock;
    use crate::status::RecordingStatus;
    use postboard_client::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Fixture {
        transport: Arc<ScriptedTransport>,
        clock: Arc<InstantClock>,
        poller: JobPoller,
        status: RecordingStatus,
        calls: AtomicU32,
    }

    fn fixture() -> Fixture {
        let transport = Arc::new(ScriptedTransport::new());
        let clock = Arc::new(InstantClock::default());
        let client = ApiClient::with_transport("http://api", transport.clone());
        let poller = JobPoller::new(client, clock.clone(), Duration::from_millis(1000));
        Fixture {
            transport,
            clock,
            poller,
            status: RecordingStatus::default(),
            calls: AtomicU32::new(0),
        }
    }

    fn push_status(f: &Fixture, status: &str) {
        f.transport.push_json(200, json!({"status": status}));
    }

    #[tokio::test]
    async fn test_succeeds_after_three_polls() {
        let f = fixture();
        push_status(&f, "running");
        push_status(&f, "running");
        push_status(&f, "succeeded");

        let report = f
            .poller
            .run("job-1", &f.status, || {
                // Callback must not run before the third poll has completed.
                assert_eq!(f.transport.request_count(), 3);
                f.calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(report.state, PollState::Succeeded);
        assert_eq!(report.polls, 3);
        assert_eq!(f.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.transport.request_count(), 3);
        assert_eq!(f.clock.sleeps(), vec![Duration::from_millis(1000); 3]);
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Success("Job job-1 succeeded.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_shows_reason_without_callback() {
        let f = fixture();
        f.transport
            .push_json(200, json!({"status": "failed", "reason": "boom"}));

        let report = f
            .poller
            .run("job-1", &f.status, || {
                f.calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(report.state, PollState::Failed);
        assert_eq!(report.polls, 1);
        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
        let last = f.status.last().unwrap();
        assert!(last.is_error());
        assert!(last.text().contains("boom"));
    }

    #[tokio::test]
    async fn test_failed_without_reason() {
        let f = fixture();
        f.transport
            .push_json(200, json!({"status": "failed", "reason": ""}));

        let report = f.poller.run("job-1", &f.status, || {}).await;

        assert_eq!(report.state, PollState::Failed);
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Error("Job failed: unknown error".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_on_second_poll() {
        let f = fixture();
        push_status(&f, "running");
        f.transport.push_network_failure("connection reset");
        push_status(&f, "succeeded");

        let report = f
            .poller
            .run("job-1", &f.status, || {
                f.calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(report.state, PollState::PollError);
        assert_eq!(report.polls, 2);
        assert_eq!(f.transport.request_count(), 2);
        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            f.status.last(),
            Some(StatusLine::Error("Failed to poll job: Network error".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unknown_status_keeps_running() {
        let f = fixture();
        push_status(&f, "pending");
        push_status(&f, "succeeded");

        let report = f.poller.run("job-1", &f.status, || {}).await;

        assert_eq!(report.state, PollState::Succeeded);
        let lines = f.status.lines();
        assert_eq!(
            lines[0],
            Some(StatusLine::Progress("Job job-1 running…".to_string()))
        );
        assert_eq!(
            lines[1],
            Some(StatusLine::Progress("Job job-1 pending…".to_string()))
        );
    }

    #[tokio::test]
    async fn test_cancel_before_start_issues_no_requests() {
        let f = fixture();
        push_status(&f, "succeeded");
        f.poller.cancel_handle().cancel();

        let report = f
            .poller
            .run("job-1", &f.status, || {
                f.calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(report.state, PollState::Cancelled);
        assert_eq!(report.polls, 0);
        assert_eq!(f.transport.request_count(), 0);
        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_wait() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::with_transport("http://api", transport.clone());
        let poller = JobPoller::new(
            client,
            Arc::new(crate::clock::TokioClock),
            Duration::from_secs(3600),
        );
        let handle = poller.cancel_handle();
        let status = RecordingStatus::default();

        let (report, _) = tokio::join!(poller.run("job-1", &status, || {}), async {
            tokio::task::yield_now().await;
            handle.cancel();
        });

        assert_eq!(report.state, PollState::Cancelled);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_request_skips_callback() {
        let f = fixture();
        let release = f
            .transport
            .push_held_json(200, json!({"status": "succeeded"}));
        let handle = f.poller.cancel_handle();

        let (report, _) = tokio::join!(
            f.poller.run("job-1", &f.status, || {
                f.calls.fetch_add(1, Ordering::SeqCst);
            }),
            async {
                while f.transport.request_count() < 1 {
                    tokio::task::yield_now().await;
                }
                handle.cancel();
                release.notify_one();
            }
        );

        assert_eq!(report.state, PollState::Cancelled);
        assert_eq!(report.polls, 1);
        assert_eq!(f.calls.load(Ordering::SeqCst), 0);
        assert_ne!(
            f.status.last(),
            Some(StatusLine::Success("Job job-1 succeeded.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_status_keeps_running() {
        let f = fixture();
        f.transport.push_json(200, json!({}));
        push_status(&f, "succeeded");

        let report = f.poller.run("job-1", &f.status, || {}).await;

        assert_eq!(report.state, PollState::Succeeded);
        assert_eq!(report.polls, 2);
        assert_eq!(
            f.status.lines()[1],
            Some(StatusLine::Progress("Job job-1 unknown…".to_string()))
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PollState::Running.is_terminal());
        assert!(PollState::Succeeded.is_terminal());
        assert!(PollState::Failed.is_terminal());
        assert!(PollState::PollError.is_terminal());
        assert!(PollState::Cancelled.is_terminal());
    }
}
