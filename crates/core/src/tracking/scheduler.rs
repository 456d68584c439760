//! Periodic report scheduler
//!
//! One scheduler is armed per active session. It owns the background task
//! and its cancellation token; ticks capture the session by value and never
//! touch the tracking state lock.

use std::sync::Arc;
use std::time::Duration;

use devtracker_domain::constants::DEFAULT_REPORT_INTERVAL_SECS;
use devtracker_domain::{DevTrackerError, Session};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::dispatcher::ReportDispatcher;

/// How long `join` waits for the loop to wind down
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Arming needs a tokio runtime on the calling thread
    #[error("No tokio runtime available to run the scheduler")]
    NoRuntime,

    /// Operation timed out
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),
}

impl From<SchedulerError> for DevTrackerError {
    fn from(err: SchedulerError) -> Self {
        DevTrackerError::Internal(err.to_string())
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Configuration for the report scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Report interval
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_REPORT_INTERVAL_SECS), // 5 minutes
        }
    }
}

/// Fires a report for one session every `interval`
pub struct ReportScheduler {
    config: SchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: Option<JoinHandle<()>>,
}

impl ReportScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config, cancellation_token: CancellationToken::new(), task_handle: None }
    }

    /// Arm the periodic trigger for `session`.
    ///
    /// The first tick fires one full interval from now.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if a loop is already armed
    /// and [`SchedulerError::NoRuntime`] outside a tokio runtime.
    #[instrument(skip(self, dispatcher, session), fields(interval_secs = self.config.interval.as_secs()))]
    pub fn arm(
        &mut self,
        dispatcher: Arc<ReportDispatcher>,
        session: Session,
    ) -> SchedulerResult<()> {
        if self.is_armed() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        // Fresh token so a cancelled scheduler can be re-armed
        self.cancellation_token = CancellationToken::new();

        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();

        let handle = runtime.spawn(async move {
            Self::report_loop(dispatcher, session, interval, cancel).await;
        });
        self.task_handle = Some(handle);

        info!("Report scheduler armed");
        Ok(())
    }

    /// Signal the loop to stop. No tick starts after this returns; a report
    /// already in flight is allowed to finish.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Wait for the cancelled loop to finish.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] if nothing was armed, or a
    /// timeout/join error if the task did not wind down cleanly. On timeout
    /// the task is detached, not aborted.
    pub async fn join(&mut self) -> SchedulerResult<()> {
        let handle = self.task_handle.take().ok_or(SchedulerError::NotRunning)?;

        match tokio::time::timeout(JOIN_TIMEOUT, handle).await {
            Ok(Ok(())) => {
                debug!("Report scheduler task finished");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Report scheduler task failed: {}", e);
                Err(SchedulerError::TaskJoinFailed(e.to_string()))
            }
            Err(_) => {
                warn!("Report scheduler task did not complete within timeout");
                Err(SchedulerError::Timeout { seconds: JOIN_TIMEOUT.as_secs() })
            }
        }
    }

    /// Cancel and wait for the loop.
    #[instrument(skip(self))]
    pub async fn disarm(&mut self) -> SchedulerResult<()> {
        if self.task_handle.is_none() {
            return Err(SchedulerError::NotRunning);
        }
        self.cancel();
        self.join().await?;
        info!("Report scheduler disarmed");
        Ok(())
    }

    /// Whether a loop is armed and has not been cancelled
    pub fn is_armed(&self) -> bool {
        self.task_handle.is_some() && !self.cancellation_token.is_cancelled()
    }

    async fn report_loop(
        dispatcher: Arc<ReportDispatcher>,
        session: Session,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Report loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = dispatcher.dispatch(&session).await;
                    debug!(?outcome, "Scheduled report finished");
                }
            }
        }
    }
}

/// Ensure the loop is cancelled when the scheduler is dropped
impl Drop for ReportScheduler {
    fn drop(&mut self) {
        if self.task_handle.is_some() && !self.cancellation_token.is_cancelled() {
            warn!("ReportScheduler dropped while armed; cancelling");
            self.cancellation_token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use devtracker_domain::EditorContext;

    use super::*;
    use crate::testing::{FakeEditor, RecordingReporter, StaticSettings, TokioClock};
    use crate::tracking::ports::Clock;
    use crate::tracking::recorder::ActivityRecorder;

    struct Fixture {
        reporter: Arc<RecordingReporter>,
        editor: Arc<FakeEditor>,
        clock: Arc<TokioClock>,
        dispatcher: Arc<ReportDispatcher>,
    }

    fn fixture() -> Fixture {
        let reporter = Arc::new(RecordingReporter::new());
        let editor = Arc::new(FakeEditor::with_file(EditorContext::new("/w/a.ts", "typescript", 42)));
        let clock = Arc::new(TokioClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()));
        let dispatcher = Arc::new(ReportDispatcher::new(
            ActivityRecorder::default(),
            Arc::new(StaticSettings::with_key("key", "http://collector.test")),
            editor.clone(),
            reporter.clone(),
            clock.clone(),
        ));
        Fixture { reporter, editor, clock, dispatcher }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_every_interval() {
        let fx = fixture();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();
        assert!(scheduler.is_armed());

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(fx.reporter.attempts(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fx.reporter.attempts(), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        let sent = fx.reporter.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0.duration_minutes, 5);
        assert_eq!(sent[1].0.duration_minutes, 10);

        scheduler.disarm().await.unwrap();
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_arm_fails() {
        let fx = fixture();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        let session = Session::begin(fx.clock.now());

        scheduler.arm(fx.dispatcher.clone(), session).unwrap();
        let result = scheduler.arm(fx.dispatcher.clone(), session);
        assert!(matches!(result, Err(SchedulerError::AlreadyRunning)));

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(fx.reporter.attempts(), 1);

        scheduler.disarm().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_disarm() {
        let fx = fixture();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        scheduler.disarm().await.unwrap();

        tokio::time::sleep(Duration::from_secs(900)).await;
        assert_eq!(fx.reporter.attempts(), 0);

        assert!(matches!(scheduler.disarm().await, Err(SchedulerError::NotRunning)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_does_not_stop_loop() {
        let fx = fixture();
        fx.reporter.fail_next(DevTrackerError::Transport("HTTP 503".into()));
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();

        tokio::time::sleep(Duration::from_secs(601)).await;
        assert_eq!(fx.reporter.attempts(), 2);
        assert_eq!(fx.reporter.sent().len(), 1);

        scheduler.disarm().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_without_editor_sends_nothing() {
        let fx = fixture();
        fx.editor.close_file();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(fx.reporter.attempts(), 0);

        scheduler.disarm().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_loop() {
        let fx = fixture();
        {
            let mut scheduler = ReportScheduler::new(SchedulerConfig {
                interval: Duration::from_secs(60),
            });
            scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();
        }

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(fx.reporter.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_after_disarm() {
        let fx = fixture();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();
        scheduler.disarm().await.unwrap();

        scheduler.arm(fx.dispatcher.clone(), Session::begin(fx.clock.now())).unwrap();
        assert!(scheduler.is_armed());
        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(fx.reporter.attempts(), 1);

        scheduler.disarm().await.unwrap();
    }

    #[test]
    fn test_arm_without_runtime_fails() {
        let fx = fixture();
        let mut scheduler = ReportScheduler::new(SchedulerConfig::default());
        let session = Session::begin(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap());

        let result = scheduler.arm(fx.dispatcher.clone(), session);
        assert!(matches!(result, Err(SchedulerError::NoRuntime)));
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn test_error_converts_to_internal() {
        let err: DevTrackerError = SchedulerError::AlreadyRunning.into();
        assert_eq!(err, DevTrackerError::Internal("Scheduler already running".into()));
    }
}
