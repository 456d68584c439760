//! Tracking service - the session state machine
//!
//! `Idle` is both the initial and the terminal state. `Stopping` covers the
//! disarm and final flush of a stop; no new session can begin until it ends.
//! All transitions go through one `parking_lot` mutex that is never held
//! across an `.await`.

use std::sync::Arc;
use std::time::Duration;

use devtracker_domain::constants::{MSG_TRACKING_STARTED, MSG_TRACKING_STOPPED};
use devtracker_domain::{Config, DevTrackerError, IdeType, Result, Session, TrackerStatus};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::dispatcher::{ReportDispatcher, ReportOutcome};
use super::ports::{
    ActivityReporter, Clock, EditorContextProvider, Notifier, SettingsStore, StatusIndicator,
};
use super::recorder::ActivityRecorder;
use super::scheduler::{ReportScheduler, SchedulerConfig};

/// Collaborators the tracking service talks to
#[derive(Clone)]
pub struct TrackingDeps {
    pub settings: Arc<dyn SettingsStore>,
    pub editor: Arc<dyn EditorContextProvider>,
    pub reporter: Arc<dyn ActivityReporter>,
    pub notifier: Arc<dyn Notifier>,
    pub status: Arc<dyn StatusIndicator>,
    pub clock: Arc<dyn Clock>,
}

/// Tracking configuration
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Report cadence while a session is active
    pub interval: Duration,
    pub ide_type: IdeType,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TrackingConfig {
    fn from(config: &Config) -> Self {
        Self { interval: config.report_interval(), ide_type: config.ide_type }
    }
}

/// Result of a `start` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session was already running; nothing changed.
    AlreadyActive,
    /// The previous session is still flushing its final report; nothing
    /// changed. Start again once the stop has finished.
    StopInProgress,
}

enum TrackingState {
    Idle,
    Active { session: Session, scheduler: ReportScheduler },
    Stopping,
}

/// Moves `Stopping` back to `Idle` when a stop completes or is dropped
struct StoppingGuard<'a> {
    state: &'a Mutex<TrackingState>,
}

impl Drop for StoppingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if matches!(*state, TrackingState::Stopping) {
            *state = TrackingState::Idle;
        }
    }
}

/// Owns the tracking session and its report scheduler
pub struct TrackingService {
    dispatcher: Arc<ReportDispatcher>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    status: Arc<dyn StatusIndicator>,
    clock: Arc<dyn Clock>,
    scheduler_config: SchedulerConfig,
    state: Mutex<TrackingState>,
}

impl TrackingService {
    pub fn new(deps: TrackingDeps, config: TrackingConfig) -> Self {
        let dispatcher = Arc::new(ReportDispatcher::new(
            ActivityRecorder::new(config.ide_type),
            deps.settings.clone(),
            deps.editor,
            deps.reporter,
            deps.clock.clone(),
        ));

        Self {
            dispatcher,
            settings: deps.settings,
            notifier: deps.notifier,
            status: deps.status,
            clock: deps.clock,
            scheduler_config: SchedulerConfig { interval: config.interval },
            state: Mutex::new(TrackingState::Idle),
        }
    }

    /// Begin a session and arm the report scheduler.
    ///
    /// A second call while active is a no-op and emits nothing.
    ///
    /// # Errors
    ///
    /// [`DevTrackerError::MissingCredential`] when no API key is configured;
    /// the service stays idle. Scheduler failures surface as
    /// [`DevTrackerError::Internal`].
    #[instrument(skip(self))]
    pub fn start(&self) -> Result<StartOutcome> {
        let session = {
            let mut state = self.state.lock();
            match *state {
                TrackingState::Active { .. } => {
                    debug!("Tracking already active; ignoring start");
                    return Ok(StartOutcome::AlreadyActive);
                }
                TrackingState::Stopping => {
                    debug!("Previous session still stopping; ignoring start");
                    return Ok(StartOutcome::StopInProgress);
                }
                TrackingState::Idle => {}
            }

            let has_key = self.settings.api_key().is_some_and(|key| !key.trim().is_empty());
            if !has_key {
                warn!("Cannot start tracking without an API key");
                return Err(DevTrackerError::MissingCredential);
            }

            let session = Session::begin(self.clock.now());
            let mut scheduler = ReportScheduler::new(self.scheduler_config.clone());
            scheduler.arm(Arc::clone(&self.dispatcher), session)?;

            *state = TrackingState::Active { session, scheduler };
            session
        };

        info!(started_at = %session.started_at, "Time tracking started");
        self.status.show(TrackerStatus::Tracking);
        self.notifier.show_info(MSG_TRACKING_STARTED);

        Ok(StartOutcome::Started)
    }

    /// Record an edit event. Returns `false` (and does nothing) while idle.
    pub fn record_activity(&self) -> bool {
        let now = self.clock.now();
        let minutes = {
            let mut state = self.state.lock();
            match &mut *state {
                TrackingState::Active { session, .. } => {
                    session.touch(now);
                    session.elapsed_minutes(now)
                }
                TrackingState::Idle | TrackingState::Stopping => return false,
            }
        };

        self.status.show(TrackerStatus::Elapsed(minutes));
        true
    }

    /// End the session: disarm the scheduler, then send one final report.
    ///
    /// Returns `None` when not active. The state is `Stopping` from the
    /// first line of the call until the flush is done, so concurrent stops
    /// cannot flush twice and a concurrent start cannot begin a session that
    /// this stop would then report as stopped. A report already in flight
    /// from the scheduler is not cancelled.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Option<ReportOutcome> {
        let (session, mut scheduler) = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, TrackingState::Stopping) {
                TrackingState::Active { session, scheduler } => (session, scheduler),
                other => {
                    debug!("Tracking not active; ignoring stop");
                    *state = other;
                    return None;
                }
            }
        };
        let stopping = StoppingGuard { state: &self.state };

        if let Err(err) = scheduler.disarm().await {
            warn!(error = %err, "Report scheduler did not shut down cleanly");
        }

        let outcome = self.dispatcher.dispatch(&session).await;

        info!(
            duration_minutes = session.elapsed_minutes(self.clock.now()),
            sent = matches!(outcome, ReportOutcome::Sent),
            "Time tracking stopped"
        );
        self.status.show(TrackerStatus::Stopped);
        self.notifier.show_info(MSG_TRACKING_STOPPED);
        drop(stopping);

        Some(outcome)
    }

    /// Stop any active session before the host unloads.
    pub async fn shutdown(&self) {
        if self.stop().await.is_some() {
            debug!("Active session flushed during shutdown");
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.state.lock(), TrackingState::Active { .. })
    }

    /// Copy of the current session, `None` while idle
    pub fn session(&self) -> Option<Session> {
        match &*self.state.lock() {
            TrackingState::Active { session, .. } => Some(*session),
            TrackingState::Idle | TrackingState::Stopping => None,
        }
    }
}
