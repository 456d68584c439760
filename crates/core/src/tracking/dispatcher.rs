//! Report dispatch: snapshot → send, with every failure resolved locally.
//!
//! Shared by the scheduler tick and the final flush on stop. Delivery is
//! at-most-once: a snapshot that fails to send is logged and dropped.

use std::sync::Arc;

use devtracker_domain::{DevTrackerError, Session};
use tracing::{debug, error, info, instrument, warn};

use super::ports::{ActivityReporter, Clock, EditorContextProvider, SettingsStore};
use super::recorder::ActivityRecorder;

/// What happened to one report attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The collector accepted the snapshot.
    Sent,
    /// No focused document; nothing was sent.
    SkippedNoEditor,
    /// The API key was cleared after the session started; nothing was sent.
    SkippedNoCredential,
    /// The send was attempted and failed. The snapshot has been discarded.
    Failed(DevTrackerError),
}

impl ReportOutcome {
    /// Whether a request was issued to the collector
    pub fn attempted(&self) -> bool {
        matches!(self, Self::Sent | Self::Failed(_))
    }
}

/// Builds and sends snapshots for a session
pub struct ReportDispatcher {
    recorder: ActivityRecorder,
    settings: Arc<dyn SettingsStore>,
    editor: Arc<dyn EditorContextProvider>,
    reporter: Arc<dyn ActivityReporter>,
    clock: Arc<dyn Clock>,
}

impl ReportDispatcher {
    pub fn new(
        recorder: ActivityRecorder,
        settings: Arc<dyn SettingsStore>,
        editor: Arc<dyn EditorContextProvider>,
        reporter: Arc<dyn ActivityReporter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { recorder, settings, editor, reporter, clock }
    }

    /// Report the current activity of `session`.
    ///
    /// Credentials are read from the settings store on every call. Never
    /// returns an error; the outcome says what happened.
    #[instrument(skip(self, session), fields(started_at = %session.started_at))]
    pub async fn dispatch(&self, session: &Session) -> ReportOutcome {
        let editor = self.editor.current_file();
        let project_path = self.editor.workspace_root();
        let now = self.clock.now();

        let Some(snapshot) =
            self.recorder.build_snapshot(session, editor.as_ref(), project_path.as_deref(), now)
        else {
            debug!("No active editor; skipping activity report");
            return ReportOutcome::SkippedNoEditor;
        };

        let Some(credentials) = self.settings.credentials() else {
            warn!("API key no longer configured; skipping activity report");
            return ReportOutcome::SkippedNoCredential;
        };

        match self.reporter.send(&snapshot, &credentials).await {
            Ok(()) => {
                info!(
                    duration_minutes = snapshot.duration_minutes,
                    language = %snapshot.language,
                    "Activity data sent successfully"
                );
                ReportOutcome::Sent
            }
            Err(err) if err.is_transport() => {
                warn!(error = %err, "Failed to send activity data; snapshot discarded");
                ReportOutcome::Failed(err)
            }
            // Not a delivery problem; retrying on the next tick will not help.
            Err(err) => {
                error!(error = %err, "Activity report rejected before delivery; snapshot discarded");
                ReportOutcome::Failed(err)
            }
        }
    }
}
