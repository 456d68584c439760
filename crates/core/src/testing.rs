//! In-memory fakes for the tracking ports
//!
//! Enabled for this crate's tests and, through the `test-utils` feature, for
//! the infra and api crates' tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devtracker_domain::{
    ActivitySnapshot, Credentials, DevTrackerError, EditorContext, Result, TrackerStatus,
};
use parking_lot::Mutex;

use crate::tracking::ports::{
    ActivityReporter, Clock, EditorContextProvider, Notifier, SettingsStore, StatusIndicator,
};
use crate::tracking::TrackingDeps;

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Clock that follows tokio's (possibly paused) time, anchored at `origin`
pub struct TokioClock {
    origin: DateTime<Utc>,
    anchor: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self { origin, anchor: tokio::time::Instant::now() }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now().saturating_duration_since(self.anchor);
        self.origin + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero())
    }
}

/// Settings held in memory
pub struct StaticSettings {
    api_key: Mutex<Option<String>>,
    server_url: Mutex<String>,
}

impl StaticSettings {
    pub fn with_key(api_key: &str, server_url: &str) -> Self {
        Self {
            api_key: Mutex::new(Some(api_key.to_string())),
            server_url: Mutex::new(server_url.to_string()),
        }
    }

    pub fn without_key(server_url: &str) -> Self {
        Self { api_key: Mutex::new(None), server_url: Mutex::new(server_url.to_string()) }
    }

    pub fn clear_api_key(&self) {
        *self.api_key.lock() = None;
    }

    pub fn set_server_url(&self, server_url: &str) {
        *self.server_url.lock() = server_url.to_string();
    }
}

impl SettingsStore for StaticSettings {
    fn api_key(&self) -> Option<String> {
        self.api_key.lock().clone().filter(|key| !key.is_empty())
    }

    fn server_url(&self) -> String {
        self.server_url.lock().clone()
    }

    fn set_api_key(&self, api_key: &str) -> Result<()> {
        *self.api_key.lock() = Some(api_key.to_string());
        Ok(())
    }
}

/// Editor with a settable focused document
#[derive(Default)]
pub struct FakeEditor {
    file: Mutex<Option<EditorContext>>,
    workspace_root: Mutex<Option<String>>,
}

impl FakeEditor {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_file(file: EditorContext) -> Self {
        Self { file: Mutex::new(Some(file)), workspace_root: Mutex::new(None) }
    }

    pub fn open(&self, file: EditorContext) {
        *self.file.lock() = Some(file);
    }

    pub fn close_file(&self) {
        *self.file.lock() = None;
    }

    pub fn set_workspace_root(&self, root: &str) {
        *self.workspace_root.lock() = Some(root.to_string());
    }
}

impl EditorContextProvider for FakeEditor {
    fn current_file(&self) -> Option<EditorContext> {
        self.file.lock().clone()
    }

    fn workspace_root(&self) -> Option<String> {
        self.workspace_root.lock().clone()
    }
}

/// Reporter that records every successful send and can be scripted to fail
/// or to take a while
#[derive(Default)]
pub struct RecordingReporter {
    sent: Mutex<Vec<(ActivitySnapshot, Credentials)>>,
    failures: Mutex<VecDeque<DevTrackerError>>,
    attempts: AtomicUsize,
    latency: Mutex<Option<Duration>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `send` fail with `err`. Calls queue up.
    pub fn fail_next(&self, err: DevTrackerError) {
        self.failures.lock().push_back(err);
    }

    /// Make every later `send` wait `latency` (tokio time) before completing
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    pub fn sent(&self) -> Vec<(ActivitySnapshot, Credentials)> {
        self.sent.lock().clone()
    }

    /// Number of `send` calls, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityReporter for RecordingReporter {
    async fn send(&self, snapshot: &ActivitySnapshot, credentials: &Credentials) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(err) = self.failures.lock().pop_front() {
            return Err(err);
        }
        self.sent.lock().push((snapshot.clone(), credentials.clone()));
        Ok(())
    }
}

/// Notifier that records messages and answers prompts from a script
#[derive(Default)]
pub struct RecordingNotifier {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<(String, Vec<String>)>>,
    prompts: Mutex<Vec<(String, String)>>,
    warning_choice: Mutex<Option<String>>,
    secret_answer: Mutex<Option<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action the user picks on the next warning
    pub fn choose(&self, action: &str) {
        *self.warning_choice.lock() = Some(action.to_string());
    }

    /// Value the user types into the next secret prompt
    pub fn answer_secret(&self, value: &str) {
        *self.secret_answer.lock() = Some(value.to_string());
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().clone()
    }

    pub fn warnings(&self) -> Vec<(String, Vec<String>)> {
        self.warnings.lock().clone()
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().clone()
    }

    pub fn info_count(&self, message: &str) -> usize {
        self.infos.lock().iter().filter(|m| m.as_str() == message).count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn show_info(&self, message: &str) {
        self.infos.lock().push(message.to_string());
    }

    async fn show_warning(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.warnings
            .lock()
            .push((message.to_string(), actions.iter().map(|a| a.to_string()).collect()));
        self.warning_choice.lock().take()
    }

    async fn prompt_secret(&self, prompt: &str, placeholder: &str) -> Option<String> {
        self.prompts.lock().push((prompt.to_string(), placeholder.to_string()));
        self.secret_answer.lock().take()
    }
}

/// Status indicator that keeps its full history
#[derive(Default)]
pub struct RecordingStatus {
    history: Mutex<Vec<TrackerStatus>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<TrackerStatus> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<TrackerStatus> {
        self.history.lock().last().copied()
    }
}

impl StatusIndicator for RecordingStatus {
    fn show(&self, status: TrackerStatus) {
        self.history.lock().push(status);
    }
}

/// Every fake wired together, with handles kept for assertions
pub struct Harness {
    pub settings: Arc<StaticSettings>,
    pub editor: Arc<FakeEditor>,
    pub reporter: Arc<RecordingReporter>,
    pub notifier: Arc<RecordingNotifier>,
    pub status: Arc<RecordingStatus>,
    pub clock: Arc<dyn Clock>,
}

impl Harness {
    /// Harness with an API key and `a.ts` (typescript, 42 lines) focused
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            settings: Arc::new(StaticSettings::with_key("test-api-key", "http://collector.test")),
            editor: Arc::new(FakeEditor::with_file(EditorContext::new(
                "/workspace/src/a.ts",
                "typescript",
                42,
            ))),
            reporter: Arc::new(RecordingReporter::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            status: Arc::new(RecordingStatus::new()),
            clock,
        }
    }

    pub fn deps(&self) -> TrackingDeps {
        TrackingDeps {
            settings: self.settings.clone(),
            editor: self.editor.clone(),
            reporter: self.reporter.clone(),
            notifier: self.notifier.clone(),
            status: self.status.clone(),
            clock: self.clock.clone(),
        }
    }
}
