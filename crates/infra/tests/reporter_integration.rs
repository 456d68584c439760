//! End-to-end reporting through the HTTP reporter and the file settings store

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use devtracker_core::testing::{FakeEditor, RecordingNotifier, RecordingStatus};
use devtracker_core::{ReportOutcome, SettingsStore, TrackingConfig, TrackingDeps, TrackingService};
use devtracker_domain::EditorContext;
use devtracker_infra::{FileSettingsStore, HttpActivityReporter, SystemClock};
use tempfile::tempdir;

fn deps(config: &devtracker_domain::Config, settings: Arc<FileSettingsStore>) -> TrackingDeps {
    let editor = FakeEditor::with_file(EditorContext::new("/workspace/src/a.ts", "typescript", 42));
    editor.set_workspace_root("/workspace");

    TrackingDeps {
        settings,
        editor: Arc::new(editor),
        reporter: Arc::new(HttpActivityReporter::from_config(config).unwrap()),
        notifier: Arc::new(RecordingNotifier::new()),
        status: Arc::new(RecordingStatus::new()),
        clock: Arc::new(SystemClock),
    }
}

#[tokio::test]
async fn stop_flushes_one_post_to_collector() {
    let server = support::collector(200).await;
    let dir = tempdir().unwrap();
    let config = support::config_for(&server, &dir);
    let settings = Arc::new(FileSettingsStore::from_config(&config).unwrap());
    settings.set_api_key("integration-key").unwrap();

    let tracker = TrackingService::new(deps(&config, settings), TrackingConfig::from(&config));
    tracker.start().unwrap();
    let outcome = tracker.stop().await;

    assert_eq!(outcome, Some(ReportOutcome::Sent));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("x-api-key").unwrap(), "integration-key");

    let body = &support::received_bodies(&server).await[0];
    assert_eq!(body["ideType"], "VSCODE");
    assert_eq!(body["fileName"], "/workspace/src/a.ts");
    assert_eq!(body["projectPath"], "/workspace");
    assert_eq!(body["activityType"], "FILE_EDIT");
    assert_eq!(body["duration"], 0);
    assert_eq!(body["language"], "typescript");
    assert_eq!(body["linesChanged"], 42);
    let sent_at = chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).unwrap();
    assert!(sent_at <= Utc::now());
}

#[tokio::test]
async fn collector_errors_do_not_stop_the_loop() {
    let server = support::collector(500).await;
    let dir = tempdir().unwrap();
    let config = support::config_for(&server, &dir);
    let settings = Arc::new(FileSettingsStore::from_config(&config).unwrap());
    settings.set_api_key("k").unwrap();

    let tracking = TrackingConfig { interval: Duration::from_millis(100), ..TrackingConfig::from(&config) };
    let tracker = TrackingService::new(deps(&config, settings), tracking);
    tracker.start().unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while server.received_requests().await.unwrap().len() < 2 {
        assert!(tokio::time::Instant::now() < deadline, "scheduler stopped after a failed send");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(tracker.is_active());

    let outcome = tracker.stop().await;
    assert!(matches!(outcome, Some(ReportOutcome::Failed(_))));
}

#[tokio::test]
async fn unreachable_collector_is_a_failed_outcome() {
    let dir = tempdir().unwrap();
    let mut config = support::config_at(&support::closed_port_url(), &dir);
    config.request_timeout_seconds = 2;

    let settings = Arc::new(FileSettingsStore::from_config(&config).unwrap());
    settings.set_api_key("k").unwrap();

    let tracker = TrackingService::new(deps(&config, settings), TrackingConfig::from(&config));
    tracker.start().unwrap();

    let outcome = tracker.stop().await;
    assert!(matches!(
        outcome,
        Some(ReportOutcome::Failed(devtracker_domain::DevTrackerError::Network(_)))
    ));
}
