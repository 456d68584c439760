//! Integration tests for the collector wire contract
//!
//! The collector accepts payloads produced by the editor extension; these
//! tests pin that shape from outside the crate.

use chrono::{TimeZone, Utc};
use devtracker_domain::{ActivitySnapshot, ActivityType, Credentials, IdeType};

#[test]
fn test_accepts_payload_as_sent_by_editor_extension() {
    let payload = r#"{
        "ideType": "VSCODE",
        "fileName": "/home/dev/project/src/a.ts",
        "projectPath": "",
        "activityType": "FILE_EDIT",
        "duration": 5,
        "language": "typescript",
        "linesChanged": 42,
        "timestamp": "2026-10-19T09:05:00.000Z"
    }"#;

    let snapshot: ActivitySnapshot = serde_json::from_str(payload).unwrap();

    assert_eq!(snapshot.ide_type, IdeType::VsCode);
    assert_eq!(snapshot.activity_type, ActivityType::FileEdit);
    assert_eq!(snapshot.duration_minutes, 5);
    assert_eq!(snapshot.line_count, 42);
    assert!(snapshot.project_path.is_empty());
    assert_eq!(snapshot.timestamp, Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 0).unwrap());
}

#[test]
fn test_rejects_unknown_activity_type() {
    let payload = r#"{
        "ideType": "VSCODE",
        "fileName": "/a.ts",
        "projectPath": "",
        "activityType": "FILE_DELETE",
        "duration": 0,
        "language": "typescript",
        "linesChanged": 1,
        "timestamp": "2026-10-19T09:05:00.000Z"
    }"#;

    assert!(serde_json::from_str::<ActivitySnapshot>(payload).is_err());
}

#[test]
fn test_endpoint_for_server_without_trailing_slash() {
    let creds = Credentials::new("key", "http://127.0.0.1:9000");
    assert_eq!(creds.activity_endpoint(), "http://127.0.0.1:9000/api/v1/ide/activity");
}
