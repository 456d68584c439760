//! Snapshot construction from session and editor state

use chrono::{DateTime, Utc};
use devtracker_domain::{ActivitySnapshot, ActivityType, EditorContext, IdeType, Session};

/// Builds immutable [`ActivitySnapshot`]s. Owns no timers and performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityRecorder {
    ide_type: IdeType,
}

impl ActivityRecorder {
    pub fn new(ide_type: IdeType) -> Self {
        Self { ide_type }
    }

    /// Build the snapshot for `session` at `now`.
    ///
    /// Returns `None` without an editor context; callers skip the report
    /// instead of sending a partial record. The duration is measured from
    /// `session.started_at`, never from the activity watermark.
    pub fn build_snapshot(
        &self,
        session: &Session,
        editor: Option<&EditorContext>,
        project_path: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<ActivitySnapshot> {
        let editor = editor?;

        Some(ActivitySnapshot {
            ide_type: self.ide_type,
            file_name: editor.path.clone(),
            project_path: project_path.unwrap_or_default().to_string(),
            activity_type: ActivityType::FileEdit,
            duration_minutes: session.elapsed_minutes(now),
            language: editor.language_id.clone(),
            line_count: editor.line_count,
            timestamp: now,
        })
    }
}
