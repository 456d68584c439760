//! Activity snapshot and editor context types
//!
//! [`ActivitySnapshot`] is the body of one collector report. Its serde shape is
//! the wire contract: camelCase field names, except `duration` (whole minutes)
//! and `linesChanged` (total line count of the focused document, not a diff).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::impl_wire_enum_conversions;

/// Editor family reported in `ideType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdeType {
    #[default]
    #[serde(rename = "VSCODE")]
    VsCode,
}

impl_wire_enum_conversions!(IdeType {
    VsCode => "VSCODE",
});

/// Kind of activity being reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[default]
    FileEdit,
}

impl_wire_enum_conversions!(ActivityType {
    FileEdit => "FILE_EDIT",
});

/// The document currently focused in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorContext {
    /// Absolute path of the document.
    pub path: String,
    /// Editor language identifier (`typescript`, `rust`, ...).
    pub language_id: String,
    /// Total number of lines in the document.
    pub line_count: u32,
}

impl EditorContext {
    /// Convenience constructor.
    pub fn new(path: impl Into<String>, language_id: impl Into<String>, line_count: u32) -> Self {
        Self { path: path.into(), language_id: language_id.into(), line_count }
    }
}

/// Edit event delivered by the host when a document's content changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChange {
    pub path: String,
}

impl DocumentChange {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// One immutable activity record, ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnapshot {
    pub ide_type: IdeType,
    pub file_name: String,
    /// Workspace root, empty when the editor has no folder open.
    pub project_path: String,
    pub activity_type: ActivityType,
    /// Whole minutes since the session started.
    #[serde(rename = "duration")]
    pub duration_minutes: u64,
    pub language: String,
    #[serde(rename = "linesChanged")]
    pub line_count: u32,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub timestamp: DateTime<Utc>,
}

fn serialize_iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
