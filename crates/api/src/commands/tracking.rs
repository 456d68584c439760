//! Activity tracking commands

use std::time::Instant;

use devtracker_core::{ReportOutcome, StartOutcome};
use devtracker_domain::constants::{ACTION_CONFIGURE, MSG_API_KEY_MISSING};
use devtracker_domain::{DevTrackerError, DocumentChange, Result};
use tracing::{debug, info};

use super::configure::prompt_and_start;
use crate::context::ExtensionContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Start time tracking.
///
/// Without an API key the user is warned and offered `Configure`; choosing it
/// runs the [`configure_api_key`](super::configure_api_key) flow and returns
/// its outcome. Dismissing the warning or the prompt returns
/// `MissingCredential`.
pub async fn start_tracking(ctx: &ExtensionContext) -> Result<StartOutcome> {
    let command_name = "tracking::start_tracking";
    let start = Instant::now();

    info!(command = command_name, "Starting time tracking");
    let result = ctx.tracking_service.start();
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));

    if matches!(result, Err(DevTrackerError::MissingCredential)) {
        let selection = ctx.notifier.show_warning(MSG_API_KEY_MISSING, &[ACTION_CONFIGURE]).await;
        if selection.as_deref() == Some(ACTION_CONFIGURE) {
            if let Some(outcome) = prompt_and_start(ctx).await? {
                return Ok(outcome);
            }
        }
    }

    result
}

/// Stop time tracking, flushing one final report.
///
/// Returns `None` when tracking was not active.
pub async fn stop_tracking(ctx: &ExtensionContext) -> Option<ReportOutcome> {
    let command_name = "tracking::stop_tracking";
    let start = Instant::now();

    info!(command = command_name, "Stopping time tracking");
    let outcome = ctx.tracking_service.stop().await;
    let error_type = match &outcome {
        Some(ReportOutcome::Failed(err)) => Some(error_label(err)),
        _ => None,
    };
    log_command_execution(command_name, start.elapsed(), error_type);

    outcome
}

/// Edit event from the host. Returns whether a session recorded it.
pub fn on_document_changed(ctx: &ExtensionContext, change: &DocumentChange) -> bool {
    let recorded = ctx.tracking_service.record_activity();
    debug!(path = %change.path, recorded, "document changed");
    recorded
}
