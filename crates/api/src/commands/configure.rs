//! API key configuration command

use std::time::Instant;

use devtracker_core::StartOutcome;
use devtracker_domain::constants::{MSG_API_KEY_SAVED, PROMPT_API_KEY, PROMPT_API_KEY_PLACEHOLDER};
use devtracker_domain::Result;
use tracing::info;

use crate::context::ExtensionContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Prompt for an API key, persist it and start tracking.
///
/// Returns `Ok(false)` when the prompt was dismissed or left blank; nothing is
/// stored in that case.
///
/// # Errors
/// Fails when the key cannot be persisted or tracking cannot start.
pub async fn configure_api_key(ctx: &ExtensionContext) -> Result<bool> {
    prompt_and_start(ctx).await.map(|outcome| outcome.is_some())
}

/// Shared by the configure command and the missing-key warning; `None` when
/// the prompt produced no key.
pub(crate) async fn prompt_and_start(ctx: &ExtensionContext) -> Result<Option<StartOutcome>> {
    let command_name = "settings::configure_api_key";
    let start = Instant::now();

    let answer = ctx.notifier.prompt_secret(PROMPT_API_KEY, PROMPT_API_KEY_PLACEHOLDER).await;
    let Some(api_key) = answer.map(|key| key.trim().to_string()).filter(|key| !key.is_empty())
    else {
        info!(command = command_name, "API key prompt dismissed");
        log_command_execution(command_name, start.elapsed(), None);
        return Ok(None);
    };

    let result = save_and_start(ctx, &api_key);
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result.map(Some)
}

fn save_and_start(ctx: &ExtensionContext, api_key: &str) -> Result<StartOutcome> {
    ctx.settings.set_api_key(api_key)?;
    info!("API key saved");
    ctx.notifier.show_info(MSG_API_KEY_SAVED);

    ctx.tracking_service.start()
}
