//! Host commands - editor to tracker bridge

mod configure;
mod tracking;

pub use configure::*;
use devtracker_domain::{impl_wire_enum_conversions, DevTrackerError, Result};
pub use tracking::*;

use crate::context::ExtensionContext;

/// Commands registered with the host editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    StartTracking,
    StopTracking,
    /// Also bound to a click on the status indicator.
    Configure,
}

impl_wire_enum_conversions!(HostCommand {
    StartTracking => "devtracker.startTracking",
    StopTracking => "devtracker.stopTracking",
    Configure => "devtracker.configure",
});

impl HostCommand {
    pub const ALL: [HostCommand; 3] = [Self::StartTracking, Self::StopTracking, Self::Configure];

    /// Parse a host command identifier.
    ///
    /// # Errors
    /// `DevTrackerError::InvalidInput` naming the registered identifiers.
    pub fn from_id(id: &str) -> Result<Self> {
        id.parse().map_err(|_| {
            let known: Vec<String> = Self::ALL.iter().map(ToString::to_string).collect();
            DevTrackerError::InvalidInput(format!(
                "unknown command '{}'; expected one of {}",
                id,
                known.join(", ")
            ))
        })
    }
}

/// Run a registered command by value.
///
/// A missing API key on start is already surfaced to the user, so it is not
/// reported as a failure here.
pub async fn run_command(ctx: &ExtensionContext, command: HostCommand) -> Result<()> {
    match command {
        HostCommand::StartTracking => match start_tracking(ctx).await {
            Ok(_) | Err(DevTrackerError::MissingCredential) => Ok(()),
            Err(err) => Err(err),
        },
        HostCommand::StopTracking => {
            stop_tracking(ctx).await;
            Ok(())
        }
        HostCommand::Configure => configure_api_key(ctx).await.map(|_| ()),
    }
}

/// Run a command by the identifier the host registered it under.
///
/// # Errors
/// `DevTrackerError::InvalidInput` for an unknown identifier, otherwise as
/// [`run_command`].
pub async fn run_command_id(ctx: &ExtensionContext, id: &str) -> Result<()> {
    let command = HostCommand::from_id(id)?;
    run_command(ctx, command).await
}
