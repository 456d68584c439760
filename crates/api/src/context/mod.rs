//! Extension context - dependency injection container and lifecycle hooks

use std::sync::{Arc, Weak};
use std::time::Duration;

use devtracker_core::{
    EditorContextProvider, Notifier, SettingsStore, StatusIndicator, TrackingConfig, TrackingDeps,
    TrackingService,
};
use devtracker_domain::{Config, DevTrackerError, DocumentChange, Result, TrackerStatus};
use devtracker_infra::{open_settings_store, HttpActivityReporter, SystemClock};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::commands;
use crate::utils::logging::init_tracing;

/// Edit events buffered before the host's sender starts waiting
const EDIT_EVENT_BUFFER: usize = 256;

const LISTENER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// What the host editor provides
pub struct HostBindings {
    pub editor: Arc<dyn EditorContextProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub status: Arc<dyn StatusIndicator>,
}

struct EditListener {
    sender: mpsc::Sender<DocumentChange>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Extension context - holds all services and dependencies
pub struct ExtensionContext {
    pub config: Config,
    pub settings: Arc<dyn SettingsStore>,
    pub notifier: Arc<dyn Notifier>,
    pub status: Arc<dyn StatusIndicator>,
    pub tracking_service: Arc<TrackingService>,
    listener: Mutex<Option<EditListener>>,
}

impl ExtensionContext {
    /// Wire the production adapters around the host bindings.
    ///
    /// # Errors
    /// Fails when the settings store cannot be opened or the HTTP client
    /// cannot be built.
    pub fn new(bindings: HostBindings, config: Config) -> Result<Self> {
        let settings = open_settings_store(&config)?;
        let reporter = Arc::new(HttpActivityReporter::from_config(&config)?);

        let deps = TrackingDeps {
            settings,
            editor: bindings.editor,
            reporter,
            notifier: bindings.notifier,
            status: bindings.status,
            clock: Arc::new(SystemClock),
        };

        Ok(Self::with_dependencies(config, deps))
    }

    /// Build the context around explicit collaborators.
    pub fn with_dependencies(config: Config, deps: TrackingDeps) -> Self {
        let tracking_service =
            Arc::new(TrackingService::new(deps.clone(), TrackingConfig::from(&config)));

        Self {
            config,
            settings: deps.settings,
            notifier: deps.notifier,
            status: deps.status,
            tracking_service,
            listener: Mutex::new(None),
        }
    }

    /// Lifecycle hook run once the context exists: show `Ready`, start the
    /// edit-event listener, and resume tracking when a key is configured.
    ///
    /// # Errors
    /// `DevTrackerError::Internal` outside a tokio runtime.
    pub async fn activate(self: &Arc<Self>) -> Result<()> {
        self.status.show(TrackerStatus::Ready);
        self.spawn_listener()?;

        if self.settings.api_key().is_some() {
            info!("API key present; starting tracking automatically");
            if let Err(err) = commands::start_tracking(self).await {
                warn!(error = %err, "automatic tracking start failed");
            }
        }

        info!("DevTracker activated");
        Ok(())
    }

    /// Lifecycle hook run before unload: flush and stop the active session,
    /// then stop listening for edits.
    pub async fn deactivate(&self) {
        self.tracking_service.shutdown().await;

        let listener = self.listener.lock().take();
        if let Some(listener) = listener {
            listener.cancel.cancel();
            match tokio::time::timeout(LISTENER_SHUTDOWN_TIMEOUT, listener.handle).await {
                Ok(Ok(())) => debug!("edit listener stopped"),
                Ok(Err(err)) => warn!(error = %err, "edit listener task failed"),
                Err(_) => warn!("edit listener did not stop within timeout"),
            }
        }

        info!("DevTracker deactivated");
    }

    /// Channel the host feeds document-change events into, `None` before
    /// activation or after deactivation.
    pub fn document_events(&self) -> Option<mpsc::Sender<DocumentChange>> {
        self.listener.lock().as_ref().map(|listener| listener.sender.clone())
    }

    fn spawn_listener(self: &Arc<Self>) -> Result<()> {
        let mut slot = self.listener.lock();
        if slot.is_some() {
            return Ok(());
        }

        let runtime = Handle::try_current().map_err(|_| {
            DevTrackerError::Internal("edit listener needs a tokio runtime".into())
        })?;

        let (sender, receiver) = mpsc::channel(EDIT_EVENT_BUFFER);
        let cancel = CancellationToken::new();
        let handle = runtime.spawn(listen_for_edits(Arc::downgrade(self), receiver, cancel.clone()));

        *slot = Some(EditListener { sender, cancel, handle });
        Ok(())
    }
}

async fn listen_for_edits(
    context: Weak<ExtensionContext>,
    mut receiver: mpsc::Receiver<DocumentChange>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("edit listener cancelled");
                break;
            }
            change = receiver.recv() => {
                let Some(change) = change else { break };
                let Some(context) = context.upgrade() else { break };
                commands::on_document_changed(&context, &change);
            }
        }
    }
}

/// Load `.env` from the working directory or its parents, if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => debug!("no .env file found"),
        Err(err) => warn!(error = %err, "could not load .env file"),
    }
}

/// Activate with configuration loaded from `.env`, the environment and
/// config files.
pub async fn activate(bindings: HostBindings) -> Result<Arc<ExtensionContext>> {
    load_dotenv();
    let config = devtracker_infra::config::load()?;
    activate_with_config(bindings, config).await
}

/// Activate with an explicit configuration.
pub async fn activate_with_config(
    bindings: HostBindings,
    config: Config,
) -> Result<Arc<ExtensionContext>> {
    init_tracing(&config.log_filter);

    let context = Arc::new(ExtensionContext::new(bindings, config)?);
    context.activate().await?;
    Ok(context)
}
