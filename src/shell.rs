use catchat_browser::{BrowserHost, BrowserSurface, ExternalBrowser, Trigger, WebResource};
use catchat_dialog::{Dialog, DialogError, DialogType};
use catchat_permission::{
    CapabilitySet, GateCheck, GateDecision, PermissionGate, PermissionStore,
};
use log::info;

use crate::{ShellConfig, ShellError, ShellUi};

/// Toast shown when the whole batch was granted.
pub const GRANTED_MESSAGE: &str = "All permissions granted";
/// Title of the denial dialog.
pub const DENIED_TITLE: &str = "Permissions Required";
/// Body of the denial dialog.
pub const DENIED_MESSAGE: &str =
    "This app requires all permissions to function properly. Please grant them in the app settings.";
/// Confirm button of the denial dialog.
pub const OPEN_SETTINGS_LABEL: &str = "Go to Settings";
/// Dismiss button of the denial dialog.
pub const CANCEL_LABEL: &str = "Cancel";

/// How the permission flow ended for this launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionFlow {
    /// Nothing was missing and nothing was shown.
    AlreadyGranted,
    /// The user granted everything; a confirmation was shown.
    Confirmed,
    /// The user chose to fix permissions in settings; the screen was closed.
    OpenedSettings,
    /// The user dismissed the dialog; the app runs with what it has.
    Dismissed,
}

/// The denial dialog.
#[must_use]
pub fn denied_dialog() -> Dialog {
    Dialog::new(DENIED_TITLE, DENIED_MESSAGE)
        .with_buttons(OPEN_SETTINGS_LABEL, CANCEL_LABEL)
        .with_type(DialogType::Warning)
}

/// The permission half of a launch: a gate whose batch may already be in flight.
#[derive(Debug)]
pub struct PermissionPrompt<P> {
    gate: PermissionGate<P>,
    check: GateCheck,
    package_id: String,
}

impl<P: PermissionStore> PermissionPrompt<P> {
    /// Check the gate now, issuing the batch if anything is missing.
    pub fn start(gate: PermissionGate<P>, package_id: impl Into<String>) -> Self {
        let check = gate.check();
        Self {
            gate,
            check,
            package_id: package_id.into(),
        }
    }

    /// The gate being run.
    pub const fn gate(&self) -> &PermissionGate<P> {
        &self.gate
    }

    /// Wait for the batch and react to it.
    ///
    /// A full grant shows a toast. Any denial shows the blocking dialog:
    /// "Go to Settings" opens the app's settings and closes the screen,
    /// "Cancel" leaves the app as it is. Nothing is retried.
    ///
    /// # Errors
    /// Returns an error if the batch is cancelled, the dialog fails, or the
    /// settings screen cannot be opened.
    pub async fn run<U: ShellUi>(self, ui: &U) -> Result<PermissionFlow, ShellError> {
        match self.gate.resolve(self.check).await? {
            GateDecision::AlreadyGranted => Ok(PermissionFlow::AlreadyGranted),
            GateDecision::Confirmed => {
                ui.show_toast(GRANTED_MESSAGE);
                Ok(PermissionFlow::Confirmed)
            }
            GateDecision::SettingsRequired { .. } => match ui.confirm(denied_dialog()).await {
                Ok(true) => {
                    ui.open_settings(&self.package_id)?;
                    ui.finish()?;
                    Ok(PermissionFlow::OpenedSettings)
                }
                Ok(false) | Err(DialogError::Cancelled) => {
                    info!("permission dialog dismissed; continuing without the denied capabilities");
                    Ok(PermissionFlow::Dismissed)
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// The single screen: a browser host plus the config it was built from.
#[derive(Debug)]
pub struct MainScreen<S, E> {
    host: BrowserHost<S, E>,
    config: ShellConfig,
}

impl<S: BrowserSurface, E: ExternalBrowser> MainScreen<S, E> {
    /// Bring the screen up.
    ///
    /// The permission check runs first and its batch, if any, is issued
    /// before the surface is touched. The surface is then configured and
    /// starts loading home without waiting for the batch. Drive the returned
    /// [`PermissionPrompt`] to react to the result.
    ///
    /// # Errors
    /// Returns the browser error if the surface cannot be configured or loaded.
    pub fn launch<P: PermissionStore>(
        config: ShellConfig,
        surface: S,
        external: E,
        store: P,
        api_level: Option<u32>,
    ) -> Result<(Self, PermissionPrompt<P>), ShellError> {
        let capabilities = CapabilitySet::for_platform(config.profile, api_level);
        info!(
            "launching with {} capabilities ({:?} profile, api level {api_level:?})",
            capabilities.len(),
            config.profile
        );
        let prompt = PermissionPrompt::start(
            PermissionGate::new(store, capabilities),
            config.package_id.clone(),
        );
        let host = BrowserHost::open(surface, external, config.targets.clone())?;
        Ok((Self { host, config }, prompt))
    }

    /// One of the two navigation buttons was pressed.
    ///
    /// # Errors
    /// Returns the browser error if the surface rejects the load.
    pub fn press(&mut self, trigger: Trigger) -> Result<(), ShellError> {
        Ok(self.host.navigate(trigger)?)
    }

    /// The surface finished loading `url`.
    pub fn page_finished(&mut self, url: &str) {
        self.host.page_finished(url);
    }

    /// The page asked for a new window. Returns whether it was handled in-surface.
    pub fn on_popup(&self, target_url: &str) -> bool {
        self.host.on_popup(target_url)
    }

    /// The page asked for device resources. Returns the resources to grant.
    pub fn on_permission_request(&self, resources: Vec<WebResource>) -> Vec<WebResource> {
        self.host.on_permission_request(resources)
    }

    /// The browser host.
    pub const fn host(&self) -> &BrowserHost<S, E> {
        &self.host
    }

    /// The configuration the screen was launched with.
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }
}
