use std::future::Future;

use catchat_dialog::{Dialog, DialogError, Toast};
use catchat_system::SystemError;
use log::warn;

/// The user-facing effects of the permission flow.
pub trait ShellUi {
    /// Show a transient confirmation.
    fn show_toast(&self, message: &str);

    /// Show a blocking choice; resolves to `true` for the confirm action.
    fn confirm(&self, dialog: Dialog) -> impl Future<Output = Result<bool, DialogError>>;

    /// Open the settings screen of `package_id`.
    ///
    /// # Errors
    /// Returns the platform error if the screen cannot be opened.
    fn open_settings(&self, package_id: &str) -> Result<(), SystemError>;

    /// Close the current screen.
    ///
    /// # Errors
    /// Returns the platform error if the screen cannot be closed.
    fn finish(&self) -> Result<(), SystemError>;
}

/// [`ShellUi`] backed by the platform's dialogs and settings screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeUi;

impl ShellUi for NativeUi {
    fn show_toast(&self, message: &str) {
        if let Err(e) = Toast::new(message).show() {
            warn!("toast {message:?} not shown: {e}");
        }
    }

    fn confirm(&self, dialog: Dialog) -> impl Future<Output = Result<bool, DialogError>> {
        dialog.show_confirm()
    }

    fn open_settings(&self, package_id: &str) -> Result<(), SystemError> {
        catchat_system::open_app_settings(package_id)
    }

    fn finish(&self) -> Result<(), SystemError> {
        catchat_system::finish_screen()
    }
}
