use crate::{Dialog, DialogError, DialogType, Toast};
use futures::channel::oneshot;
use notify_rust::{Notification, Timeout};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Show a confirmation dialog with the dialog's own button labels.
///
/// # Errors
/// Returns an error if the dialog thread goes away without answering.
pub async fn show_confirm(dialog: Dialog) -> Result<bool, DialogError> {
    let (tx, rx) = oneshot::channel();

    std::thread::spawn(move || {
        let level = match dialog.type_ {
            DialogType::Info => MessageLevel::Info,
            DialogType::Warning => MessageLevel::Warning,
            DialogType::Error => MessageLevel::Error,
        };

        let result = MessageDialog::new()
            .set_level(level)
            .set_title(&dialog.title)
            .set_description(&dialog.message)
            .set_buttons(MessageButtons::OkCancelCustom(
                dialog.confirm_label.clone(),
                dialog.cancel_label.clone(),
            ))
            .show();

        let confirmed = match result {
            MessageDialogResult::Ok | MessageDialogResult::Yes => true,
            MessageDialogResult::Custom(label) => label == dialog.confirm_label,
            _ => false,
        };

        let _ = tx.send(confirmed);
    });

    rx.await.map_err(|_| DialogError::Cancelled)
}

/// Show a toast as a desktop notification that expires on its own.
///
/// # Errors
/// Returns an error if the notification server rejects it.
pub fn show_toast(toast: &Toast) -> Result<(), DialogError> {
    Notification::new()
        .summary(&toast.message)
        .timeout(Timeout::Milliseconds(toast.duration.millis()))
        .show()
        .map(drop)
        .map_err(|e| DialogError::PlatformError(e.to_string()))
}
