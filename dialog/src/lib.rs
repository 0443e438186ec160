//! Native choice dialogs and transient toasts.

#![warn(missing_docs)]

mod error;

/// Platform-specific implementations.
pub mod sys;

pub use error::DialogError;

/// Types of dialogs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogType {
    /// Information dialog.
    #[default]
    Info,
    /// Warning dialog.
    Warning,
    /// Error dialog.
    Error,
}

/// A modal dialog offering a confirm and a cancel action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Title of the dialog.
    pub title: String,
    /// Message content of the dialog.
    pub message: String,
    /// Label of the confirming button.
    pub confirm_label: String,
    /// Label of the dismissing button.
    pub cancel_label: String,
    /// Type/Icon of the dialog.
    pub type_: DialogType,
}

impl Dialog {
    /// Create a new dialog with OK/Cancel buttons and the Info type.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            type_: DialogType::Info,
        }
    }

    /// Replace the button labels.
    #[must_use]
    pub fn with_buttons(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Set the dialog type.
    #[must_use]
    pub fn with_type(mut self, type_: DialogType) -> Self {
        self.type_ = type_;
        self
    }

    /// Show the dialog and wait for the user's choice.
    ///
    /// Returns `true` for the confirm action, `false` for cancel.
    ///
    /// # Errors
    /// Returns an error if the native dialog cannot be shown or is torn down
    /// without a choice.
    pub async fn show_confirm(self) -> Result<bool, DialogError> {
        sys::show_confirm(self).await
    }
}

/// How long a toast stays on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastDuration {
    /// About two seconds.
    #[default]
    Short,
    /// About three and a half seconds.
    Long,
}

impl ToastDuration {
    /// Display time in milliseconds.
    #[must_use]
    pub const fn millis(self) -> u32 {
        match self {
            Self::Short => 2000,
            Self::Long => 3500,
        }
    }
}

/// A short, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text to show.
    pub message: String,
    /// How long to show it.
    pub duration: ToastDuration,
}

impl Toast {
    /// Create a short toast.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: ToastDuration::Short,
        }
    }

    /// Set the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: ToastDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Show the toast. Returns without waiting for it to disappear.
    ///
    /// # Errors
    /// Returns an error if the platform refuses to show it.
    pub fn show(self) -> Result<(), DialogError> {
        sys::show_toast(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_defaults_to_ok_cancel() {
        let dialog = Dialog::new("Title", "Body");
        assert_eq!(dialog.confirm_label, "OK");
        assert_eq!(dialog.cancel_label, "Cancel");
        assert_eq!(dialog.type_, DialogType::Info);
    }

    #[test]
    fn builders_replace_fields() {
        let dialog = Dialog::new("Permissions Required", "Grant them")
            .with_buttons("Go to Settings", "Cancel")
            .with_type(DialogType::Warning);
        assert_eq!(dialog.confirm_label, "Go to Settings");
        assert_eq!(dialog.type_, DialogType::Warning);

        let toast = Toast::new("done").with_duration(ToastDuration::Long);
        assert_eq!(toast.duration.millis(), 3500);
        assert_eq!(Toast::new("x").duration, ToastDuration::Short);
    }
}
