use catchat_browser::BrowserError;
use catchat_dialog::DialogError;
use catchat_permission::PermissionError;
use catchat_system::SystemError;

/// Errors surfaced by the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The configuration file is not valid JSON for [`ShellConfig`](crate::ShellConfig).
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The permission batch ended without a result.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// The browser surface failed.
    #[error(transparent)]
    Browser(#[from] BrowserError),
    /// A dialog failed.
    #[error(transparent)]
    Dialog(#[from] DialogError),
    /// A platform call failed.
    #[error(transparent)]
    System(#[from] SystemError),
}
