use thiserror::Error;

/// Errors that can occur when using dialogs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The dialog went away without the user picking an action.
    #[error("Operation cancelled")]
    Cancelled,

    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    PlatformError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_describe_themselves() {
        assert_eq!(DialogError::Cancelled.to_string(), "Operation cancelled");
        assert_eq!(
            DialogError::PlatformError("no display".into()).to_string(),
            "Platform error: no display"
        );
    }
}
