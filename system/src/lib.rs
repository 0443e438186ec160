//! Platform services the shell hands work off to.
//!
//! Opening a URL in the default browser, jumping to the app's settings
//! screen, closing the current screen and asking which platform version is
//! running.

#![warn(missing_docs)]

mod sys;

#[cfg(target_os = "android")]
pub use sys::android;

/// Errors that can occur when calling into the platform.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// The URL cannot be handed to the platform.
    #[error("invalid url: {0:?}")]
    InvalidUrl(String),
    /// The platform context has not been initialised yet.
    #[error("platform context not initialised")]
    NotInitialized,
    /// The operation has no counterpart on this platform.
    #[error("not supported on this platform: {0}")]
    NotSupported(&'static str),
    /// Launching a helper process failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A JNI call failed.
    #[cfg(target_os = "android")]
    #[error("jni error: {0}")]
    Jni(#[from] jni::errors::Error),
}

/// Hand `url` to the platform's default browser.
///
/// The URL is passed on exactly as given.
///
/// # Errors
/// Returns [`SystemError::InvalidUrl`] unless [`check_url`] accepts `url`, or
/// the platform error if the launch fails.
pub fn open_url(url: &str) -> Result<(), SystemError> {
    check_url(url)?;
    log::info!("opening {url} in the external browser");
    sys::open_url(url)
}

/// Accept only absolute `http`/`https` URLs free of whitespace and control
/// characters.
///
/// # Errors
/// Returns [`SystemError::InvalidUrl`] for anything else.
pub fn check_url(url: &str) -> Result<(), SystemError> {
    let invalid = || SystemError::InvalidUrl(url.to_string());
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }
    let parsed = url::Url::parse(url).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}

/// Open the application-details settings screen for `package_id`.
///
/// # Errors
/// Returns [`SystemError::NotSupported`] on platforms without such a screen.
pub fn open_app_settings(package_id: &str) -> Result<(), SystemError> {
    log::info!("opening settings for {package_id}");
    sys::open_app_settings(&settings_uri(package_id))
}

/// Close the current screen.
///
/// # Errors
/// Returns the platform error if the screen could not be closed.
pub fn finish_screen() -> Result<(), SystemError> {
    sys::finish_screen()
}

/// The platform API level, if the platform versions its permission set.
#[must_use]
pub fn platform_version() -> Option<u32> {
    sys::platform_version()
}

/// The running application's package identifier, when the platform has one.
#[must_use]
pub fn package_name() -> Option<String> {
    sys::package_name()
}

/// The data URI the settings screen is opened with.
#[must_use]
pub fn settings_uri(package_id: &str) -> String {
    format!("package:{package_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_uri_uses_package_scheme() {
        assert_eq!(
            settings_uri("com.teslakitty.catchat"),
            "package:com.teslakitty.catchat"
        );
    }

    #[test]
    fn rejects_urls_that_look_like_flags() {
        assert!(matches!(open_url(""), Err(SystemError::InvalidUrl(_))));
        assert!(matches!(open_url("   "), Err(SystemError::InvalidUrl(_))));
        assert!(matches!(
            open_url("--new-window"),
            Err(SystemError::InvalidUrl(_))
        ));
    }

    #[test]
    fn only_web_schemes_are_handed_off() {
        assert!(check_url("https://x.example/?a=1&b=2").is_ok());
        assert!(check_url("http://x.example/path|with^meta<chars>").is_ok());
        assert!(check_url("HTTPS://X.EXAMPLE/").is_ok());

        for url in [
            "file:///etc/passwd",
            "javascript:alert(1)",
            "intent://scan/#Intent;scheme=zxing;end",
            "x.example/no-scheme",
        ] {
            assert!(
                matches!(check_url(url), Err(SystemError::InvalidUrl(ref u)) if u == url),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn surrounding_or_embedded_whitespace_is_rejected_not_trimmed() {
        for url in [
            " https://x.example/",
            "https://x.example/ ",
            "https://x.example/\n",
            "https://x.example/a b",
            "https://x.example/\tcalc",
        ] {
            assert!(
                matches!(open_url(url), Err(SystemError::InvalidUrl(ref u)) if u == url),
                "{url:?} should be rejected as given"
            );
        }
    }
}
