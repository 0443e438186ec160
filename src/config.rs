use std::path::Path;

use catchat_browser::NavigationTargets;
use catchat_permission::CapabilityProfile;
use serde::{Deserialize, Serialize};

use crate::ShellError;

/// Package identifier of the shipped app.
pub const DEFAULT_PACKAGE_ID: &str = "com.teslakitty.catchat";

/// Static configuration of the screen, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// URLs bound to the home and video-chat triggers.
    #[serde(flatten)]
    pub targets: NavigationTargets,
    /// Identifier the settings screen is opened for.
    pub package_id: String,
    /// Which capability list to request.
    pub profile: CapabilityProfile,
}

impl ShellConfig {
    /// Parse a JSON configuration. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`ShellError::Config`] for malformed JSON or unknown profile names.
    pub fn from_json(json: &str) -> Result<Self, ShellError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ShellError::Io`] if the file cannot be read, or
    /// [`ShellError::Config`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref();
        log::debug!("loading shell config from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            targets: NavigationTargets::default(),
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            profile: CapabilityProfile::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catchat_browser::{HOME_URL, VIDEO_CHAT_URL};

    #[test]
    fn empty_object_is_the_default_screen() {
        let config = ShellConfig::from_json("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.targets.home, HOME_URL);
        assert_eq!(config.targets.video_chat, VIDEO_CHAT_URL);
        assert_eq!(config.package_id, DEFAULT_PACKAGE_ID);
    }

    #[test]
    fn keys_override_defaults() {
        let config = ShellConfig::from_json(
            r#"{"home":"https://staging.example/","profile":"reduced","package_id":"org.example"}"#,
        )
        .unwrap();
        assert_eq!(config.targets.home, "https://staging.example/");
        assert_eq!(config.targets.video_chat, VIDEO_CHAT_URL);
        assert_eq!(config.profile, CapabilityProfile::Reduced);
        assert_eq!(config.package_id, "org.example");
    }

    #[test]
    fn bad_profile_is_rejected() {
        assert!(matches!(
            ShellConfig::from_json(r#"{"profile":"everything"}"#),
            Err(ShellError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ShellConfig::load("/nonexistent/catchat.json"),
            Err(ShellError::Io(_))
        ));
    }
}
