use serde::{Deserialize, Serialize};

/// Landing page of the remote app.
pub const HOME_URL: &str = "https://catchat-meow.netlify.app/";

/// Video-chat page of the remote app.
pub const VIDEO_CHAT_URL: &str = "https://catchat-meow.netlify.app/videochat/index.html";

/// The two navigation buttons of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Go back to the landing page.
    Home,
    /// Open the video-chat page.
    VideoChat,
}

/// URLs the triggers are bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationTargets {
    /// Document loaded at launch and by [`Trigger::Home`].
    pub home: String,
    /// Document loaded by [`Trigger::VideoChat`].
    pub video_chat: String,
}

impl NavigationTargets {
    /// The URL `trigger` navigates to.
    #[must_use]
    pub fn url_for(&self, trigger: Trigger) -> &str {
        match trigger {
            Trigger::Home => &self.home,
            Trigger::VideoChat => &self.video_chat,
        }
    }
}

impl Default for NavigationTargets {
    fn default() -> Self {
        Self {
            home: HOME_URL.to_string(),
            video_chat: VIDEO_CHAT_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_map_to_their_urls() {
        let targets = NavigationTargets::default();
        assert_eq!(targets.url_for(Trigger::Home), HOME_URL);
        assert_eq!(targets.url_for(Trigger::VideoChat), VIDEO_CHAT_URL);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let targets: NavigationTargets =
            serde_json::from_str(r#"{"home":"https://example.org/"}"#).unwrap();
        assert_eq!(targets.home, "https://example.org/");
        assert_eq!(targets.video_chat, VIDEO_CHAT_URL);
    }
}
