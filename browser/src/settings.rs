/// How the surface treats insecure subresources on a secure page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixedContentMode {
    /// Load everything.
    AlwaysAllow,
    /// Block every insecure subresource.
    NeverAllow,
    /// Let the engine decide per resource type, as a regular browser does.
    Compatibility,
}

impl MixedContentMode {
    /// The `WebSettings.MIXED_CONTENT_*` constant.
    #[must_use]
    pub const fn platform_value(self) -> i32 {
        match self {
            Self::AlwaysAllow => 0,
            Self::NeverAllow => 1,
            Self::Compatibility => 2,
        }
    }
}

/// Options applied to the surface before the first load.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrowserSettings {
    /// Run page scripts.
    pub javascript_enabled: bool,
    /// Enable `localStorage` / `sessionStorage`.
    pub dom_storage_enabled: bool,
    /// Let scripts call `window.open` without a user gesture.
    pub javascript_can_open_windows: bool,
    /// Report new-window requests to the host instead of reusing the surface.
    pub support_multiple_windows: bool,
    /// Allow `file://` access.
    pub allow_file_access: bool,
    /// Require a tap before media starts; `false` allows autoplay.
    pub media_playback_requires_user_gesture: bool,
    /// Mixed-content policy.
    pub mixed_content: MixedContentMode,
    /// Accept cookies.
    pub accept_cookies: bool,
    /// Accept cookies set by other origins.
    pub accept_third_party_cookies: bool,
}

impl BrowserSettings {
    /// The one option set the shell runs with.
    #[must_use]
    pub const fn shell() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            javascript_can_open_windows: true,
            support_multiple_windows: true,
            allow_file_access: true,
            media_playback_requires_user_gesture: false,
            mixed_content: MixedContentMode::Compatibility,
            accept_cookies: true,
            accept_third_party_cookies: true,
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self::shell()
    }
}
