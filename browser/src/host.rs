use log::{debug, info, warn};

use crate::{BrowserError, BrowserSettings, NavigationTargets, Trigger};

/// The embedded component rendering remote web content.
pub trait BrowserSurface {
    /// Apply `settings` before anything is loaded.
    ///
    /// # Errors
    /// Returns [`BrowserError::Surface`] if the component rejects a setting.
    fn apply_settings(&mut self, settings: &BrowserSettings) -> Result<(), BrowserError>;

    /// Replace the current document with `url`.
    ///
    /// # Errors
    /// Returns [`BrowserError::Surface`] if the component rejects the call.
    fn load_url(&mut self, url: &str) -> Result<(), BrowserError>;
}

/// Something that can show a URL outside the embedded surface.
pub trait ExternalBrowser {
    /// Open `url` in a separate browser.
    ///
    /// # Errors
    /// Returns an error if the handoff fails.
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// The platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl ExternalBrowser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        catchat_system::open_url(url)?;
        Ok(())
    }
}

/// What the surface is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    /// `url` was requested and has not finished loading.
    Loading {
        /// The requested document.
        url: String,
    },
    /// The surface finished loading `url`.
    Loaded {
        /// The document the surface reported as finished.
        url: String,
    },
}

impl BrowserState {
    /// The current document, loaded or not.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Loading { url } | Self::Loaded { url } => url,
        }
    }

    /// Whether a load is still in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// A device capability requested by page content at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebResource {
    /// Camera.
    VideoCapture,
    /// Microphone.
    AudioCapture,
    /// Protected media (DRM) identifier.
    ProtectedMediaId,
    /// MIDI system-exclusive messages.
    MidiSysex,
    /// Any resource this crate does not name.
    Other(String),
}

impl WebResource {
    /// Parse a `PermissionRequest.RESOURCE_*` identifier.
    #[must_use]
    pub fn from_platform(id: &str) -> Self {
        match id {
            "android.webkit.resource.VIDEO_CAPTURE" => Self::VideoCapture,
            "android.webkit.resource.AUDIO_CAPTURE" => Self::AudioCapture,
            "android.webkit.resource.PROTECTED_MEDIA_ID" => Self::ProtectedMediaId,
            "android.webkit.resource.MIDI_SYSEX" => Self::MidiSysex,
            other => Self::Other(other.to_string()),
        }
    }

    /// The `PermissionRequest.RESOURCE_*` identifier.
    #[must_use]
    pub fn platform_id(&self) -> &str {
        match self {
            Self::VideoCapture => "android.webkit.resource.VIDEO_CAPTURE",
            Self::AudioCapture => "android.webkit.resource.AUDIO_CAPTURE",
            Self::ProtectedMediaId => "android.webkit.resource.PROTECTED_MEDIA_ID",
            Self::MidiSysex => "android.webkit.resource.MIDI_SYSEX",
            Self::Other(id) => id,
        }
    }
}

/// Owns the browser surface for the lifetime of the screen.
#[derive(Debug)]
pub struct BrowserHost<S, E> {
    surface: S,
    external: E,
    targets: NavigationTargets,
    state: BrowserState,
    // A load that was still pending when a newer one replaced it.
    superseded: Option<String>,
}

impl<S: BrowserSurface, E: ExternalBrowser> BrowserHost<S, E> {
    /// Configure `surface` and start loading the home document.
    ///
    /// # Errors
    /// Returns the surface error if configuring or the first load fails.
    pub fn open(surface: S, external: E, targets: NavigationTargets) -> Result<Self, BrowserError> {
        let mut host = Self {
            surface,
            external,
            state: BrowserState::Loading {
                url: targets.home.clone(),
            },
            targets,
            superseded: None,
        };
        host.configure()?;
        host.navigate(Trigger::Home)?;
        Ok(host)
    }

    /// Apply the fixed option set.
    ///
    /// # Errors
    /// Returns the surface error unchanged.
    pub fn configure(&mut self) -> Result<(), BrowserError> {
        self.surface.apply_settings(&BrowserSettings::shell())
    }

    /// Replace the current document with `url`.
    ///
    /// # Errors
    /// Returns the surface error; the state is left as it was.
    pub fn load(&mut self, url: &str) -> Result<(), BrowserError> {
        debug!("loading {url}");
        self.surface.load_url(url)?;
        let previous = std::mem::replace(
            &mut self.state,
            BrowserState::Loading {
                url: url.to_string(),
            },
        );
        self.superseded = match previous {
            BrowserState::Loading { url: pending } if pending != url => Some(pending),
            _ => None,
        };
        Ok(())
    }

    /// Load the document bound to `trigger`, whatever is showing now.
    ///
    /// # Errors
    /// Returns the surface error unchanged.
    pub fn navigate(&mut self, trigger: Trigger) -> Result<(), BrowserError> {
        info!("{trigger:?} pressed");
        let url = self.targets.url_for(trigger).to_string();
        self.load(&url)
    }

    /// The surface finished loading `url`.
    ///
    /// The reported URL becomes the current document, so redirects are taken
    /// as-is. A late finish for a load that a newer load replaced is ignored.
    pub fn page_finished(&mut self, url: &str) {
        if self.state.is_loading() && self.superseded.as_deref() == Some(url) {
            debug!("ignoring stale finish for {url}");
            return;
        }
        debug!("finished {url}");
        self.superseded = None;
        self.state = BrowserState::Loaded {
            url: url.to_string(),
        };
    }

    /// Answer a media/device request raised by page content.
    ///
    /// Everything asked for is granted, without a prompt. This is separate
    /// from the OS-level permissions of the app.
    pub fn on_permission_request(&self, resources: Vec<WebResource>) -> Vec<WebResource> {
        info!("granting page request for {resources:?}");
        resources
    }

    /// A page asked for a new window on `target_url`.
    ///
    /// The URL goes to the external browser and the surface keeps its
    /// document. Always returns `false`: the window is not handled here.
    pub fn on_popup(&self, target_url: &str) -> bool {
        match self.external.open(target_url) {
            Ok(()) => info!("popup {target_url} handed to the external browser"),
            Err(e) => warn!("popup {target_url} could not be handed off: {e}"),
        }
        false
    }

    /// What the surface is showing.
    pub const fn state(&self) -> &BrowserState {
        &self.state
    }

    /// The current document.
    pub fn current_url(&self) -> &str {
        self.state.url()
    }

    /// The trigger bindings.
    pub const fn targets(&self) -> &NavigationTargets {
        &self.targets
    }

    /// The surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The external browser.
    pub const fn external(&self) -> &E {
        &self.external
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{HOME_URL, MixedContentMode, VIDEO_CHAT_URL};

    #[derive(Default)]
    struct RecordingSurface {
        settings: Option<BrowserSettings>,
        loads: Vec<String>,
        reject_loads: bool,
    }

    impl BrowserSurface for RecordingSurface {
        fn apply_settings(&mut self, settings: &BrowserSettings) -> Result<(), BrowserError> {
            self.settings = Some(*settings);
            Ok(())
        }

        fn load_url(&mut self, url: &str) -> Result<(), BrowserError> {
            if self.reject_loads {
                return Err(BrowserError::Surface("detached".into()));
            }
            self.loads.push(url.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingBrowser {
        opened: RefCell<Vec<String>>,
    }

    impl ExternalBrowser for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), BrowserError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn open_host() -> BrowserHost<RecordingSurface, RecordingBrowser> {
        BrowserHost::open(
            RecordingSurface::default(),
            RecordingBrowser::default(),
            NavigationTargets::default(),
        )
        .unwrap()
    }

    #[test]
    fn open_configures_then_loads_home() {
        let host = open_host();
        let settings = host.surface().settings.unwrap();
        assert!(settings.javascript_enabled);
        assert!(settings.dom_storage_enabled);
        assert!(settings.accept_third_party_cookies);
        assert!(!settings.media_playback_requires_user_gesture);
        assert_eq!(settings.mixed_content, MixedContentMode::Compatibility);
        assert_eq!(host.surface().loads, vec![HOME_URL]);
        assert_eq!(
            host.state(),
            &BrowserState::Loading {
                url: HOME_URL.to_string()
            }
        );
    }

    #[test]
    fn triggers_win_from_any_state() {
        let mut host = open_host();

        host.navigate(Trigger::VideoChat).unwrap();
        assert_eq!(host.current_url(), VIDEO_CHAT_URL);

        host.page_finished(VIDEO_CHAT_URL);
        host.navigate(Trigger::VideoChat).unwrap();
        assert_eq!(host.current_url(), VIDEO_CHAT_URL);
        assert!(host.state().is_loading());

        host.load("https://elsewhere.example/").unwrap();
        host.page_finished("https://elsewhere.example/");
        host.navigate(Trigger::Home).unwrap();
        assert_eq!(host.current_url(), HOME_URL);

        host.navigate(Trigger::Home).unwrap();
        assert_eq!(host.current_url(), HOME_URL);
    }

    #[test]
    fn page_finished_moves_to_loaded() {
        let mut host = open_host();
        host.page_finished(HOME_URL);
        assert_eq!(
            host.state(),
            &BrowserState::Loaded {
                url: HOME_URL.to_string()
            }
        );
    }

    #[test]
    fn stale_finish_from_a_replaced_load_is_ignored() {
        let mut host = open_host();
        host.navigate(Trigger::VideoChat).unwrap();

        host.page_finished(HOME_URL);
        assert_eq!(
            host.state(),
            &BrowserState::Loading {
                url: VIDEO_CHAT_URL.to_string()
            }
        );

        host.page_finished(VIDEO_CHAT_URL);
        assert_eq!(
            host.state(),
            &BrowserState::Loaded {
                url: VIDEO_CHAT_URL.to_string()
            }
        );
    }

    #[test]
    fn redirected_finish_is_taken_as_reported() {
        let mut host = open_host();
        host.navigate(Trigger::VideoChat).unwrap();

        let redirected = "https://catchat-meow.netlify.app/videochat/";
        host.page_finished(redirected);
        assert_eq!(host.current_url(), redirected);
        assert!(!host.state().is_loading());
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut host = open_host();
        host.page_finished(HOME_URL);
        host.surface.reject_loads = true;

        assert!(host.navigate(Trigger::VideoChat).is_err());
        assert_eq!(host.current_url(), HOME_URL);
        assert!(!host.state().is_loading());
    }

    #[test]
    fn popup_goes_to_external_browser() {
        let mut host = open_host();
        host.page_finished(HOME_URL);

        let handled = host.on_popup("https://popup.example/login");

        assert!(!handled);
        assert_eq!(
            *host.external().opened.borrow(),
            vec!["https://popup.example/login"]
        );
        assert_eq!(host.current_url(), HOME_URL);
        assert_eq!(host.surface().loads.len(), 1);
    }

    #[test]
    fn page_permission_requests_are_granted_as_asked() {
        let host = open_host();
        let asked = vec![
            WebResource::VideoCapture,
            WebResource::AudioCapture,
            WebResource::Other("custom".into()),
        ];
        assert_eq!(host.on_permission_request(asked.clone()), asked);
        assert!(host.on_permission_request(Vec::new()).is_empty());
    }

    #[test]
    fn platform_ids_parse() {
        assert_eq!(
            WebResource::from_platform("android.webkit.resource.AUDIO_CAPTURE"),
            WebResource::AudioCapture
        );
        let other = WebResource::from_platform("vendor.thing");
        assert_eq!(other.platform_id(), "vendor.thing");
    }
}
