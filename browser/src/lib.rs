//! Embedded browser surface for the catchat shell.
//!
//! [`BrowserHost`] owns the surface the remote page renders in. It applies a
//! fixed option set, binds the home and video-chat triggers to their URLs,
//! grants every media request raised by page content and hands page-opened
//! windows to the platform browser.

#![warn(missing_docs)]

mod host;
mod navigation;
mod settings;

/// Platform-specific implementations.
pub mod sys;

pub use host::{
    BrowserHost, BrowserState, BrowserSurface, ExternalBrowser, SystemBrowser, WebResource,
};
pub use navigation::{HOME_URL, NavigationTargets, Trigger, VIDEO_CHAT_URL};
pub use settings::{BrowserSettings, MixedContentMode};

/// Errors raised by the browser surface or the external browser handoff.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// The embedded surface rejected a call.
    #[error("browser surface error: {0}")]
    Surface(String),
    /// The external browser could not be started.
    #[error("external browser handoff failed: {0}")]
    External(#[from] catchat_system::SystemError),
}
