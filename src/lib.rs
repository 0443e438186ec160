//! # catchat
//!
//! A single-screen shell that hosts the catchat web app in an embedded
//! browser and asks the platform for the device permissions the page needs.
//!
//! The pieces live in their own crates and are re-exported here:
//!
//! - [`permission`]: capability lists and the permission gate.
//! - [`browser`]: the browser surface, navigation triggers and popup handoff.
//! - [`dialog`]: the denial dialog and the confirmation toast.
//! - [`system`]: external browser, settings screen and platform queries.
//!
//! [`MainScreen`] ties them together the way the app's only screen does.
//!
//! ```no_run
//! use catchat::{MainScreen, NativeUi, ShellConfig};
//! use catchat::browser::{BrowserError, BrowserSettings, BrowserSurface, SystemBrowser, Trigger};
//! use catchat::permission::PlatformStore;
//!
//! struct Headless;
//!
//! impl BrowserSurface for Headless {
//!     fn apply_settings(&mut self, _: &BrowserSettings) -> Result<(), BrowserError> { Ok(()) }
//!     fn load_url(&mut self, url: &str) -> Result<(), BrowserError> {
//!         println!("loading {url}");
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<(), catchat::ShellError> {
//! let (mut screen, prompt) = MainScreen::launch(
//!     ShellConfig::default(),
//!     Headless,
//!     SystemBrowser,
//!     PlatformStore,
//!     catchat::system::platform_version(),
//! )?;
//! screen.press(Trigger::VideoChat)?;
//! prompt.run(&NativeUi).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod shell;
mod ui;

#[cfg(target_os = "android")]
pub mod android;

pub use catchat_browser as browser;
pub use catchat_dialog as dialog;
pub use catchat_permission as permission;
pub use catchat_system as system;

pub use config::{DEFAULT_PACKAGE_ID, ShellConfig};
pub use error::ShellError;
pub use shell::{
    CANCEL_LABEL, DENIED_MESSAGE, DENIED_TITLE, GRANTED_MESSAGE, MainScreen, OPEN_SETTINGS_LABEL,
    PermissionFlow, PermissionPrompt, denied_dialog,
};
pub use ui::{NativeUi, ShellUi};
