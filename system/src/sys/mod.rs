#[cfg(target_os = "android")]
pub mod android;
#[cfg(target_os = "android")]
pub(crate) use android::{finish_screen, open_app_settings, open_url, package_name, platform_version};

#[cfg(not(target_os = "android"))]
mod desktop;
#[cfg(not(target_os = "android"))]
pub(crate) use desktop::{finish_screen, open_app_settings, open_url, package_name, platform_version};
