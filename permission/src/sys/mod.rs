//! Platform-specific permission implementations.

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
mod desktop;

#[cfg(target_os = "android")]
pub(crate) use android::{is_granted, request};

#[cfg(not(target_os = "android"))]
pub(crate) use desktop::{is_granted, request};
