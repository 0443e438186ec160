//! Capability bookkeeping and batched permission requests.
//!
//! The shell asks the platform for a fixed [`CapabilitySet`] once at launch.
//! [`PermissionGate`] answers whether every capability is already held and,
//! when one is missing, issues a single batched request whose result arrives
//! later through a [`PendingGrant`].
//!
//! ```no_run
//! use catchat_permission::{CapabilityProfile, CapabilitySet, GateDecision, PermissionGate, PlatformStore};
//!
//! async fn launch() {
//!     let capabilities = CapabilitySet::for_platform(CapabilityProfile::Reduced, Some(34));
//!     let gate = PermissionGate::new(PlatformStore, capabilities);
//!     match gate.run().await {
//!         Ok(GateDecision::SettingsRequired { denied }) => println!("missing: {denied:?}"),
//!         Ok(_) => println!("ready"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod capability;
mod gate;
mod grant;
mod inflight;

/// Platform-specific implementations.
pub mod sys;

pub use capability::{Capability, CapabilityProfile, CapabilitySet};
pub use gate::{
    GateCheck, GateDecision, PermissionGate, PermissionStore, PlatformStore, has_all_granted,
};
pub use grant::{GrantOutcome, GrantRequest, PERMISSION_GRANTED, PendingGrant, pending};
pub use inflight::InFlightBatches;

/// Errors that can occur when requesting permissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The batch was dropped before the platform delivered a result.
    #[error("permission request was cancelled before completion")]
    Cancelled,
}
