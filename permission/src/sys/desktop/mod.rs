//! Desktop permission implementation.
//!
//! Desktop systems have no runtime prompt for any capability in the request
//! lists: access is decided by the OS, device node permissions or a sandbox
//! portal before the process starts. Every capability is reported granted.

use crate::{Capability, CapabilitySet, GrantOutcome, PendingGrant};

pub(crate) fn is_granted(_capability: Capability) -> bool {
    true
}

pub(crate) fn request(capabilities: &CapabilitySet) -> PendingGrant {
    PendingGrant::ready(GrantOutcome::uniform(capabilities, true))
}
