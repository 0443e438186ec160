use log::{info, warn};

use crate::{Capability, CapabilitySet, GrantOutcome, PendingGrant, PermissionError, sys};

/// Read and write access to a platform permission store.
pub trait PermissionStore {
    /// Whether `capability` is currently granted. Must reflect the store at call time.
    fn is_granted(&self, capability: Capability) -> bool;

    /// Issue one batched request for `capabilities`.
    fn request(&self, capabilities: &CapabilitySet) -> PendingGrant;
}

impl<S: PermissionStore + ?Sized> PermissionStore for &S {
    fn is_granted(&self, capability: Capability) -> bool {
        (**self).is_granted(capability)
    }

    fn request(&self, capabilities: &CapabilitySet) -> PendingGrant {
        (**self).request(capabilities)
    }
}

/// The permission store of the platform the crate is compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformStore;

impl PermissionStore for PlatformStore {
    fn is_granted(&self, capability: Capability) -> bool {
        sys::is_granted(capability)
    }

    fn request(&self, capabilities: &CapabilitySet) -> PendingGrant {
        sys::request(capabilities)
    }
}

/// True iff every capability in `capabilities` is granted in `store` right now.
pub fn has_all_granted<S, I>(store: &S, capabilities: I) -> bool
where
    S: PermissionStore + ?Sized,
    I: IntoIterator<Item = Capability>,
{
    capabilities.into_iter().all(|c| store.is_granted(c))
}

/// What the gate concluded for the current launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Everything was already held, nothing was asked.
    AlreadyGranted,
    /// The user granted the whole batch.
    Confirmed,
    /// At least one capability is missing; the user has to visit settings.
    SettingsRequired {
        /// The capabilities that were denied or not reported.
        denied: Vec<Capability>,
    },
}

impl GateDecision {
    /// All-or-nothing reading of a batch result.
    #[must_use]
    pub fn from_outcome(requested: &CapabilitySet, outcome: &GrantOutcome) -> Self {
        let denied = outcome.denied_of(requested);
        if outcome.all_granted() && denied.is_empty() {
            Self::Confirmed
        } else {
            Self::SettingsRequired { denied }
        }
    }
}

/// Where the gate stands after the synchronous check.
#[derive(Debug)]
pub enum GateCheck {
    /// Everything is held; nothing was asked.
    Satisfied,
    /// A batch was issued and its result is pending.
    Requested(PendingGrant),
}

/// Checks and requests a fixed capability set against a store.
#[derive(Debug)]
pub struct PermissionGate<S> {
    store: S,
    capabilities: CapabilitySet,
}

impl<S: PermissionStore> PermissionGate<S> {
    /// Create a gate over `store` for `capabilities`.
    pub const fn new(store: S, capabilities: CapabilitySet) -> Self {
        Self {
            store,
            capabilities,
        }
    }

    /// The capability set this gate guards.
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Whether every capability is granted at query time.
    pub fn has_all_granted(&self) -> bool {
        has_all_granted(&self.store, &self.capabilities)
    }

    /// Ask for the whole set in one batch.
    pub fn request_all(&self) -> PendingGrant {
        info!(
            "requesting {} capabilities in one batch",
            self.capabilities.len()
        );
        self.store.request(&self.capabilities)
    }

    /// The synchronous half of [`run`](Self::run): query the store and, if
    /// anything is missing, issue the batch.
    pub fn check(&self) -> GateCheck {
        if self.has_all_granted() {
            info!("all capabilities already granted");
            GateCheck::Satisfied
        } else {
            GateCheck::Requested(self.request_all())
        }
    }

    /// Wait for the batch issued by [`check`](Self::check) and classify it.
    ///
    /// # Errors
    /// Returns [`PermissionError::Cancelled`] if the platform drops the batch.
    pub async fn resolve(&self, check: GateCheck) -> Result<GateDecision, PermissionError> {
        let GateCheck::Requested(pending) = check else {
            return Ok(GateDecision::AlreadyGranted);
        };

        let outcome = pending.await?;
        let decision = GateDecision::from_outcome(&self.capabilities, &outcome);
        if let GateDecision::SettingsRequired { denied } = &decision {
            warn!("{} capabilities denied: {denied:?}", denied.len());
        }
        Ok(decision)
    }

    /// Check, request if needed, and classify the result.
    ///
    /// Never prompts when everything is already granted. A denial is final for
    /// this launch: there is no re-check and no second request.
    ///
    /// # Errors
    /// Returns [`PermissionError::Cancelled`] if the platform drops the batch.
    pub async fn run(&self) -> Result<GateDecision, PermissionError> {
        self.resolve(self.check()).await
    }
}
