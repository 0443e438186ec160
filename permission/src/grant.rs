use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use log::{debug, warn};

use crate::{Capability, CapabilitySet, PermissionError};

/// `PackageManager.PERMISSION_GRANTED`; every other code is a denial.
pub const PERMISSION_GRANTED: i32 = 0;

/// Per-capability granted/denied result of one request batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantOutcome {
    results: BTreeMap<Capability, bool>,
}

impl GrantOutcome {
    /// An outcome with no results, as reported when the platform abandons the prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An outcome giving the same answer for every capability in `capabilities`.
    #[must_use]
    pub fn uniform(capabilities: &CapabilitySet, granted: bool) -> Self {
        capabilities.iter().map(|c| (c, granted)).collect()
    }

    /// Decode the parallel arrays of a platform result callback.
    ///
    /// `permissions[i]` is answered by `grant_results[i]`. Names that are not
    /// capabilities are skipped. A name without a result code counts as
    /// denied, and result codes without a name are ignored. A capability
    /// reported more than once is granted only if every report grants it.
    #[must_use]
    pub fn from_platform(permissions: &[String], grant_results: &[i32]) -> Self {
        if permissions.len() != grant_results.len() {
            warn!(
                "{} permissions reported with {} results",
                permissions.len(),
                grant_results.len()
            );
        }

        let mut outcome = Self::new();
        for (i, name) in permissions.iter().enumerate() {
            let Some(capability) = Capability::from_manifest_name(name) else {
                warn!("ignoring result for unrequested permission {name}");
                continue;
            };
            let granted = grant_results.get(i) == Some(&PERMISSION_GRANTED);
            outcome
                .results
                .entry(capability)
                .and_modify(|held| *held &= granted)
                .or_insert(granted);
        }
        outcome
    }

    /// Record the result for one capability.
    pub fn record(&mut self, capability: Capability, granted: bool) {
        self.results.insert(capability, granted);
    }

    /// The recorded result for `capability`, if the platform reported one.
    #[must_use]
    pub fn get(&self, capability: Capability) -> Option<bool> {
        self.results.get(&capability).copied()
    }

    /// True only when there is at least one result and every result is a grant.
    #[must_use]
    pub fn all_granted(&self) -> bool {
        !self.results.is_empty() && self.results.values().all(|granted| *granted)
    }

    /// Capabilities of `requested` that were denied or never reported.
    #[must_use]
    pub fn denied_of(&self, requested: &CapabilitySet) -> Vec<Capability> {
        requested
            .iter()
            .filter(|c| self.get(*c) != Some(true))
            .collect()
    }

    /// Number of recorded results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the recorded results.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        self.results.iter().map(|(c, g)| (*c, *g))
    }
}

impl FromIterator<(Capability, bool)> for GrantOutcome {
    fn from_iter<T: IntoIterator<Item = (Capability, bool)>>(iter: T) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// Create a linked request/result pair for one batch.
///
/// The platform side keeps the [`GrantRequest`] and completes it when the
/// result callback fires; the caller awaits the [`PendingGrant`].
#[must_use]
pub fn pending() -> (GrantRequest, PendingGrant) {
    let (tx, rx) = oneshot::channel();
    (GrantRequest { tx }, PendingGrant { rx })
}

/// Sender half of a batch. Completing it consumes it, so a batch resolves at most once.
#[derive(Debug)]
pub struct GrantRequest {
    tx: oneshot::Sender<GrantOutcome>,
}

impl GrantRequest {
    /// Deliver the outcome to whoever awaits the batch.
    pub fn complete(self, outcome: GrantOutcome) {
        if self.tx.send(outcome).is_err() {
            debug!("grant outcome delivered after the waiter went away");
        }
    }
}

/// A batch whose result has not been delivered yet.
///
/// Resolves to [`PermissionError::Cancelled`] if the [`GrantRequest`] is
/// dropped without being completed.
#[derive(Debug)]
#[must_use = "a pending grant does nothing unless awaited"]
pub struct PendingGrant {
    rx: oneshot::Receiver<GrantOutcome>,
}

impl PendingGrant {
    /// A batch that is already resolved, for platforms that answer synchronously.
    pub fn ready(outcome: GrantOutcome) -> Self {
        let (request, pending) = pending();
        request.complete(outcome);
        pending
    }

    /// A batch that resolves to [`PermissionError::Cancelled`].
    pub fn cancelled() -> Self {
        let (_, pending) = pending();
        pending
    }
}

impl Future for PendingGrant {
    type Output = Result<GrantOutcome, PermissionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| PermissionError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outcome_is_not_all_granted() {
        assert!(!GrantOutcome::new().all_granted());
    }

    #[test]
    fn unreported_capabilities_count_as_denied() {
        let requested = CapabilitySet::new([Capability::Camera, Capability::RecordAudio]);
        let outcome: GrantOutcome = [(Capability::Camera, true)].into_iter().collect();
        assert!(outcome.all_granted());
        assert_eq!(outcome.denied_of(&requested), vec![Capability::RecordAudio]);
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn platform_arrays_decode_pairwise() {
        let outcome = GrantOutcome::from_platform(
            &names(&["android.permission.CAMERA", "android.permission.RECORD_AUDIO"]),
            &[PERMISSION_GRANTED, -1],
        );
        assert_eq!(outcome.get(Capability::Camera), Some(true));
        assert_eq!(outcome.get(Capability::RecordAudio), Some(false));
        assert!(!outcome.all_granted());
    }

    #[test]
    fn unknown_permission_names_are_skipped() {
        let outcome = GrantOutcome::from_platform(
            &names(&["com.vendor.permission.MAGIC", "android.permission.CAMERA"]),
            &[-1, PERMISSION_GRANTED],
        );
        assert_eq!(outcome.len(), 1);
        assert!(outcome.all_granted());
    }

    #[test]
    fn name_without_a_result_code_is_denied() {
        let outcome = GrantOutcome::from_platform(
            &names(&["android.permission.CAMERA", "android.permission.RECORD_AUDIO"]),
            &[PERMISSION_GRANTED],
        );
        assert_eq!(outcome.get(Capability::RecordAudio), Some(false));
        assert!(!outcome.all_granted());
    }

    #[test]
    fn result_codes_without_a_name_are_ignored() {
        let outcome = GrantOutcome::from_platform(
            &names(&["android.permission.CAMERA"]),
            &[PERMISSION_GRANTED, -1, -1],
        );
        assert_eq!(outcome.len(), 1);
        assert!(outcome.all_granted());
    }

    #[test]
    fn repeated_name_is_granted_only_if_every_report_grants() {
        let outcome = GrantOutcome::from_platform(
            &names(&["android.permission.CAMERA", "android.permission.CAMERA"]),
            &[-1, PERMISSION_GRANTED],
        );
        assert_eq!(outcome.get(Capability::Camera), Some(false));
    }

    #[test]
    fn empty_platform_arrays_give_an_empty_outcome() {
        assert!(GrantOutcome::from_platform(&[], &[]).is_empty());
    }

    #[tokio::test]
    async fn completed_request_resolves_once() {
        let (request, pending) = pending();
        let outcome: GrantOutcome = [(Capability::Camera, false)].into_iter().collect();
        request.complete(outcome.clone());
        assert_eq!(pending.await, Ok(outcome));
    }

    #[tokio::test]
    async fn dropped_request_is_cancelled() {
        let (request, pending) = pending();
        drop(request);
        assert_eq!(pending.await, Err(PermissionError::Cancelled));
        assert_eq!(PendingGrant::cancelled().await, Err(PermissionError::Cancelled));
    }
}
