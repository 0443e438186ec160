use std::collections::HashMap;

use log::warn;

use crate::{GrantOutcome, GrantRequest, PendingGrant, pending};

/// Batches waiting for the platform's result callback, keyed by request code.
///
/// Request codes are 16 bits wide, as activity request codes must be. They
/// wrap around and skip any code still waiting.
#[derive(Debug)]
pub struct InFlightBatches {
    next_code: u16,
    batches: HashMap<u16, GrantRequest>,
}

impl Default for InFlightBatches {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightBatches {
    /// An empty table; the first batch gets code 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_code: 1,
            batches: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn starting_at(next_code: u16) -> Self {
        Self {
            next_code,
            batches: HashMap::new(),
        }
    }

    /// Register a new batch and return its request code and result future.
    ///
    /// If all 65536 codes are waiting, the code at the cursor is reused and
    /// its earlier waiter sees the batch cancelled.
    pub fn issue(&mut self) -> (i32, PendingGrant) {
        let mut code = self.next_code;
        for _ in 0..=u16::MAX {
            if !self.batches.contains_key(&code) {
                break;
            }
            code = code.wrapping_add(1);
        }
        self.next_code = code.wrapping_add(1);

        let (request, pending) = pending();
        if self.batches.insert(code, request).is_some() {
            warn!("request code {code} reused while still waiting");
        }
        (i32::from(code), pending)
    }

    /// Drop the batch for `request_code` so its waiter sees it cancelled.
    pub fn cancel(&mut self, request_code: i32) {
        if let Some(code) = Self::slot(request_code) {
            self.batches.remove(&code);
        }
    }

    /// Complete the batch for `request_code` from the callback's arrays.
    ///
    /// Returns `false` when no batch was waiting on that code.
    pub fn deliver(
        &mut self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) -> bool {
        let Some(request) = Self::slot(request_code).and_then(|code| self.batches.remove(&code))
        else {
            warn!("permission result for unknown request code {request_code}");
            return false;
        };
        request.complete(GrantOutcome::from_platform(permissions, grant_results));
        true
    }

    /// Number of batches still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether no batch is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    fn slot(request_code: i32) -> Option<u16> {
        u16::try_from(request_code).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, PERMISSION_GRANTED, PermissionError};

    fn camera() -> Vec<String> {
        vec![Capability::Camera.manifest_name().to_string()]
    }

    #[tokio::test]
    async fn result_reaches_the_batch_with_its_code() {
        let mut table = InFlightBatches::new();
        let (first, first_pending) = table.issue();
        let (second, second_pending) = table.issue();
        assert_ne!(first, second);

        assert!(table.deliver(second, &camera(), &[-1]));
        assert!(table.deliver(first, &camera(), &[PERMISSION_GRANTED]));
        assert!(table.is_empty());

        assert!(first_pending.await.unwrap().all_granted());
        assert_eq!(
            second_pending.await.unwrap().get(Capability::Camera),
            Some(false)
        );
    }

    #[test]
    fn unknown_code_is_not_delivered() {
        let mut table = InFlightBatches::new();
        let (code, _pending) = table.issue();

        assert!(!table.deliver(code + 1, &camera(), &[PERMISSION_GRANTED]));
        assert!(!table.deliver(-1, &camera(), &[PERMISSION_GRANTED]));
        assert!(!table.deliver(0x1_0000 + code, &camera(), &[PERMISSION_GRANTED]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn a_code_is_delivered_at_most_once() {
        let mut table = InFlightBatches::new();
        let (code, _pending) = table.issue();
        assert!(table.deliver(code, &camera(), &[PERMISSION_GRANTED]));
        assert!(!table.deliver(code, &camera(), &[PERMISSION_GRANTED]));
    }

    #[test]
    fn codes_wrap_within_sixteen_bits() {
        let mut table = InFlightBatches::starting_at(u16::MAX);
        let (last, _a) = table.issue();
        let (wrapped, _b) = table.issue();
        assert_eq!(last, 0xFFFF);
        assert_eq!(wrapped, 0);
    }

    #[test]
    fn wrapping_skips_codes_still_waiting() {
        let mut table = InFlightBatches::starting_at(u16::MAX);
        let (held, _held) = table.issue();
        let (zero, _zero) = table.issue();
        assert_eq!((held, zero), (0xFFFF, 0));

        table.next_code = u16::MAX;
        let (next, _next) = table.issue();
        assert_eq!(next, 1);
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn cancelled_batch_resolves_as_cancelled() {
        let mut table = InFlightBatches::new();
        let (code, pending) = table.issue();
        table.cancel(code);
        assert!(table.is_empty());
        assert_eq!(pending.await, Err(PermissionError::Cancelled));
    }

    #[tokio::test]
    async fn empty_callback_resolves_with_an_empty_outcome() {
        let mut table = InFlightBatches::new();
        let (code, pending) = table.issue();
        assert!(table.deliver(code, &[], &[]));
        assert!(pending.await.unwrap().is_empty());
    }
}
