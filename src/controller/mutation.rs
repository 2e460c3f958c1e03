//! Mutation bookkeeping shared by the controllers: the busy state machine,
//! confirmation gating, and outcomes.

use crate::error::SdkError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// `Idle → Submitting → Refreshing → Idle`, or `Submitting → Idle` on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPhase {
    #[default]
    Idle,
    Submitting,
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Edit,
    Delete,
    MarkSold,
    AddToWishlist,
    RemoveFromWishlist,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Create => "listing creation",
            MutationKind::Edit => "listing update",
            MutationKind::Delete => "listing deletion",
            MutationKind::MarkSold => "mark as sold",
            MutationKind::AddToWishlist => "wishlist add",
            MutationKind::RemoveFromWishlist => "wishlist removal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    phase: MutationPhase,
    kind: Option<MutationKind>,
}

/// One controller's in-flight mutation, if any.
///
/// The phase is owned by the [`MutationGuard`] that [`begin`](Self::begin)
/// hands out. Dropping the guard, including by dropping the future that
/// holds it, puts the state back to `Idle`.
#[derive(Debug, Default)]
pub struct MutationState {
    slot: Arc<Mutex<Slot>>,
}

impl MutationState {
    fn read(&self) -> Slot {
        *lock(&self.slot)
    }

    pub fn phase(&self) -> MutationPhase {
        self.read().phase
    }

    pub fn kind(&self) -> Option<MutationKind> {
        self.read().kind
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != MutationPhase::Idle
    }

    /// Enter `Submitting`, or fail with `Busy` if anything is in flight.
    pub(crate) fn begin(&self, kind: MutationKind) -> Result<MutationGuard, SdkError> {
        let mut slot = lock(&self.slot);
        if let Some(current) = slot.kind.filter(|_| slot.phase != MutationPhase::Idle) {
            return Err(SdkError::Busy(current.label()));
        }
        *slot = Slot {
            phase: MutationPhase::Submitting,
            kind: Some(kind),
        };
        Ok(MutationGuard {
            slot: Arc::clone(&self.slot),
        })
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds a mutation in flight. Back to `Idle` on drop.
#[derive(Debug)]
pub(crate) struct MutationGuard {
    slot: Arc<Mutex<Slot>>,
}

impl MutationGuard {
    pub(crate) fn refreshing(&self) {
        lock(&self.slot).phase = MutationPhase::Refreshing;
    }
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        *lock(&self.slot) = Slot::default();
    }
}

/// An id waiting for the user to confirm a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation<T> {
    pending: Option<T>,
}

impl<T> Default for PendingConfirmation<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> PendingConfirmation<T> {
    /// Open the confirmation for `value`, replacing any earlier request.
    pub fn request(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Close the confirmation without acting.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Take the value to act on; the confirmation is closed either way.
    pub fn take(&mut self) -> Result<T, SdkError> {
        self.pending.take().ok_or(SdkError::NoPendingConfirmation)
    }

    pub fn get(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

/// Result of a mutation the backend accepted.
#[derive(Debug)]
pub enum MutationOutcome {
    /// The follow-up refetch succeeded; caches match the backend.
    Refreshed,
    /// The mutation went through but the follow-up refetch failed. The local
    /// patch stays until the next successful fetch.
    RefreshFailed(SdkError),
}

impl MutationOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, MutationOutcome::Refreshed)
    }
}

impl From<Result<(), SdkError>> for MutationOutcome {
    fn from(refresh: Result<(), SdkError>) -> Self {
        match refresh {
            Ok(()) => MutationOutcome::Refreshed,
            Err(e) => {
                tracing::warn!("Refetch after mutation failed: {}", e);
                MutationOutcome::RefreshFailed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_rejects_while_busy() {
        let state = MutationState::default();
        let guard = state.begin(MutationKind::Delete).unwrap();
        assert_eq!(state.kind(), Some(MutationKind::Delete));
        assert!(matches!(
            state.begin(MutationKind::Edit),
            Err(SdkError::Busy("listing deletion"))
        ));
        guard.refreshing();
        assert_eq!(state.phase(), MutationPhase::Refreshing);
        assert!(state.begin(MutationKind::Edit).is_err());
        drop(guard);
        assert!(state.begin(MutationKind::Edit).is_ok());
    }

    #[test]
    fn test_dropped_guard_returns_to_idle() {
        let state = MutationState::default();
        {
            let _guard = state.begin(MutationKind::MarkSold).unwrap();
            assert!(state.is_busy());
        }
        assert_eq!(state.phase(), MutationPhase::Idle);
        assert_eq!(state.kind(), None);
    }

    #[test]
    fn test_pending_confirmation_lifecycle() {
        let mut pending = PendingConfirmation::default();
        assert!(matches!(pending.take(), Err(SdkError::NoPendingConfirmation)));
        pending.request("a");
        pending.request("b");
        assert_eq!(pending.get(), Some(&"b"));
        assert_eq!(pending.take().unwrap(), "b");
        assert!(!pending.is_open());
        pending.request("c");
        assert_eq!(pending.cancel(), Some("c"));
        assert!(!pending.is_open());
    }
}
