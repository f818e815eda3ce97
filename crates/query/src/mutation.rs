//! Observable mutation lifecycle flags for the UI.

use std::future::Future;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Tracks one mutation's pending/success/error flags through a watch
/// channel; views subscribe and re-render on change.
#[derive(Debug, Clone)]
pub struct MutationState {
    tx: watch::Sender<MutationStatus>,
}

impl MutationState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(MutationStatus::Idle);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationStatus> {
        self.tx.subscribe()
    }

    pub fn status(&self) -> MutationStatus {
        *self.tx.borrow()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MutationStatus::Pending
    }

    /// Run a mutation future, flipping the flags around it.
    pub async fn track<T, E>(&self, op: impl Future<Output = Result<T, E>>) -> Result<T, E> {
        self.tx.send_replace(MutationStatus::Pending);
        let result = op.await;
        self.tx.send_replace(match result {
            Ok(_) => MutationStatus::Success,
            Err(_) => MutationStatus::Error,
        });
        result
    }
}

impl Default for MutationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn track_flips_through_the_lifecycle() {
        let state = MutationState::new();
        let mut seen = state.subscribe();
        assert_eq!(state.status(), MutationStatus::Idle);

        let result: Result<u32, ()> = state.track(async { Ok(5) }).await;
        assert_eq!(result, Ok(5));
        assert_eq!(state.status(), MutationStatus::Success);
        // the receiver observed the change
        assert!(seen.has_changed().unwrap());

        let result: Result<u32, ()> = state.track(async { Err(()) }).await;
        assert!(result.is_err());
        assert_eq!(state.status(), MutationStatus::Error);
    }
}
