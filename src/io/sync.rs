//! Keeps the in-memory sprint state in step with the document store.

use chrono::NaiveDate;

use crate::model::{SprintState, TaskRecord};

use super::identity::Identity;
use super::store::{DocumentStore, StoreError, Subscription};

/// Result of a task-list write
#[derive(Debug)]
pub enum WriteOutcome {
    Written,
    /// No identity attached; nothing was attempted
    Skipped,
    Failed(StoreError),
}

impl WriteOutcome {
    pub fn into_result(self) -> Result<bool, StoreError> {
        match self {
            WriteOutcome::Written => Ok(true),
            WriteOutcome::Skipped => Ok(false),
            WriteOutcome::Failed(e) => Err(e),
        }
    }
}

/// Subscription plus write path for one identity's sprint document
pub struct SyncChannel {
    store: Box<dyn DocumentStore>,
    identity: Option<Identity>,
    subscription: Option<Subscription>,
}

impl SyncChannel {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        SyncChannel {
            store,
            identity: None,
            subscription: None,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Start following `identity`'s document. Any previous subscription is
    /// released first.
    pub fn attach(&mut self, identity: Identity) -> Result<(), StoreError> {
        self.detach();
        let subscription = self.store.watch(&identity)?;
        tracing::info!(%identity, "sync attached");
        self.identity = Some(identity);
        self.subscription = Some(subscription);
        Ok(())
    }

    /// Set the identity used for writes without subscribing
    pub fn sign_in(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Release the live subscription
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            tracing::debug!("sync detached");
        }
    }

    /// Drain pending notifications. Returns the newest state, if any arrived.
    ///
    /// A notification saying the document does not exist triggers first-run
    /// initialization: a fresh document starting at `today` is written and
    /// adopted immediately.
    pub fn poll(&mut self, today: NaiveDate) -> Option<SprintState> {
        let snapshots = self.subscription.as_ref()?.poll();
        let mut latest = None;
        for snapshot in snapshots {
            latest = match snapshot {
                Some(state) => Some(state),
                None => Some(self.initialize(today)),
            };
        }
        latest
    }

    /// One-shot read, initializing the document if it does not exist yet
    pub fn load(&mut self, today: NaiveDate) -> Result<SprintState, StoreError> {
        let identity = self.identity.as_ref().ok_or(StoreError::NoIdentity)?;
        match self.store.read(identity)? {
            Some(state) => Ok(state),
            None => {
                let state = SprintState::initial(today);
                self.store.create(identity, &state)?;
                Ok(state)
            }
        }
    }

    /// Replace the stored task list with `tasks`.
    ///
    /// Without an identity this does nothing. Failures are returned to the
    /// caller, never retried or queued.
    pub fn replace_all(&self, tasks: &[TaskRecord]) -> WriteOutcome {
        let Some(identity) = &self.identity else {
            tracing::debug!("replace_all skipped: not signed in");
            return WriteOutcome::Skipped;
        };
        match self.store.update_tasks(identity, tasks) {
            Ok(()) => WriteOutcome::Written,
            Err(e) => {
                tracing::warn!(error = %e, "task write failed");
                WriteOutcome::Failed(e)
            }
        }
    }

    fn initialize(&self, today: NaiveDate) -> SprintState {
        let state = SprintState::initial(today);
        if let Some(identity) = &self.identity
            && let Err(e) = self.store.create(identity, &state)
        {
            tracing::warn!(error = %e, "could not create sprint document");
        }
        state
    }
}

impl Drop for SyncChannel {
    fn drop(&mut self) {
        self.detach();
    }
}
