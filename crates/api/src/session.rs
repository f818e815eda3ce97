//! Process-wide session state with persistence and an event stream.

use std::sync::{Arc, PoisonError, RwLock};

use models::auth::Session;
use models::user::User;
use tokio::sync::broadcast;
use tracing::{info, warn};
use utils::storage::Storage;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    /// The server rejected the session token; the UI should return to the
    /// login boundary.
    Expired,
}

/// The current authenticated user and token, rehydrated from persisted
/// storage at construction. All mutation goes through this store; consumers
/// hold clones and subscribe to [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Storage,
    current: Arc<RwLock<Option<Session>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new(storage: Storage) -> Self {
        let current = storage.load(SESSION_FILE);
        let (events, _) = broadcast::channel(16);
        Self {
            storage,
            current: Arc::new(RwLock::new(current)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn set(&self, session: Session) {
        info!(user_id = %session.user.id, "session established");
        if let Err(e) = self.storage.save(SESSION_FILE, &session) {
            warn!(error = %e, "failed to persist session");
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        let _ = self.events.send(SessionEvent::SignedIn);
    }

    /// Tear down the session on user-initiated logout.
    pub fn clear(&self) {
        self.teardown(SessionEvent::SignedOut);
    }

    /// Tear down the session after an authentication failure.
    pub fn expire(&self) {
        self.teardown(SessionEvent::Expired);
    }

    fn teardown(&self, event: SessionEvent) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            self.storage.remove(SESSION_FILE);
            let _ = self.events.send(event);
        }
    }
}
