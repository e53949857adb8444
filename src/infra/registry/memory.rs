//! In-memory session registry.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{EmptyHandler, EmptyNotifier};

/// Identifier of a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Tracks live sessions and notifies subscribers when the last one is released.
///
/// A gate mutex is held from the state change through the end of the
/// notification, so notifications are serialized and no session can register
/// while empty handlers run. Handlers may call [`len`](Self::len) and
/// [`is_empty`](Self::is_empty) but must not register or release sessions.
#[derive(Default)]
pub struct SessionRegistry {
    gate: Mutex<()>,
    sessions: Mutex<HashSet<SessionId>>,
    handlers: RwLock<Vec<Arc<dyn Fn() + Send + Sync>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session.
    pub fn register(&self) -> SessionId {
        let _gate = self.gate.lock();
        let id = SessionId::new();
        self.sessions.lock().insert(id);
        debug!(session = %id, "session registered");
        id
    }

    /// Release a session. Returns `false` if `id` was not registered.
    ///
    /// Releasing the last session fires every empty handler, in registration
    /// order, on the calling thread.
    pub fn release(&self, id: &SessionId) -> bool {
        let _gate = self.gate.lock();
        let became_empty = {
            let mut sessions = self.sessions.lock();
            if !sessions.remove(id) {
                return false;
            }
            sessions.is_empty()
        };
        debug!(session = %id, became_empty, "session released");

        if became_empty {
            let handlers: Vec<_> = self.handlers.read().iter().cloned().collect();
            for handler in handlers {
                handler();
            }
        }
        true
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Number of registered empty handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl EmptyNotifier for SessionRegistry {
    fn on_empty(&self, handler: EmptyHandler) {
        self.handlers.write().push(Arc::from(handler));
    }
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
