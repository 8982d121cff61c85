//! Connection registry
//!
//! Maps a stable user identity to the session handle currently owned by
//! that user. The registry is the only place this binding is mutated:
//! bound on an `identify` frame, removed when the same session
//! disconnects. At most one handle per identity; a later identify for the
//! same identity overwrites the earlier handle (last-writer-wins, no
//! multi-device fan-out).
//!
//! Each operation is a single atomic map call, so a concurrent lookup
//! never observes a half-updated binding. A lookup racing a disconnect
//! may return a handle that is about to go stale; senders treat a failed
//! send as silent best-effort failure.

use dashmap::DashMap;
use std::sync::Arc;

use super::session::SessionSink;

#[derive(Default)]
pub struct ConnectionRegistry {
    entries: DashMap<String, Arc<dyn SessionSink>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register (or overwrite) the handle for an identity. Idempotent.
    pub fn bind(&self, identity: impl Into<String>, handle: Arc<dyn SessionSink>) {
        self.entries.insert(identity.into(), handle);
    }

    /// Remove every binding whose handle has the given session id.
    ///
    /// Disconnect events only carry the handle, so this scans by value.
    /// No-op when nothing matches (the session never identified, or was
    /// already displaced by a later bind).
    pub fn unbind(&self, session_id: &str) {
        self.entries
            .retain(|_, handle| handle.session_id() != session_id);
    }

    /// Current handle for an identity. Absence is a normal condition: the
    /// user is simply not connected right now.
    pub fn lookup(&self, identity: &str) -> Option<Arc<dyn SessionSink>> {
        self.entries.get(identity).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::MemorySession;

    #[test]
    fn bind_then_lookup() {
        let registry = ConnectionRegistry::new();
        let (session, _rx) = MemorySession::channel("s1");
        registry.bind("u1", session);

        let found = registry.lookup("u1").unwrap();
        assert_eq!(found.session_id(), "s1");
        assert!(registry.lookup("u2").is_none());
    }

    #[test]
    fn unbind_removes_by_handle() {
        let registry = ConnectionRegistry::new();
        let (session, _rx) = MemorySession::channel("s1");
        registry.bind("u1", session);

        registry.unbind("s1");
        assert!(registry.lookup("u1").is_none());

        // No-op when nothing matches
        registry.unbind("s1");
        assert!(registry.is_empty());
    }

    #[test]
    fn later_bind_wins() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = MemorySession::channel("s1");
        let (second, _rx2) = MemorySession::channel("s2");

        registry.bind("u1", first);
        registry.bind("u1", second);

        assert_eq!(registry.lookup("u1").unwrap().session_id(), "s2");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unbind_of_displaced_handle_keeps_new_binding() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = MemorySession::channel("s1");
        let (second, _rx2) = MemorySession::channel("s2");

        registry.bind("u1", first);
        registry.bind("u1", second);

        // The displaced session disconnects afterwards; u1 stays bound to s2.
        registry.unbind("s1");
        assert_eq!(registry.lookup("u1").unwrap().session_id(), "s2");
    }
}
