//! # Test Utilities
//!
//! Isolation for tests that touch the process-wide helpers slot. The test
//! harness runs tests on several threads, so every test using
//! [`crate::session`] should hold a [`SessionGuard`] for its whole body.

use crate::registry::Namespace;
use crate::session;
use parking_lot::{const_mutex, Mutex, MutexGuard};

static SESSION_LOCK: Mutex<()> = const_mutex(());

/// Exclusive access to an attached, empty helpers registry.
///
/// The registry is reset again when the guard is dropped.
pub struct SessionGuard {
    helpers: Namespace,
    _lock: MutexGuard<'static, ()>,
}

impl SessionGuard {
    /// Wait for exclusive access, then attach and reset the registry
    pub fn acquire() -> Self {
        let lock = SESSION_LOCK.lock();
        let helpers = session::attach();
        helpers.clear();
        Self {
            helpers,
            _lock: lock,
        }
    }

    /// Root namespace attached when the guard was acquired
    pub fn helpers(&self) -> &Namespace {
        &self.helpers
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        session::reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo(bar: bool) -> bool {
        bar
    }

    #[test]
    fn test_guard_starts_empty() {
        let guard = SessionGuard::acquire();
        assert!(guard.helpers().is_empty());
        assert!(session::is_attached());
    }

    #[test]
    fn test_guard_resets_on_drop() {
        let held = {
            let guard = SessionGuard::acquire();
            guard.helpers().register(foo).unwrap();
            guard.helpers().clone()
        };
        assert!(!held.contains("foo"));
    }

    #[test]
    fn test_session_attach_is_idempotent() {
        let guard = SessionGuard::acquire();
        guard.helpers().register(foo).unwrap();

        let again = session::attach();
        assert!(Namespace::ptr_eq(guard.helpers(), &again));
        assert!(again.contains("foo"));
    }

    #[test]
    fn test_session_detach_and_reattach() {
        let guard = SessionGuard::acquire();
        guard.helpers().register(foo).unwrap();

        let detached = session::detach().unwrap();
        assert!(Namespace::ptr_eq(guard.helpers(), &detached));
        assert!(session::helpers().is_none());
        assert!(session::detach().is_none());
        assert!(!session::reset());

        let fresh = session::attach();
        assert!(!Namespace::ptr_eq(guard.helpers(), &fresh));
        assert!(fresh.is_empty());
    }
}
