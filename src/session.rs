//! # Session Registry Slot
//!
//! The process-wide slot the root helpers namespace is published under for the
//! duration of a test session.
//!
//! ## Lifecycle
//!
//! - [`attach`] creates the root on first use and otherwise hands back the
//!   existing one untouched, so a long-lived process keeps its helpers
//!   across sessions.
//! - [`reset`] empties the root in place; handles held by tests stay valid.
//! - [`detach`] removes the root from the slot. Detaching an empty slot is a
//!   no-op.
//!
//! These are normally driven by [`crate::plugin::HelpersPlugin`] from the
//! host framework's hooks rather than called directly.

use crate::error::{HelpersError, Result};
use crate::registry::Namespace;
use parking_lot::{const_rwlock, RwLock};
use tracing::{debug, info};

static HELPERS: RwLock<Option<Namespace>> = const_rwlock(None);

/// Publish a root namespace, creating it if the slot is empty
pub fn attach() -> Namespace {
    let mut slot = HELPERS.write();
    match slot.as_ref() {
        Some(existing) => {
            debug!(helpers = existing.len(), "Reusing attached helpers registry");
            existing.clone()
        }
        None => {
            let root = Namespace::root();
            *slot = Some(root.clone());
            info!("Attached new helpers registry");
            root
        }
    }
}

/// Remove the root namespace from the slot, returning it if one was attached
pub fn detach() -> Option<Namespace> {
    let detached = HELPERS.write().take();
    if detached.is_some() {
        info!("Detached helpers registry");
    }
    detached
}

/// The currently attached root namespace
pub fn helpers() -> Option<Namespace> {
    HELPERS.read().clone()
}

/// The currently attached root namespace, or [`HelpersError::NotAttached`]
pub fn require_helpers() -> Result<Namespace> {
    helpers().ok_or(HelpersError::NotAttached)
}

pub fn is_attached() -> bool {
    HELPERS.read().is_some()
}

/// Clear the attached root in place. Returns false when nothing is attached.
pub fn reset() -> bool {
    // Clone out of the slot so the slot lock is not held while clearing
    let Some(root) = helpers() else {
        return false;
    };
    root.clear();
    info!("Reset helpers registry");
    true
}
