// SPDX-License-Identifier: Apache-2.0

//! Process-scoped registry used to hand the coordinator handle from POST to
//! PRE without either operator owning the other.
//!
//! POST constructs the coordinator and `put`s it under a key derived from a
//! UUID shared with PRE at factory time; PRE `get`s it on its first resume
//! and the entry is removed, so the hand-off happens exactly once.

use std::cell::RefCell;
use std::collections::HashMap;

use uuid::Uuid;

use crate::coordinator::Coordinator;

thread_local! {
    static REGISTRY: RefCell<HashMap<Uuid, Coordinator>> = RefCell::new(HashMap::new());
}

/// A process-scoped (here: thread-scoped, since coordinators are `!Send`)
/// table of pending coordinator hand-offs, keyed by the UUID shared between
/// a PRE/POST pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowRegistry;

impl WindowRegistry {
    /// Registers `coordinator` under `key`. Called once by POST, before it
    /// yields for the first time.
    pub fn put(&self, key: Uuid, coordinator: Coordinator) {
        REGISTRY.with(|registry| {
            registry.borrow_mut().insert(key, coordinator);
        });
    }

    /// Resolves and removes the coordinator registered under `key`. Called
    /// once by PRE, on its first resume.
    ///
    /// # Panics
    ///
    /// Panics if no coordinator was registered under `key`: PRE and POST are
    /// always constructed together by the same operator factory, so a miss
    /// here means the hand-off contract was violated.
    #[must_use]
    pub fn get(&self, key: Uuid) -> Coordinator {
        REGISTRY
            .with(|registry| registry.borrow_mut().remove(&key))
            .unwrap_or_else(|| panic!("no coordinator registered for window hand-off key {key}"))
    }
}

/// Generates a fresh hand-off key, shared by a PRE/POST pair at factory
/// time.
#[must_use]
pub fn new_handoff_key() -> Uuid {
    Uuid::new_v4()
}
