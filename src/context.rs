//! Application Context
//!
//! The persistence port shared with every widget via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::persist::{KeyValueStore, LocalStore, MemStore};

/// Injected persistence port, provided once by the app shell.
#[derive(Clone)]
pub struct StoreContext {
    port: Arc<dyn KeyValueStore>,
    /// True when local storage was unavailable and writes only live in
    /// memory for this page's lifetime
    pub degraded: bool,
}

impl StoreContext {
    /// Build the runtime port: local storage when the browser allows it,
    /// otherwise an in-memory fallback flagged as degraded.
    pub fn from_browser() -> Self {
        if LocalStore::available() {
            Self {
                port: Arc::new(LocalStore),
                degraded: false,
            }
        } else {
            web_sys::console::warn_1(
                &"[STORE] local storage unavailable, falling back to in-memory state".into(),
            );
            Self {
                port: Arc::new(MemStore::default()),
                degraded: true,
            }
        }
    }

    /// Purely in-memory port (tests)
    pub fn in_memory() -> Self {
        Self {
            port: Arc::new(MemStore::default()),
            degraded: false,
        }
    }

    pub fn port(&self) -> &dyn KeyValueStore {
        &*self.port
    }
}

/// Get the store context from Leptos context
pub fn use_store() -> StoreContext {
    expect_context::<StoreContext>()
}
