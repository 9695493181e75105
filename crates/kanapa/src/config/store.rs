//! Shared, updatable configuration.
//!
//! A [`ConfigStore`] is a cheap handle to one configuration behind a
//! read-write lock. Renderers hold a handle and take a snapshot at the start
//! of every render, so an update becomes visible to the next render and never
//! to one already in flight.
//!
//! A process-wide store backs [`config`] and [`update_config`]; renderers
//! built with [`Renderer::new`](crate::Renderer::new) read from it.

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::settings::{Config, ConfigUpdate};

static GLOBAL_STORE: Lazy<ConfigStore> = Lazy::new(ConfigStore::new);

/// Handle to a shared configuration. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
}

impl ConfigStore {
    /// Creates a store holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// The process-wide store.
    pub fn global() -> &'static ConfigStore {
        &GLOBAL_STORE
    }

    /// A copy of the current configuration.
    pub fn snapshot(&self) -> Config {
        self.inner.read().clone()
    }

    /// Merges `update` into the stored configuration.
    pub fn update(&self, update: ConfigUpdate) {
        let mut config = self.inner.write();
        config.apply(update);
        debug!(
            "configuration updated: themes light={} dark={}, selectors={:?}",
            config.themes.light, config.themes.dark, config.selectors
        );
    }

    /// Replaces the stored configuration wholesale.
    pub fn replace(&self, config: Config) {
        *self.inner.write() = config;
    }

    /// Restores the default configuration.
    pub fn reset(&self) {
        self.replace(Config::default());
    }
}

/// Snapshot of the process-wide configuration.
pub fn config() -> Config {
    GLOBAL_STORE.snapshot()
}

/// Merges `update` into the process-wide configuration.
///
/// Intended to be called during start-up, before rendering begins. Renders
/// already in progress keep the snapshot they started with.
pub fn update_config(update: ConfigUpdate) {
    GLOBAL_STORE.update(update);
}
