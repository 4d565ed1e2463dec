//! # Rule Engine
//!
//! **Publishes catalog generations to lock-free readers.**
//!
//! ```text
//!   readers:  snapshot() -> Arc<Catalog>   (atomic load, never blocks)
//!   writer:   reload(build) -> lock -> build next -> swap -> unlock
//! ```
//!
//! A reader keeps the generation it loaded for as long as it holds the
//! `Arc`, even while a newer one is published. A failed build leaves the
//! current generation in place.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use bounty_domains::Registries;
use parking_lot::Mutex;

use crate::catalog::Catalog;
use crate::error::{ConfigResult, ConfigWarning};
use crate::loader::RuleLoader;

/// Holder of the current catalog generation.
#[derive(Debug)]
pub struct RuleEngine {
    current: ArcSwap<Catalog>,
    /// Serializes publishers. Readers never touch it.
    writer: Mutex<()>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl RuleEngine {
    /// Creates an engine publishing `catalog` as generation 1.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog.with_generation(1)),
            writer: Mutex::new(()),
        }
    }

    /// Loads an engine config and creates an engine for it.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not load.
    pub fn load(config_path: &Path, registries: &Registries) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        let mut loader = RuleLoader::new(registries);
        let catalog = loader.load_catalog(config_path)?;
        Ok((Self::new(catalog), loader.take_warnings()))
    }

    /// The current generation. Lookups should load once per event and use
    /// that snapshot throughout.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    /// Generation number currently published.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.current.load().generation()
    }

    /// Publishes `catalog` as the next generation and returns its number.
    pub fn publish(&self, catalog: Catalog) -> u64 {
        let _writer = self.writer.lock();
        self.publish_locked(catalog)
    }

    /// Builds the next generation from the current one and publishes it.
    ///
    /// Writers are serialized, so `build` always sees the latest generation.
    ///
    /// # Errors
    ///
    /// Returns the build error; the current generation stays published.
    pub fn reload<F>(&self, build: F) -> ConfigResult<u64>
    where
        F: FnOnce(&Catalog) -> ConfigResult<Catalog>,
    {
        let _writer = self.writer.lock();
        let current = self.current.load_full();
        match build(&current) {
            Ok(next) => Ok(self.publish_locked(next)),
            Err(error) => {
                tracing::error!(
                    %error,
                    generation = current.generation(),
                    "reload failed, keeping current generation"
                );
                Err(error)
            }
        }
    }

    /// Reloads from an engine config file.
    ///
    /// # Errors
    ///
    /// As [`RuleEngine::reload`].
    pub fn reload_from(&self, config_path: &Path, registries: &Registries) -> ConfigResult<Vec<ConfigWarning>> {
        let mut loader = RuleLoader::new(registries);
        self.reload(|_| loader.load_catalog(config_path))?;
        Ok(loader.take_warnings())
    }

    fn publish_locked(&self, catalog: Catalog) -> u64 {
        let generation = self.current.load().generation() + 1;
        let rules = catalog.rule_count();
        self.current.store(Arc::new(catalog.with_generation(generation)));
        tracing::info!(generation, rules, "catalog published");
        generation
    }
}
