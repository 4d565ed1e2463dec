//! # Name Registries
//!
//! **Immutable maps from human names to domain values.**
//!
//! Rule files say `mob = "zombie"` or `mob = "hostile"`; the loader turns
//! those names into ids through a registry. A name may stand for several
//! values (categories, aliases), which become a `OneOf` alternative list.
//!
//! ```text
//!   "zombie"  -> [54]
//!   "hostile" -> [50, 51, 52, 54]
//! ```
//!
//! Lookups are case-insensitive; `"Pig Zombie"`, `"pig-zombie"` and
//! `"PIG_ZOMBIE"` are the same name.

use std::collections::BTreeMap;

use crate::error::{RegistryError, RegistryResult};
use crate::ids::{DamageCause, ItemId, MobType, PotionType};

/// Normalizes a registry name: trimmed, lowercase, `_` as separator.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// A frozen name -> values map.
#[derive(Clone, Debug)]
pub struct Registry<V> {
    kind: &'static str,
    names: BTreeMap<String, Vec<V>>,
}

impl<V: Clone + PartialEq> Registry<V> {
    /// Starts building a registry. `kind` names it in error messages.
    #[must_use]
    pub fn builder(kind: &'static str) -> RegistryBuilder<V> {
        RegistryBuilder {
            kind,
            names: BTreeMap::new(),
        }
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty(kind: &'static str) -> Self {
        Self::builder(kind).build()
    }

    /// What this registry names ("item", "mob", ...).
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Values `name` stands for.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&[V]> {
        self.names.get(&normalize_name(name)).map(Vec::as_slice)
    }

    /// First name (alphabetically) that stands for exactly `value`.
    #[must_use]
    pub fn name_of(&self, value: &V) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, values)| values.len() == 1 && values[0] == *value)
            .map(|(name, _)| name.as_str())
    }

    /// Number of names.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no name is defined.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builder for a [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder<V> {
    kind: &'static str,
    names: BTreeMap<String, Vec<V>>,
}

impl<V: Clone + PartialEq> RegistryBuilder<V> {
    /// Defines `name` as a single value.
    ///
    /// # Errors
    ///
    /// Fails on an empty or already defined name.
    pub fn define(&mut self, name: &str, value: V) -> RegistryResult<&mut Self> {
        let key = self.fresh_key(name)?;
        self.names.insert(key, vec![value]);
        Ok(self)
    }

    /// Defines `name` as the union of the values of `targets`.
    ///
    /// Targets must already be defined; aliases of aliases are fine.
    ///
    /// # Errors
    ///
    /// Fails on an empty or already defined name, or an unknown target.
    pub fn alias(&mut self, name: &str, targets: &[&str]) -> RegistryResult<&mut Self> {
        let key = self.fresh_key(name)?;

        let mut values: Vec<V> = Vec::new();
        for target in targets {
            let found = self.names.get(&normalize_name(target)).ok_or_else(|| {
                RegistryError::UnknownTarget {
                    registry: self.kind,
                    alias: key.clone(),
                    target: (*target).to_string(),
                }
            })?;
            for value in found {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }

        self.names.insert(key, values);
        Ok(self)
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> Registry<V> {
        tracing::debug!(registry = self.kind, names = self.names.len(), "registry built");
        Registry {
            kind: self.kind,
            names: self.names,
        }
    }

    fn fresh_key(&self, name: &str) -> RegistryResult<String> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(RegistryError::EmptyName { registry: self.kind });
        }
        if self.names.contains_key(&key) {
            return Err(RegistryError::DuplicateName {
                registry: self.kind,
                name: key,
            });
        }
        Ok(key)
    }
}

/// The registries a rule loader needs, one per named domain.
#[derive(Clone, Debug)]
pub struct Registries {
    /// Item and block names.
    pub items: Registry<ItemId>,
    /// Mob names and categories.
    pub mobs: Registry<MobType>,
    /// Potion effect names.
    pub potions: Registry<PotionType>,
    /// Damage cause names.
    pub damage_causes: Registry<DamageCause>,
}

impl Registries {
    /// Registries with no names at all; rule files must then use raw ids.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Registry::empty("item"),
            mobs: Registry::empty("mob"),
            potions: Registry::empty("potion"),
            damage_causes: Registry::empty("damage cause"),
        }
    }
}
