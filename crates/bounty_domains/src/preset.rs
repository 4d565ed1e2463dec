//! # Presets
//!
//! Presets pick which rule book applies: per world, per named preset, or
//! both. Names are stored lowercased.

use bounty_core::rule_query;

use crate::{event_names, rule_names};

rule_query! {
    /// Query selecting a rule book.
    pub struct PresetQuery indexed by PresetIndex {
        /// Lowercased preset name.
        preset: String,
        /// Lowercased world name.
        world: String,
    }
}

impl PresetQuery {
    /// Rule side: a preset restricted to an optional name and world.
    #[must_use]
    pub fn rule(preset: Option<&str>, world: Option<&str>) -> Self {
        Self {
            preset: preset.map_or_else(Default::default, |name| rule_names(&[name])),
            world: world.map_or_else(Default::default, |name| rule_names(&[name])),
        }
    }

    /// Event side: the world an event happens in and the presets active for
    /// it. With no active preset only unnamed presets apply.
    #[must_use]
    pub fn event<S: AsRef<str>>(world: &str, presets: &[S]) -> Self {
        Self {
            preset: event_names(presets),
            world: event_names([world]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounty_core::RuleStore;

    #[test]
    fn test_world_and_named_presets() {
        let mut store = RuleStore::new();
        store.insert(PresetQuery::rule(None, Some("World_Nether")), "nether");
        store.insert(PresetQuery::rule(Some("hardcore"), None), "hardcore");

        assert_eq!(
            store.resolve(&PresetQuery::event::<&str>("world_nether", &[])),
            Some(&"nether")
        );
        assert_eq!(
            store.resolve(&PresetQuery::event("world", &["Hardcore"])),
            Some(&"hardcore")
        );
        assert_eq!(store.resolve(&PresetQuery::event::<&str>("world", &[])), None);
    }
}
