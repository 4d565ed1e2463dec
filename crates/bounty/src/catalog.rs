//! # Catalogs
//!
//! A catalog is one configuration generation: the default rule book, the
//! preset books selected per world or preset name, and the global reward
//! multiplier. Catalogs are immutable once published and shared by `Arc`.

use std::sync::Arc;

use bounty_core::RuleStore;
use bounty_domains::{ItemQuery, MobQuery, PlayerQuery, PotionQuery, PresetQuery};
use bounty_economy::Reward;

use crate::book::RuleBook;
use crate::trigger::Trigger;

/// One configuration generation.
#[derive(Clone, Debug)]
pub struct Catalog {
    default: Arc<RuleBook>,
    presets: RuleStore<PresetQuery, Arc<RuleBook>>,
    multiplier: f64,
    generation: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(RuleBook::default())
    }
}

impl Catalog {
    /// Creates a catalog with only a default book.
    #[must_use]
    pub fn new(default: RuleBook) -> Self {
        Self {
            default: Arc::new(default),
            presets: RuleStore::new(),
            multiplier: 1.0,
            generation: 0,
        }
    }

    /// Adds a preset book. Later presets win ties.
    #[must_use]
    pub fn with_preset(mut self, selector: PresetQuery, book: RuleBook) -> Self {
        self.presets.insert(selector, Arc::new(book));
        self
    }

    /// Sets the multiplier applied to every reward.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub(crate) const fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Generation number, assigned when the catalog is published.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Global reward multiplier.
    #[inline]
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The book used when no preset matches.
    #[inline]
    #[must_use]
    pub fn default_book(&self) -> &RuleBook {
        &self.default
    }

    /// Number of preset books.
    #[inline]
    #[must_use]
    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    /// Preset books with their selectors, in load order.
    pub fn presets(&self) -> impl Iterator<Item = (&PresetQuery, &RuleBook)> + '_ {
        self.presets.iter().map(|(_, selector, book)| (selector, book.as_ref()))
    }

    /// The most specific preset book for `selector`, or the default book.
    #[must_use]
    pub fn book_for(&self, selector: &PresetQuery) -> &RuleBook {
        self.presets
            .resolve(selector)
            .map_or(&self.default, |book| book)
    }

    /// Effective reward for an item event, global multiplier applied.
    #[must_use]
    pub fn reward_for_item(
        &self,
        selector: &PresetQuery,
        trigger: Trigger,
        query: &ItemQuery,
    ) -> Option<Reward> {
        self.scale(self.book_for(selector).reward_for_item(trigger, query))
    }

    /// Effective reward for a brewed potion, global multiplier applied.
    #[must_use]
    pub fn reward_for_potion(&self, selector: &PresetQuery, query: &PotionQuery) -> Option<Reward> {
        self.scale(self.book_for(selector).reward_for_potion(query))
    }

    /// Effective reward for a mob kill, global multiplier applied.
    #[must_use]
    pub fn reward_for_mob(&self, selector: &PresetQuery, query: &MobQuery) -> Option<Reward> {
        self.scale(self.book_for(selector).reward_for_mob(query))
    }

    /// Effective reward for a player death, global multiplier applied.
    #[must_use]
    pub fn reward_for_player(&self, selector: &PresetQuery, query: &PlayerQuery) -> Option<Reward> {
        self.scale(self.book_for(selector).reward_for_player(query))
    }

    /// Number of rules over the default and every preset book.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.default.rule_count() + self.presets().map(|(_, book)| book.rule_count()).sum::<usize>()
    }

    #[allow(clippy::float_cmp)]
    fn scale(&self, reward: Option<Reward>) -> Option<Reward> {
        reward.map(|reward| {
            if self.multiplier == 1.0 {
                reward
            } else {
                reward.scaled(self.multiplier).normalized()
            }
        })
    }
}
