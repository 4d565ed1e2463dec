//! # Rule Books
//!
//! A rule book holds one rule store per [`Trigger`]. Books built from
//! several files are merged in load order, so a later file's rule beats an
//! equally specific rule from an earlier one.

use bounty_core::RuleStore;
use bounty_domains::{ItemQuery, MobQuery, PlayerQuery, PotionQuery};
use bounty_economy::{EffectiveReward, Reward};

use crate::trigger::Trigger;

/// Rules for every trigger.
#[derive(Clone, Debug, Default)]
pub struct RuleBook {
    block_break: RuleStore<ItemQuery, Reward>,
    block_place: RuleStore<ItemQuery, Reward>,
    craft: RuleStore<ItemQuery, Reward>,
    smelt: RuleStore<ItemQuery, Reward>,
    brew: RuleStore<PotionQuery, Reward>,
    mob_kill: RuleStore<MobQuery, Reward>,
    player_death: RuleStore<PlayerQuery, Reward>,
}

impl RuleBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Item rules of `trigger`, if it is an item trigger.
    #[must_use]
    pub fn item_rules(&self, trigger: Trigger) -> Option<&RuleStore<ItemQuery, Reward>> {
        match trigger {
            Trigger::BlockBreak => Some(&self.block_break),
            Trigger::BlockPlace => Some(&self.block_place),
            Trigger::Craft => Some(&self.craft),
            Trigger::Smelt => Some(&self.smelt),
            _ => None,
        }
    }

    /// Mutable item rules of `trigger`, if it is an item trigger.
    pub fn item_rules_mut(&mut self, trigger: Trigger) -> Option<&mut RuleStore<ItemQuery, Reward>> {
        match trigger {
            Trigger::BlockBreak => Some(&mut self.block_break),
            Trigger::BlockPlace => Some(&mut self.block_place),
            Trigger::Craft => Some(&mut self.craft),
            Trigger::Smelt => Some(&mut self.smelt),
            _ => None,
        }
    }

    /// Brew rules.
    #[inline]
    #[must_use]
    pub fn potion_rules(&self) -> &RuleStore<PotionQuery, Reward> {
        &self.brew
    }

    /// Mutable brew rules.
    #[inline]
    pub fn potion_rules_mut(&mut self) -> &mut RuleStore<PotionQuery, Reward> {
        &mut self.brew
    }

    /// Mob kill rules.
    #[inline]
    #[must_use]
    pub fn mob_rules(&self) -> &RuleStore<MobQuery, Reward> {
        &self.mob_kill
    }

    /// Mutable mob kill rules.
    #[inline]
    pub fn mob_rules_mut(&mut self) -> &mut RuleStore<MobQuery, Reward> {
        &mut self.mob_kill
    }

    /// Player death rules.
    #[inline]
    #[must_use]
    pub fn player_rules(&self) -> &RuleStore<PlayerQuery, Reward> {
        &self.player_death
    }

    /// Mutable player death rules.
    #[inline]
    pub fn player_rules_mut(&mut self) -> &mut RuleStore<PlayerQuery, Reward> {
        &mut self.player_death
    }

    /// Effective reward for an item event.
    #[must_use]
    pub fn reward_for_item(&self, trigger: Trigger, query: &ItemQuery) -> Option<Reward> {
        self.item_rules(trigger)?.effective_reward(query)
    }

    /// Effective reward for a brewed potion.
    #[must_use]
    pub fn reward_for_potion(&self, query: &PotionQuery) -> Option<Reward> {
        self.brew.effective_reward(query)
    }

    /// Effective reward for a mob kill.
    #[must_use]
    pub fn reward_for_mob(&self, query: &MobQuery) -> Option<Reward> {
        self.mob_kill.effective_reward(query)
    }

    /// Effective reward for a player death.
    #[must_use]
    pub fn reward_for_player(&self, query: &PlayerQuery) -> Option<Reward> {
        self.player_death.effective_reward(query)
    }

    /// Appends every rule of `other`, trigger by trigger.
    pub fn merge(&mut self, other: Self) {
        self.block_break.merge(other.block_break);
        self.block_place.merge(other.block_place);
        self.craft.merge(other.craft);
        self.smelt.merge(other.smelt);
        self.brew.merge(other.brew);
        self.mob_kill.merge(other.mob_kill);
        self.player_death.merge(other.player_death);
    }

    /// Number of rules stored for `trigger`.
    #[must_use]
    pub fn count(&self, trigger: Trigger) -> usize {
        match trigger {
            Trigger::Brew => self.brew.len(),
            Trigger::MobKill => self.mob_kill.len(),
            Trigger::PlayerDeath => self.player_death.len(),
            item => self.item_rules(item).map_or(0, RuleStore::len),
        }
    }

    /// Number of rules over all triggers.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        Trigger::ALL.into_iter().map(|trigger| self.count(trigger)).sum()
    }

    /// Returns true if no trigger has a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounty_core::Attr;
    use bounty_domains::{ItemId, MobKill, MobType};
    use bounty_economy::{Range, ResourceKind};

    fn xp(name: &str, amount: f64) -> Reward {
        Reward::new(name).with_factory(ResourceKind::Experience, amount)
    }

    #[test]
    fn test_triggers_are_separate() {
        let mut book = RuleBook::new();
        book.item_rules_mut(Trigger::BlockBreak)
            .unwrap()
            .insert(ItemQuery::default(), xp("break", 1.0));
        book.item_rules_mut(Trigger::Craft)
            .unwrap()
            .insert(ItemQuery::default(), xp("craft", 2.0));

        let event = ItemQuery::event(&[ItemId(1)], Some(0), Some(false));
        assert_eq!(book.reward_for_item(Trigger::BlockBreak, &event).unwrap().name(), "break");
        assert_eq!(book.reward_for_item(Trigger::Craft, &event).unwrap().name(), "craft");
        assert!(book.reward_for_item(Trigger::Smelt, &event).is_none());
        assert!(book.reward_for_item(Trigger::MobKill, &event).is_none());
        assert!(book.item_rules_mut(Trigger::Brew).is_none());
    }

    #[test]
    fn test_merge_later_book_wins_ties() {
        let mut base = RuleBook::new();
        base.mob_rules_mut()
            .insert(MobQuery { mob: Attr::one(MobType(54)), ..MobQuery::default() }, xp("base", 1.0));
        let mut overlay = RuleBook::new();
        overlay
            .mob_rules_mut()
            .insert(MobQuery { mob: Attr::one(MobType(54)), ..MobQuery::default() }, xp("overlay", 3.0));
        overlay.potion_rules_mut().insert(Default::default(), xp("brew", 1.0));

        base.merge(overlay);

        let reward = base.reward_for_mob(&MobQuery::event(&MobKill::new(MobType(54)))).unwrap();
        assert_eq!(reward.factory(&ResourceKind::Experience), Some(Range::constant(3.0)));
        assert_eq!(base.count(Trigger::MobKill), 2);
        assert_eq!(base.rule_count(), 3);
        assert!(!base.is_empty());
    }
}
