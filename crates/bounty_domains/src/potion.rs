//! # Potion Events

use bounty_core::{rule_query, Attr};

use crate::ids::PotionType;

rule_query! {
    /// Query for brewing events.
    pub struct PotionQuery indexed by PotionIndex {
        /// Effect type.
        potion: PotionType,
        /// Effect tier (1 or 2).
        tier: u8,
        /// Extended duration.
        extended: bool,
        /// Splash potion.
        splash: bool,
    }
}

impl PotionQuery {
    /// Builds the query for a brewed potion.
    #[must_use]
    pub fn event(potion: PotionType, tier: u8, extended: bool, splash: bool) -> Self {
        Self {
            potion: Attr::one(potion),
            tier: Attr::one(tier),
            extended: Attr::one(extended),
            splash: Attr::one(splash),
        }
    }
}
