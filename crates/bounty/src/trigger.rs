//! # Triggers
//!
//! The event families a rule book answers for. Each trigger owns one rule
//! store; several triggers share the item domain.

use std::fmt;
use std::str::FromStr;

/// Which kind of event a rule set is written for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trigger {
    /// A block was broken.
    BlockBreak,
    /// A block was placed.
    BlockPlace,
    /// An item was crafted.
    Craft,
    /// An item was smelted.
    Smelt,
    /// A potion was brewed.
    Brew,
    /// A mob was killed.
    MobKill,
    /// A player died.
    PlayerDeath,
}

impl Trigger {
    /// Every trigger, in rule-file order.
    pub const ALL: [Self; 7] = [
        Self::BlockBreak,
        Self::BlockPlace,
        Self::Craft,
        Self::Smelt,
        Self::Brew,
        Self::MobKill,
        Self::PlayerDeath,
    ];

    /// Section name in rule files (`[[block_break]]`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BlockBreak => "block_break",
            Self::BlockPlace => "block_place",
            Self::Craft => "craft",
            Self::Smelt => "smelt",
            Self::Brew => "brew",
            Self::MobKill => "mob_kill",
            Self::PlayerDeath => "player_death",
        }
    }

    /// Returns true for the triggers matched with item queries.
    #[must_use]
    pub const fn is_item(self) -> bool {
        matches!(self, Self::BlockBreak | Self::BlockPlace | Self::Craft | Self::Smelt)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trigger {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let wanted = bounty_domains::normalize_name(text);
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.name() == wanted)
            .ok_or_else(|| format!("unknown trigger {text:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for trigger in Trigger::ALL {
            assert_eq!(trigger.name().parse::<Trigger>(), Ok(trigger));
        }
        assert_eq!("Mob Kill".parse::<Trigger>(), Ok(Trigger::MobKill));
        assert!("explode".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_item_triggers() {
        let items: Vec<_> = Trigger::ALL.into_iter().filter(|t| t.is_item()).collect();
        assert_eq!(items.len(), 4);
        assert!(!Trigger::Brew.is_item());
    }
}
