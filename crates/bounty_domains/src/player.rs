//! # Player Events
//!
//! Player names and permission groups are matched case-insensitively; both
//! are stored lowercased.

use bounty_core::{rule_query, Attr};

use crate::ids::DamageCause;
use crate::{event_names, rule_names};

rule_query! {
    /// Query for player death events.
    pub struct PlayerQuery indexed by PlayerIndex {
        /// Lowercased player name.
        name: String,
        /// Lowercased permission group.
        group: String,
        /// Cause of the fatal damage.
        damage_cause: DamageCause,
        /// Killed by another player.
        murder: bool,
    }
}

impl PlayerQuery {
    /// Builds the query for a player's death.
    ///
    /// A player in no group only reaches rules that leave `group` open.
    #[must_use]
    pub fn event<S: AsRef<str>>(
        name: &str,
        groups: &[S],
        damage_cause: Option<DamageCause>,
        murder: bool,
    ) -> Self {
        Self {
            name: event_names([name]),
            group: event_names(groups),
            damage_cause: Attr::from(damage_cause),
            murder: Attr::one(murder),
        }
    }

    /// Rule constraint on player names.
    #[must_use]
    pub fn names<S: AsRef<str>>(names: &[S]) -> Attr<String> {
        rule_names(names)
    }
}
