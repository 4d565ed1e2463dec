//! # Mob Events
//!
//! A kill is described by the mob's type plus a handful of circumstances:
//! how it died, what it looked like, and where it came from.

use bounty_core::{rule_query, Attr};

use crate::ids::{DamageCause, MobType};
use crate::readings;

rule_query! {
    /// Query for mob kill events.
    pub struct MobQuery indexed by MobIndex {
        /// Mob type.
        mob: MobType,
        /// Cause of the last damage taken.
        damage_cause: DamageCause,
        /// Slime and magma cube size.
        size: u8,
        /// Sub-variant (sheep colour, villager profession, ...).
        variant: u8,
        /// Spawned by a monster spawner.
        spawner: bool,
        /// Baby form.
        baby: bool,
        /// Tamed by a player.
        tamed: bool,
        /// Killed by a player, directly or by projectile.
        player_killed: bool,
        /// Converted from or bred by villagers.
        villager: bool,
    }
}

/// Everything the host knows about a mob kill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MobKill {
    /// Every reading of the mob type.
    pub mob: Vec<MobType>,
    /// Cause of the last damage, if known.
    pub damage_cause: Option<DamageCause>,
    /// Size, for mobs that have one.
    pub size: Option<u8>,
    /// Variant, for mobs that have one.
    pub variant: Option<u8>,
    /// Spawned by a monster spawner.
    pub spawner: bool,
    /// Baby form.
    pub baby: bool,
    /// Tamed by a player.
    pub tamed: bool,
    /// Killed by a player.
    pub player_killed: bool,
    /// Villager origin.
    pub villager: bool,
}

impl MobKill {
    /// A plain kill of `mob` with every flag cleared.
    #[must_use]
    pub fn new(mob: MobType) -> Self {
        Self {
            mob: vec![mob],
            ..Self::default()
        }
    }

    /// Sets the damage cause.
    #[must_use]
    pub const fn with_damage_cause(mut self, cause: DamageCause) -> Self {
        self.damage_cause = Some(cause);
        self
    }

    /// Marks the kill as done by a player.
    #[must_use]
    pub const fn with_player_killed(mut self, player_killed: bool) -> Self {
        self.player_killed = player_killed;
        self
    }
}

impl MobQuery {
    /// Builds the query for a live kill.
    #[must_use]
    pub fn event(kill: &MobKill) -> Self {
        Self {
            mob: readings(kill.mob.iter().copied()),
            damage_cause: Attr::from(kill.damage_cause),
            size: Attr::from(kill.size),
            variant: Attr::from(kill.variant),
            spawner: Attr::one(kill.spawner),
            baby: Attr::one(kill.baby),
            tamed: Attr::one(kill.tamed),
            player_killed: Attr::one(kill.player_killed),
            villager: Attr::one(kill.villager),
        }
    }
}

impl From<&MobKill> for MobQuery {
    fn from(kill: &MobKill) -> Self {
        Self::event(kill)
    }
}
