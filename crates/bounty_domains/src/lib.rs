//! # Bounty Domains
//!
//! The event families rules are written for, and the names rule files use
//! to refer to game values.
//!
//! | Query | Events |
//! |---|---|
//! | [`ItemQuery`] | block break, block place, craft, smelt |
//! | [`MobQuery`] | mob kill |
//! | [`PotionQuery`] | brew |
//! | [`PlayerQuery`] | player death |
//! | [`PresetQuery`] | rule book selection |
//!
//! Every query type comes with an `event` constructor for the host's event
//! adapter. Name lookups go through [`Registries`], built explicitly and
//! handed to whoever needs them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

use bounty_core::Attr;

pub mod builtin;
pub mod error;
pub mod ids;
pub mod item;
pub mod mob;
pub mod player;
pub mod potion;
pub mod preset;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use ids::{DamageCause, ItemId, MobType, PotionType};
pub use item::{ItemIndex, ItemQuery};
pub use mob::{MobIndex, MobKill, MobQuery};
pub use player::{PlayerIndex, PlayerQuery};
pub use potion::{PotionIndex, PotionQuery};
pub use preset::{PresetIndex, PresetQuery};
pub use registry::{normalize_name, Registries, Registry, RegistryBuilder};

/// Name an event carries when it has no name for an attribute (a player in
/// no group, an event with no active preset). [`rule_names`] drops blank
/// names, so no rule can list it.
pub const NO_NAME: &str = "";

/// Event readings of one attribute. No readings at all means the event
/// cannot discriminate, so the attribute stays open.
pub(crate) fn readings<V: PartialEq>(values: impl IntoIterator<Item = V>) -> Attr<V> {
    match Attr::one_of(values) {
        Attr::MatchesNothing => Attr::Unconstrained,
        attr => attr,
    }
}

/// Lowercased rule-side names. Blank names are dropped; a list with nothing
/// left matches nothing.
#[must_use]
pub fn rule_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Attr<String> {
    Attr::one_of(
        names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty()),
    )
}

/// Returns true if `name` is empty once trimmed.
#[inline]
#[must_use]
pub fn is_blank_name(name: &str) -> bool {
    name.trim().is_empty()
}

/// Lowercased event-side names. With no names the event carries
/// [`NO_NAME`], which only wildcard rules accept.
#[must_use]
pub fn event_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Attr<String> {
    match rule_names(names) {
        Attr::MatchesNothing => Attr::one(NO_NAME.to_string()),
        attr => attr,
    }
}
