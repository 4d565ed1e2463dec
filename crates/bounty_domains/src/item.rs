//! # Item Events
//!
//! Breaking and placing blocks, crafting and smelting items all describe the
//! same thing: an item type, its data value, and whether a player put it
//! there.

use bounty_core::{rule_query, Attr};

use crate::ids::ItemId;
use crate::readings;

rule_query! {
    /// Query for block break/place, craft and smelt events.
    pub struct ItemQuery indexed by ItemIndex {
        /// Item or block type.
        item: ItemId,
        /// Durability or data value (wool colour, log species, ...).
        durability: u16,
        /// Block was placed by a player rather than generated.
        player_placed: bool,
    }
}

impl ItemQuery {
    /// Builds the query for a live event.
    ///
    /// `items` lists every reading of the item type; an empty list leaves
    /// the type unconstrained. `None` leaves an attribute the event does not
    /// know about unconstrained.
    #[must_use]
    pub fn event(items: &[ItemId], durability: Option<u16>, player_placed: Option<bool>) -> Self {
        Self {
            item: readings(items.iter().copied()),
            durability: Attr::from(durability),
            player_placed: Attr::from(player_placed),
        }
    }
}
