//! # Typed Ids
//!
//! Thin newtypes over the numeric ids the host game uses, so an item id can
//! never end up in a mob attribute.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident($raw:ty)) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $raw);

        impl $name {
            /// Creates an id from its raw value.
            #[inline]
            #[must_use]
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            /// Returns the raw value.
            #[inline]
            #[must_use]
            pub const fn raw(self) -> $raw {
                self.0
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id! {
    /// Item or block type.
    ItemId(u32)
}

typed_id! {
    /// Mob (entity) type.
    MobType(u32)
}

typed_id! {
    /// Potion effect type.
    PotionType(u16)
}

typed_id! {
    /// Cause of the last damage an entity took.
    DamageCause(u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let item = ItemId::new(54);
        let mob = MobType::from(54);
        assert_eq!(item.raw(), mob.raw());
        assert_eq!(mob.to_string(), "54");
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(PotionType(1) < PotionType(2));
        assert!(DamageCause(9) > DamageCause(3));
    }
}
