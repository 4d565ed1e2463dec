//! # Rule Identifiers
//!
//! Dense, monotonically increasing ids assigned by a [`crate::RuleStore`].
//!
//! Ids are never reused. Insertion order is meaningful: when two rules are
//! equally specific, the one with the higher id (inserted later) wins.

use std::fmt;

/// Identifier of a rule inside one store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct RuleId(u64);

impl RuleId {
    /// The first id handed out by an empty store.
    pub const FIRST: Self = Self(0);

    /// Creates an id from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id as a table index.
    ///
    /// # Panics
    ///
    /// Panics if the id does not fit in `usize` on this target.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::try_from(self.0).expect("rule id exceeds addressable table size")
    }

    /// Shifts this id by `by`, used when one store is merged into another.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted. Wrapping would silently alias
    /// rules from different layers.
    #[inline]
    #[must_use]
    pub fn offset(self, by: u64) -> Self {
        match self.0.checked_add(by) {
            Some(raw) => Self(raw),
            None => panic!("rule id space exhausted: {} + {by}", self.0),
        }
    }
}

impl From<usize> for RuleId {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_shifts() {
        assert_eq!(RuleId::new(3).offset(10), RuleId::new(13));
        assert_eq!(RuleId::FIRST.offset(0), RuleId::FIRST);
    }

    #[test]
    #[should_panic(expected = "rule id space exhausted")]
    fn test_offset_overflow_is_fatal() {
        let _ = RuleId::new(u64::MAX).offset(1);
    }

    #[test]
    fn test_ordering_follows_insertion() {
        assert!(RuleId::new(2) > RuleId::new(1));
        assert_eq!(RuleId::new(7).to_string(), "#7");
    }
}
