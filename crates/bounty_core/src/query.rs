//! # Rule Queries
//!
//! A query is a fixed set of named attributes, each an [`Attr`]. The same
//! type describes both sides of a lookup: rules are stored as partial
//! queries, events are turned into (usually fully constrained) queries.
//!
//! Domains never hand-write their matching code. [`rule_query!`] generates
//! the query struct, one [`AttributeIndex`] per attribute, and the
//! [`RuleQuery`] glue that the generic [`crate::RuleStore`] drives.
//!
//! [`Attr`]: crate::Attr
//! [`AttributeIndex`]: crate::AttributeIndex

use std::fmt::Debug;

use crate::id::RuleId;
use crate::index::CandidateSet;

/// A multi-attribute query the rule store can index and filter by.
pub trait RuleQuery {
    /// One attribute index per attribute of the query.
    type Index: Default + Clone + Debug;

    /// Number of attributes this query constrains.
    fn specificity(&self) -> u32;

    /// False if any attribute is `MatchesNothing`.
    fn is_satisfiable(&self) -> bool;

    /// True if a rule with this shape is compatible with `query`.
    ///
    /// Brute-force counterpart of indexing + filtering, evaluated one
    /// attribute at a time.
    fn accepts(&self, query: &Self) -> bool;

    /// Indexes every constrained attribute of this rule under `id`.
    fn index_into(&self, index: &mut Self::Index, id: RuleId);

    /// Removes from `candidates` every rule incompatible with this query.
    fn filter(&self, index: &Self::Index, candidates: &mut CandidateSet);

    /// Merges `other` into `index`, shifting its ids by `id_offset`.
    fn merge_index(index: &mut Self::Index, other: &Self::Index, id_offset: u64);
}

/// Declares a rule query type and its attribute indexes.
///
/// ```rust
/// bounty_core::rule_query! {
///     /// Block-break query.
///     pub struct BlockQuery indexed by BlockIndex {
///         /// Block type.
///         block: u32,
///         /// Placed by a player rather than generated.
///         player_placed: bool,
///     }
/// }
///
/// use bounty_core::{Attr, RuleQuery};
/// let rule = BlockQuery { block: Attr::one(1), ..BlockQuery::default() };
/// assert_eq!(rule.specificity(), 1);
/// ```
#[macro_export]
macro_rules! rule_query {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident indexed by $index:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $crate::Attr<$ty>,
            )*
        }

        #[doc = concat!("Attribute indexes for [`", stringify!($name), "`].")]
        #[derive(Clone, Debug, Default)]
        $vis struct $index {
            $( $field: $crate::AttributeIndex<$ty>, )*
        }

        impl $crate::RuleQuery for $name {
            type Index = $index;

            fn specificity(&self) -> u32 {
                0 $( + u32::from(self.$field.is_constrained()) )*
            }

            fn is_satisfiable(&self) -> bool {
                true $( && self.$field.is_satisfiable() )*
            }

            fn accepts(&self, query: &Self) -> bool {
                true $( && self.$field.overlaps(&query.$field) )*
            }

            fn index_into(&self, index: &mut $index, id: $crate::RuleId) {
                $( index.$field.insert_attr(&self.$field, id); )*
            }

            fn filter(&self, index: &$index, candidates: &mut $crate::CandidateSet) {
                $(
                    if candidates.is_empty() {
                        return;
                    }
                    index.$field.filter_attr(candidates, &self.$field);
                )*
            }

            fn merge_index(index: &mut $index, other: &$index, id_offset: u64) {
                $( index.$field.merge(&other.$field, id_offset); )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Attr, CandidateSet, RuleId, RuleQuery};

    crate::rule_query! {
        /// Two-attribute query used by the tests below.
        pub struct PairQuery indexed by PairIndex {
            /// First attribute.
            kind: u32,
            /// Second attribute.
            flag: bool,
        }
    }

    #[test]
    fn test_specificity_counts_constrained_attributes() {
        assert_eq!(PairQuery::default().specificity(), 0);
        let rule = PairQuery {
            kind: Attr::one(1),
            flag: Attr::MatchesNothing,
        };
        assert_eq!(rule.specificity(), 2);
        assert!(!rule.is_satisfiable());
    }

    #[test]
    fn test_generated_filter_intersects_attributes() {
        let mut index = PairIndex::default();
        PairQuery { kind: Attr::one(1), flag: Attr::any() }.index_into(&mut index, RuleId::new(0));
        PairQuery { kind: Attr::any(), flag: Attr::one(true) }.index_into(&mut index, RuleId::new(1));

        let mut candidates: CandidateSet = [RuleId::new(0), RuleId::new(1)].into_iter().collect();
        PairQuery { kind: Attr::one(2), flag: Attr::one(true) }.filter(&index, &mut candidates);
        assert_eq!(candidates.into_iter().collect::<Vec<_>>(), vec![RuleId::new(1)]);
    }

    #[test]
    fn test_accepts_mirrors_index() {
        let rule = PairQuery { kind: Attr::one_of([1, 2]), flag: Attr::any() };
        assert!(rule.accepts(&PairQuery { kind: Attr::one(2), flag: Attr::one(false) }));
        assert!(rule.accepts(&PairQuery::default()));
        assert!(!rule.accepts(&PairQuery { kind: Attr::one(3), flag: Attr::any() }));
    }
}
