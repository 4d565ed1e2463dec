//! # Attribute Index
//!
//! **Inverted index from one attribute's values to the rules that list them.**
//!
//! ```text
//!   value      rule ids
//!   ─────      ────────
//!   ZOMBIE  -> {0, 4}
//!   SKELETON-> {4}          constrained = {0, 4}
//!   CREEPER -> {7}                     ∪ {7}
//! ```
//!
//! A rule that never touched this attribute appears under no value and is an
//! implicit wildcard. A rule listing several values appears under each of
//! them (OR semantics within that one rule).

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::attr::Attr;
use crate::id::RuleId;

/// Set of rule ids still in the running during a lookup.
pub type CandidateSet = BTreeSet<RuleId>;

/// Inverted index over one attribute.
#[derive(Clone, Debug)]
pub struct AttributeIndex<V> {
    /// Value -> rules that accept that value.
    buckets: HashMap<V, BTreeSet<RuleId>>,
    /// Every rule that constrains this attribute to something.
    constrained: BTreeSet<RuleId>,
}

impl<V> Default for AttributeIndex<V> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            constrained: BTreeSet::new(),
        }
    }
}

impl<V: Eq + Hash + Clone + Debug> AttributeIndex<V> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that rule `id` accepts each of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already stored under one of the values. Callers
    /// must hand out a fresh id per rule.
    pub fn insert(&mut self, values: impl IntoIterator<Item = V>, id: RuleId) {
        for value in values {
            let bucket = self.buckets.entry(value).or_default();
            assert!(bucket.insert(id), "rule {id} indexed twice under the same attribute value");
        }
        self.constrained.insert(id);
    }

    /// Indexes a rule attribute.
    ///
    /// `Unconstrained` leaves no trace. `MatchesNothing` marks the rule as
    /// constrained without any value, so no `OneOf` query can reach it.
    ///
    /// # Panics
    ///
    /// Panics on a `OneOf` with no values: that state is reserved for
    /// `MatchesNothing` and can only come from a malformed rule.
    pub fn insert_attr(&mut self, attr: &Attr<V>, id: RuleId) {
        match attr {
            Attr::Unconstrained => {}
            Attr::OneOf(values) => {
                assert!(
                    !values.is_empty(),
                    "rule {id}: empty alternative list must be expressed as MatchesNothing"
                );
                self.insert(values.iter().cloned(), id);
            }
            Attr::MatchesNothing => {
                self.constrained.insert(id);
            }
        }
    }

    /// Narrows `candidates` to the rules compatible with `query_values`.
    ///
    /// Survivors are exactly the wildcards on this attribute plus the rules
    /// that list at least one of `query_values`.
    pub fn filter(&self, candidates: &mut CandidateSet, query_values: &[V]) {
        if candidates.is_empty() {
            return;
        }

        let explicit: BTreeSet<RuleId> = query_values
            .iter()
            .filter_map(|value| self.buckets.get(value))
            .flatten()
            .filter(|id| candidates.contains(id))
            .copied()
            .collect();

        candidates.retain(|id| !self.constrained.contains(id) || explicit.contains(id));
    }

    /// Applies a query attribute to `candidates`.
    ///
    /// An unconstrained query attribute filters nothing, whatever the rules
    /// did with it. `MatchesNothing` empties the set.
    pub fn filter_attr(&self, candidates: &mut CandidateSet, attr: &Attr<V>) {
        match attr {
            Attr::Unconstrained => {}
            Attr::OneOf(values) => self.filter(candidates, values),
            Attr::MatchesNothing => candidates.clear(),
        }
    }

    /// Copies every entry of `other` into this index, shifting ids by
    /// `id_offset`.
    ///
    /// Must be called with the same offset used for the owning rule table.
    pub fn merge(&mut self, other: &Self, id_offset: u64) {
        for (value, ids) in &other.buckets {
            let bucket = self.buckets.entry(value.clone()).or_default();
            bucket.extend(ids.iter().map(|id| id.offset(id_offset)));
        }
        self.constrained
            .extend(other.constrained.iter().map(|id| id.offset(id_offset)));
    }

    /// Rules listing `value`.
    #[must_use]
    pub fn rules_for(&self, value: &V) -> Option<&BTreeSet<RuleId>> {
        self.buckets.get(value)
    }

    /// Returns true if `id` constrains this attribute.
    #[inline]
    #[must_use]
    pub fn is_constrained(&self, id: RuleId) -> bool {
        self.constrained.contains(&id)
    }

    /// Number of distinct values indexed.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no rule constrains this attribute.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constrained.is_empty()
    }
}
