//! # Rule Store
//!
//! **Most-specific-rule resolution over partially specified rules.**
//!
//! ## The Lookup Pipeline
//!
//! ```text
//! query -> candidates = every matchable rule
//!       -> for each OneOf attribute: AttributeIndex::filter
//!       -> pick highest (specificity, id)        resolve()
//!       -> or sort by (specificity, id) desc     resolve_ranked()
//! ```
//!
//! ## Thread Safety
//!
//! Building (`insert`, `merge`) takes `&mut self` and happens during a load
//! phase. Lookups take `&self` and only allocate a per-call candidate set, so
//! a finished store can be shared between any number of readers.

use crate::id::RuleId;
use crate::index::CandidateSet;
use crate::query::RuleQuery;

/// A rule as stored: its partial query, its value, and bookkeeping.
#[derive(Clone, Debug)]
struct StoredRule<Q, R> {
    query: Q,
    value: R,
    specificity: u32,
    satisfiable: bool,
}

/// Rules of one domain, indexed for specificity matching.
///
/// Ids are dense: rule `n` lives at slot `n` of the rule table.
#[derive(Clone, Debug)]
pub struct RuleStore<Q: RuleQuery, R> {
    /// One attribute index per attribute of `Q`.
    index: Q::Index,
    /// Rule table, indexed by id.
    rules: Vec<StoredRule<Q, R>>,
}

impl<Q: RuleQuery, R> Default for RuleStore<Q, R> {
    fn default() -> Self {
        Self {
            index: Q::Index::default(),
            rules: Vec::new(),
        }
    }
}

impl<Q: RuleQuery, R> RuleStore<Q, R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules, matchable or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule was ever inserted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The id the next insertion will receive.
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> RuleId {
        RuleId::from(self.rules.len())
    }

    /// Stores a rule and returns its id.
    ///
    /// A rule with a `MatchesNothing` attribute still consumes an id but can
    /// never be returned by a lookup.
    ///
    /// # Panics
    ///
    /// Panics on a malformed query (a `OneOf` with no values).
    pub fn insert(&mut self, query: Q, value: R) -> RuleId {
        let id = self.next_id();
        query.index_into(&mut self.index, id);
        let specificity = query.specificity();
        let satisfiable = query.is_satisfiable();

        tracing::trace!(%id, specificity, satisfiable, "rule inserted");

        self.rules.push(StoredRule {
            query,
            value,
            specificity,
            satisfiable,
        });
        id
    }

    /// Value stored under `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&R> {
        self.rules.get(id.index()).map(|rule| &rule.value)
    }

    /// Partial query `id` was inserted with.
    #[inline]
    #[must_use]
    pub fn query(&self, id: RuleId) -> Option<&Q> {
        self.rules.get(id.index()).map(|rule| &rule.query)
    }

    /// Number of attributes rule `id` constrains.
    #[inline]
    #[must_use]
    pub fn specificity(&self, id: RuleId) -> Option<u32> {
        self.rules.get(id.index()).map(|rule| rule.specificity)
    }

    /// Iterates over all rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Q, &R)> + '_ {
        self.rules
            .iter()
            .enumerate()
            .map(|(slot, rule)| (RuleId::from(slot), &rule.query, &rule.value))
    }

    /// Every rule compatible with `query`, in id order.
    #[must_use]
    pub fn candidates(&self, query: &Q) -> CandidateSet {
        if !query.is_satisfiable() {
            return CandidateSet::new();
        }

        let mut candidates: CandidateSet = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.satisfiable)
            .map(|(slot, _)| RuleId::from(slot))
            .collect();

        query.filter(&self.index, &mut candidates);
        candidates
    }

    /// Id of the best rule for `query`.
    ///
    /// Highest specificity wins; ties go to the highest id, i.e. the rule
    /// inserted last.
    #[must_use]
    pub fn resolve_id(&self, query: &Q) -> Option<RuleId> {
        self.candidates(query)
            .into_iter()
            .max_by_key(|&id| (self.rules[id.index()].specificity, id))
    }

    /// Value of the best rule for `query`. `None` is a normal outcome.
    #[must_use]
    pub fn resolve(&self, query: &Q) -> Option<&R> {
        self.resolve_id(query).and_then(|id| self.get(id))
    }

    /// All matching rules, most specific first, ties by id descending.
    #[must_use]
    pub fn resolve_ranked(&self, query: &Q) -> Vec<RuleId> {
        let mut ranked: Vec<RuleId> = self.candidates(query).into_iter().collect();
        ranked.sort_unstable_by(|a, b| {
            let sa = self.rules[a.index()].specificity;
            let sb = self.rules[b.index()].specificity;
            sb.cmp(&sa).then_with(|| b.cmp(a))
        });
        ranked
    }

    /// Values of all matching rules, in [`RuleStore::resolve_ranked`] order.
    #[must_use]
    pub fn ranked_values(&self, query: &Q) -> Vec<&R> {
        self.resolve_ranked(query)
            .into_iter()
            .map(|id| &self.rules[id.index()].value)
            .collect()
    }

    /// Appends every rule of `other`, shifting its ids past this store's.
    ///
    /// Rules from `other` keep their relative order and therefore win ties
    /// against every rule already here.
    ///
    /// # Panics
    ///
    /// Panics if a shifted id overflows; the index merge shifts every id
    /// with [`RuleId::offset`].
    pub fn merge(&mut self, other: Self) {
        let offset = self.rules.len() as u64;

        Q::merge_index(&mut self.index, &other.index, offset);
        let merged = other.rules.len();
        self.rules.extend(other.rules);

        tracing::debug!(offset, merged, total = self.rules.len(), "rule stores merged");
    }

    /// Re-types the stored values, keeping ids and indexes intact.
    #[must_use]
    pub fn map_values<S>(self, mut f: impl FnMut(R) -> S) -> RuleStore<Q, S> {
        RuleStore {
            index: self.index,
            rules: self
                .rules
                .into_iter()
                .map(|rule| StoredRule {
                    query: rule.query,
                    value: f(rule.value),
                    specificity: rule.specificity,
                    satisfiable: rule.satisfiable,
                })
                .collect(),
        }
    }
}

impl<Q: RuleQuery + PartialEq, R> RuleStore<Q, R> {
    /// Latest rule whose partial query equals `query` exactly.
    ///
    /// Loaders use this to report duplicate rule definitions.
    #[must_use]
    pub fn find_exact(&self, query: &Q) -> Option<RuleId> {
        self.rules
            .iter()
            .rposition(|rule| rule.query == *query)
            .map(RuleId::from)
    }
}

impl<Q: RuleQuery, R> RuleStore<Q, R> {
    /// Brute-force resolution without the indexes. Used to cross-check.
    #[must_use]
    pub fn resolve_id_linear(&self, query: &Q) -> Option<RuleId> {
        if !query.is_satisfiable() {
            return None;
        }
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.satisfiable && rule.query.accepts(query))
            .map(|(slot, rule)| (rule.specificity, RuleId::from(slot)))
            .max()
            .map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attr;

    crate::rule_query! {
        /// Mob-like query for store tests.
        pub struct KillQuery indexed by KillIndex {
            /// Mob type.
            mob: u32,
            /// Damage cause.
            cause: u8,
            /// Baby flag.
            baby: bool,
        }
    }

    fn kill(mob: Attr<u32>, cause: Attr<u8>, baby: Attr<bool>) -> KillQuery {
        KillQuery { mob, cause, baby }
    }

    fn event(mob: u32, cause: u8, baby: bool) -> KillQuery {
        kill(Attr::one(mob), Attr::one(cause), Attr::one(baby))
    }

    #[test]
    fn test_universal_rule_survives_any_query() {
        let mut store = RuleStore::new();
        store.insert(KillQuery::default(), "universal");
        store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), "zombie");

        assert_eq!(store.resolve(&event(999, 250, true)), Some(&"universal"));
        assert_eq!(store.specificity(RuleId::FIRST), Some(0));
    }

    #[test]
    fn test_exact_match_exclusivity() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), "zombie");
        store.insert(kill(Attr::one(2), Attr::any(), Attr::any()), "skeleton");

        assert_eq!(store.resolve(&event(1, 0, false)), Some(&"zombie"));
        assert_eq!(store.resolve(&event(2, 0, false)), Some(&"skeleton"));
        assert_eq!(store.resolve(&event(3, 0, false)), None);
    }

    #[test]
    fn test_specificity_ordering() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(1), Attr::one(4), Attr::one(true)), "three");
        store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), "one");
        store.insert(kill(Attr::one(1), Attr::one(4), Attr::any()), "two");

        assert_eq!(store.resolve(&event(1, 4, true)), Some(&"three"));
        assert_eq!(store.resolve(&event(1, 4, false)), Some(&"two"));
        assert_eq!(store.resolve(&event(1, 5, true)), Some(&"one"));
    }

    #[test]
    fn test_ties_go_to_latest_rule() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), "a");
        store.insert(kill(Attr::any(), Attr::one(4), Attr::any()), "b");

        for _ in 0..100 {
            assert_eq!(store.resolve(&event(1, 4, false)), Some(&"b"));
        }
    }

    #[test]
    fn test_unconstrained_query_attribute_filters_nothing() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(1), Attr::one(4), Attr::any()), "fire zombie");

        let query = kill(Attr::one(1), Attr::any(), Attr::any());
        assert_eq!(store.resolve(&query), Some(&"fire zombie"));
    }

    #[test]
    fn test_alternative_readings_in_query() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(50), Attr::any(), Attr::any()), "category");

        let query = kill(Attr::one_of([1, 50]), Attr::one(0), Attr::one(false));
        assert_eq!(store.resolve(&query), Some(&"category"));
    }

    #[test]
    fn test_matches_nothing_on_both_sides() {
        let mut store = RuleStore::new();
        let dead = store.insert(kill(Attr::MatchesNothing, Attr::any(), Attr::any()), "dead");
        store.insert(KillQuery::default(), "fallback");

        assert_eq!(dead, RuleId::FIRST);
        assert_eq!(store.resolve(&KillQuery::default()), Some(&"fallback"));
        assert_eq!(store.resolve(&event(1, 1, true)), Some(&"fallback"));

        let nothing = kill(Attr::MatchesNothing, Attr::any(), Attr::any());
        assert_eq!(store.resolve(&nothing), None);
        assert!(store.resolve_ranked(&nothing).is_empty());
    }

    #[test]
    fn test_ranked_order() {
        let mut store = RuleStore::new();
        let any = store.insert(KillQuery::default(), "any");
        let mob = store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), "mob");
        let cause = store.insert(kill(Attr::any(), Attr::one(4), Attr::any()), "cause");
        let both = store.insert(kill(Attr::one(1), Attr::one(4), Attr::any()), "both");

        assert_eq!(store.resolve_ranked(&event(1, 4, true)), vec![both, cause, mob, any]);
        assert_eq!(
            store.ranked_values(&event(1, 4, true)),
            vec![&"both", &"cause", &"mob", &"any"]
        );
    }

    #[test]
    fn test_merge_preserves_every_rule() {
        let queries = [
            kill(Attr::one(1), Attr::any(), Attr::any()),
            kill(Attr::one(2), Attr::one(3), Attr::any()),
            kill(Attr::any(), Attr::any(), Attr::one(true)),
        ];

        let mut first = RuleStore::new();
        first.insert(queries[0].clone(), "first-zombie");
        first.insert(kill(Attr::one(7), Attr::any(), Attr::any()), "first-only");

        let mut second = RuleStore::new();
        for (n, query) in queries.iter().enumerate() {
            second.insert(query.clone(), ["second-a", "second-b", "second-c"][n]);
        }

        first.merge(second);
        assert_eq!(first.len(), 5);
        assert_eq!(first.next_id(), RuleId::new(5));

        assert_eq!(first.resolve(&event(1, 0, false)), Some(&"second-a"));
        assert_eq!(first.resolve(&event(2, 3, false)), Some(&"second-b"));
        assert_eq!(first.resolve(&event(9, 9, true)), Some(&"second-c"));
        assert_eq!(first.resolve(&event(7, 0, false)), Some(&"first-only"));
        assert_eq!(first.find_exact(&queries[0]), Some(RuleId::new(2)));
    }

    #[test]
    fn test_map_values_keeps_index() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one(1), Attr::any(), Attr::any()), 10);
        let doubled = store.map_values(|value| value * 2);
        assert_eq!(doubled.resolve(&event(1, 0, false)), Some(&20));
    }

    #[test]
    fn test_linear_resolution_agrees() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::one_of([1, 2]), Attr::any(), Attr::any()), ());
        store.insert(kill(Attr::any(), Attr::one(3), Attr::one(false)), ());
        store.insert(KillQuery::default(), ());

        for mob in 0..4 {
            for cause in 0..5 {
                let query = event(mob, cause, false);
                assert_eq!(store.resolve_id(&query), store.resolve_id_linear(&query));
            }
        }
    }

    #[test]
    #[should_panic(expected = "MatchesNothing")]
    fn test_malformed_rule_panics() {
        let mut store = RuleStore::new();
        store.insert(kill(Attr::OneOf(Vec::new()), Attr::any(), Attr::any()), ());
    }
}
