//! # Reward Inheritance
//!
//! **Folds a ranked chain of matching rules into one effective reward.**
//!
//! ```text
//!   ranked (most specific first):  R3(inherit)  R2(inherit)  R1  R0
//!   folded least specific first:   R1 -> R2 over R1 -> R3 over (R2 over R1)
//! ```
//!
//! A rule that does not inherit replaces everything less specific than it,
//! so the walk only needs the ranked chain down to the first such rule.
//! Everything below it (R0 above) is never looked at.

use bounty_core::{RuleQuery, RuleStore};

use crate::reward::Reward;

/// Folds rewards given least specific first.
///
/// The first reward seeds the accumulator. Each following reward either
/// replaces it (no `inherit`) or is layered over it. Returns `None` for an
/// empty chain.
pub fn resolve_chain<'a, I>(chain: I) -> Option<Reward>
where
    I: IntoIterator<Item = &'a Reward>,
{
    chain.into_iter().fold(None, |acc, reward| match acc {
        Some(base) if reward.inherits() => Some(reward.inherit_from(&base)),
        _ => Some(reward.normalized()),
    })
}

/// Effective-reward lookup for any store of rewards.
pub trait EffectiveReward<Q: RuleQuery> {
    /// Effective reward for `query` after inheritance, or `None` if no rule
    /// matches.
    fn effective_reward(&self, query: &Q) -> Option<Reward>;
}

impl<Q: RuleQuery> EffectiveReward<Q> for RuleStore<Q, Reward> {
    fn effective_reward(&self, query: &Q) -> Option<Reward> {
        let ranked = self.ranked_values(query);

        // Only the most specific run of inheriting rules plus the first
        // non-inheriting rule below it can influence the result.
        let cut = ranked
            .iter()
            .position(|reward| !reward.inherits())
            .map_or(ranked.len(), |pos| pos + 1);
        let chain = &ranked[..cut];

        tracing::trace!(
            matched = ranked.len(),
            folded = chain.len(),
            "resolving effective reward"
        );

        resolve_chain(chain.iter().rev().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;
    use crate::reward::ResourceKind;
    use bounty_core::Attr;

    bounty_core::rule_query! {
        /// Single-attribute query used by the tests below.
        pub struct KindQuery indexed by KindIndex {
            /// Event kind.
            kind: u8,
            /// Secondary flag.
            flag: bool,
        }
    }

    fn xp(name: &str, amount: f64) -> Reward {
        Reward::new(name).with_factory(ResourceKind::Experience, amount)
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(resolve_chain(std::iter::empty()), None);
    }

    #[test]
    fn test_non_inheriting_rule_replaces() {
        let base = xp("base", 1.0).with_factory(ResourceKind::Currency, 5.0);
        let top = xp("top", 3.0);
        let effective = resolve_chain([&base, &top]).expect("non-empty chain");
        assert_eq!(effective.name(), "top");
        assert_eq!(effective.factory(&ResourceKind::Currency), None);
    }

    #[test]
    fn test_inheriting_first_rule_stands_alone() {
        let only = xp("only", 2.0).with_inherit(true).with_multiplier(2.0);
        let effective = resolve_chain([&only]).expect("non-empty chain");
        assert_eq!(effective.factory(&ResourceKind::Experience), Some(Range::constant(4.0)));
    }

    #[test]
    fn test_store_lookup_stops_at_first_replacing_rule() {
        let mut store: RuleStore<KindQuery, Reward> = RuleStore::new();
        store.insert(
            KindQuery::default(),
            xp("universal", 1.0).with_factory(ResourceKind::Currency, 9.0),
        );
        store.insert(
            KindQuery { kind: Attr::one(1), ..KindQuery::default() },
            xp("kind", 2.0),
        );
        store.insert(
            KindQuery { kind: Attr::one(1), flag: Attr::one(true) },
            Reward::new("flagged")
                .with_factory(ResourceKind::Currency, 4.0)
                .with_inherit(true),
        );

        let event = KindQuery { kind: Attr::one(1), flag: Attr::one(true) };
        let effective = store.effective_reward(&event).expect("rules match");
        assert_eq!(effective.name(), "flagged");
        assert_eq!(effective.factory(&ResourceKind::Experience), Some(Range::constant(2.0)));
        assert_eq!(effective.factory(&ResourceKind::Currency), Some(Range::constant(4.0)));

        let other = KindQuery { kind: Attr::one(2), flag: Attr::one(false) };
        let fallback = store.effective_reward(&other).expect("universal rule");
        assert_eq!(fallback.name(), "universal");
    }
}
