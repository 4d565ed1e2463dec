//! # Rewards
//!
//! A reward is what a matched rule yields: a named, ordered set of resource
//! factories, each backed by a [`Range`].
//!
//! ## Multipliers
//!
//! - `multiplier` scales the rule's **own** factories
//! - `inherit_multiplier` scales factories **inherited** from a less
//!   specific rule (only meaningful when `inherit` is set)
//!
//! Rewards are built once per configuration generation and never mutated.
//! Every transformation returns a new value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::range::Range;

/// A kind of resource a reward can grant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceKind {
    /// Experience points.
    Experience,
    /// Economy currency.
    Currency,
    /// Anything else the host application understands, by name.
    Custom(String),
}

impl ResourceKind {
    /// Canonical name of this kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Experience => "experience",
            Self::Currency => "currency",
            Self::Custom(name) => name,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = EconomyError;

    fn from_str(text: &str) -> EconomyResult<Self> {
        let name = text.trim().to_lowercase();
        match name.as_str() {
            "" => Err(EconomyError::UnknownResource),
            "xp" | "exp" | "experience" => Ok(Self::Experience),
            "money" | "currency" | "economy" => Ok(Self::Currency),
            _ => Ok(Self::Custom(name)),
        }
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = EconomyError;

    fn try_from(text: String) -> EconomyResult<Self> {
        text.parse()
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The named set of resource factories a matched rule yields.
#[derive(Clone, Debug, PartialEq)]
pub struct Reward {
    /// Human-readable label, usually where the rule came from.
    name: String,
    /// Raw factories in declaration order, before `multiplier`.
    factories: Vec<(ResourceKind, Range)>,
    /// Whether this rule layers on top of a less specific one.
    inherit: bool,
    /// Scale for this rule's own factories.
    multiplier: f64,
    /// Scale for factories inherited from a less specific rule.
    inherit_multiplier: f64,
}

impl Reward {
    /// Creates an empty, non-inheriting reward.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factories: Vec::new(),
            inherit: false,
            multiplier: 1.0,
            inherit_multiplier: 1.0,
        }
    }

    /// Adds a factory. Setting the same kind twice replaces it in place.
    #[must_use]
    pub fn with_factory(mut self, kind: ResourceKind, range: impl Into<Range>) -> Self {
        set_factory(&mut self.factories, kind, range.into());
        self
    }

    /// Marks this reward as layering over less specific rules.
    #[must_use]
    pub const fn with_inherit(mut self, inherit: bool) -> Self {
        self.inherit = inherit;
        self
    }

    /// Sets the multiplier for this reward's own factories.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the multiplier for inherited factories.
    #[must_use]
    pub const fn with_inherit_multiplier(mut self, multiplier: f64) -> Self {
        self.inherit_multiplier = multiplier;
        self
    }

    /// Label of this reward.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this reward inherits from less specific rules.
    #[inline]
    #[must_use]
    pub const fn inherits(&self) -> bool {
        self.inherit
    }

    /// Multiplier for own factories.
    #[inline]
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Multiplier for inherited factories.
    #[inline]
    #[must_use]
    pub const fn inherit_multiplier(&self) -> f64 {
        self.inherit_multiplier
    }

    /// Number of factories.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if this reward grants nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Effective range for `kind`, multiplier applied.
    #[must_use]
    pub fn factory(&self, kind: &ResourceKind) -> Option<Range> {
        self.factories
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, range)| range.multiply(self.multiplier))
    }

    /// Effective factories in declaration order, multiplier applied.
    pub fn factories(&self) -> impl Iterator<Item = (&ResourceKind, Range)> + '_ {
        self.factories
            .iter()
            .map(move |(kind, range)| (kind, range.multiply(self.multiplier)))
    }

    /// Returns a copy whose own factories are scaled by an extra `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            multiplier: self.multiplier * factor,
            ..self.clone()
        }
    }

    /// Returns a copy with the multiplier folded into the factories.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            factories: self
                .factories()
                .map(|(kind, range)| (kind.clone(), range))
                .collect(),
            inherit: self.inherit,
            multiplier: 1.0,
            inherit_multiplier: 1.0,
        }
    }

    /// Layers this reward over `base`, the effective reward of the less
    /// specific rules.
    ///
    /// Kinds set here override `base`; kinds only `base` has are inherited,
    /// scaled by `inherit_multiplier`. The result is normalized.
    #[must_use]
    pub fn inherit_from(&self, base: &Self) -> Self {
        let mut factories: Vec<(ResourceKind, Range)> = base
            .factories()
            .map(|(kind, range)| (kind.clone(), range.multiply(self.inherit_multiplier)))
            .collect();
        for (kind, range) in self.factories() {
            set_factory(&mut factories, kind.clone(), range);
        }

        Self {
            name: self.name.clone(),
            factories,
            inherit: self.inherit,
            multiplier: 1.0,
            inherit_multiplier: 1.0,
        }
    }

    /// Samples every factory once.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> RewardDraw {
        RewardDraw {
            amounts: self
                .factories()
                .map(|(kind, range)| (kind.clone(), range.sample_int(rng)))
                .collect(),
        }
    }

    /// Samples every factory and hands the amounts to `sink`.
    pub fn apply<R: Rng + ?Sized, S: RewardSink + ?Sized>(&self, rng: &mut R, sink: &mut S) {
        for (kind, amount) in self.draw(rng).amounts {
            sink.grant(&kind, amount);
        }
    }
}

fn set_factory(factories: &mut Vec<(ResourceKind, Range)>, kind: ResourceKind, range: Range) {
    match factories.iter_mut().find(|(k, _)| *k == kind) {
        Some(slot) => slot.1 = range,
        None => factories.push((kind, range)),
    }
}

/// Sampled amounts of one reward, in factory order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardDraw {
    amounts: Vec<(ResourceKind, i64)>,
}

impl RewardDraw {
    /// Amount drawn for `kind`.
    #[must_use]
    pub fn get(&self, kind: &ResourceKind) -> Option<i64> {
        self.amounts.iter().find(|(k, _)| k == kind).map(|(_, amount)| *amount)
    }

    /// Iterates over `(kind, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKind, i64)> + '_ {
        self.amounts.iter().map(|(kind, amount)| (kind, *amount))
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Receives sampled amounts. Implemented by the host application (granting
/// currency, spawning experience orbs, ...).
///
/// Amounts may be zero or negative; validating them is the sink's job.
pub trait RewardSink {
    /// Grants `amount` units of `kind`.
    fn grant(&mut self, kind: &ResourceKind, amount: i64);
}

impl RewardSink for HashMap<ResourceKind, i64> {
    fn grant(&mut self, kind: &ResourceKind, amount: i64) {
        *self.entry(kind.clone()).or_insert(0) += amount;
    }
}

impl RewardSink for Vec<(ResourceKind, i64)> {
    fn grant(&mut self, kind: &ResourceKind, amount: i64) {
        self.push((kind.clone(), amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn gold() -> ResourceKind {
        ResourceKind::Custom("gold".to_string())
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("XP".parse::<ResourceKind>(), Ok(ResourceKind::Experience));
        assert_eq!("money".parse::<ResourceKind>(), Ok(ResourceKind::Currency));
        assert_eq!("Gold".parse::<ResourceKind>(), Ok(gold()));
        assert_eq!(" ".parse::<ResourceKind>(), Err(EconomyError::UnknownResource));
        assert_eq!(ResourceKind::Experience.to_string(), "experience");
    }

    #[test]
    fn test_factory_replaces_in_place() {
        let reward = Reward::new("r")
            .with_factory(ResourceKind::Experience, 1.0)
            .with_factory(ResourceKind::Currency, 2.0)
            .with_factory(ResourceKind::Experience, 5.0);

        let kinds: Vec<_> = reward.factories().map(|(k, _)| k.clone()).collect();
        assert_eq!(kinds, vec![ResourceKind::Experience, ResourceKind::Currency]);
        assert_eq!(reward.factory(&ResourceKind::Experience), Some(Range::constant(5.0)));
    }

    #[test]
    fn test_multiplier_applies_to_own_factories() {
        let reward = Reward::new("r")
            .with_factory(ResourceKind::Experience, Range::new(1.0, 2.0))
            .with_multiplier(3.0);
        assert_eq!(reward.factory(&ResourceKind::Experience), Some(Range::new(3.0, 6.0)));
        assert_eq!(reward.scaled(2.0).factory(&ResourceKind::Experience), Some(Range::new(6.0, 12.0)));

        let normalized = reward.normalized();
        assert!((normalized.multiplier() - 1.0).abs() < f64::EPSILON);
        assert_eq!(normalized.factory(&ResourceKind::Experience), Some(Range::new(3.0, 6.0)));
    }

    #[test]
    fn test_inherit_from_overrides_and_keeps() {
        let base = Reward::new("base")
            .with_factory(ResourceKind::Experience, 10.0)
            .with_factory(ResourceKind::Currency, 4.0);
        let specific = Reward::new("specific")
            .with_factory(ResourceKind::Experience, 2.0)
            .with_factory(gold(), 1.0)
            .with_inherit(true)
            .with_multiplier(2.0)
            .with_inherit_multiplier(0.5);

        let merged = specific.inherit_from(&base);
        assert_eq!(merged.name(), "specific");
        assert_eq!(merged.factory(&ResourceKind::Experience), Some(Range::constant(4.0)));
        assert_eq!(merged.factory(&ResourceKind::Currency), Some(Range::constant(2.0)));
        assert_eq!(merged.factory(&gold()), Some(Range::constant(2.0)));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_apply_feeds_sink() {
        let reward = Reward::new("r")
            .with_factory(ResourceKind::Experience, 3.0)
            .with_factory(ResourceKind::Currency, -2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut totals: HashMap<ResourceKind, i64> = HashMap::new();
        reward.apply(&mut rng, &mut totals);
        reward.apply(&mut rng, &mut totals);
        assert_eq!(totals.get(&ResourceKind::Experience), Some(&6));
        assert_eq!(totals.get(&ResourceKind::Currency), Some(&-4));

        let draw = reward.draw(&mut rng);
        assert_eq!(draw.get(&ResourceKind::Experience), Some(3));
        assert_eq!(draw.iter().count(), 2);
    }
}
