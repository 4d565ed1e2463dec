//! # Attribute Constraints
//!
//! Every attribute of a rule or query is in exactly one of three states:
//!
//! | State | As a rule attribute | As a query attribute |
//! |---|---|---|
//! | `Unconstrained` | wildcard, matches anything | filters nothing |
//! | `OneOf(values)` | matches if the query offers one of `values` | keeps wildcards + rules listing one of `values` |
//! | `MatchesNothing` | the rule can never match | the query matches no rule |
//!
//! An empty list and an omitted attribute are different things. Keeping them
//! apart at the type level removes the ambiguity of "no explicit value".

/// A constraint on a single attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attr<V> {
    /// Wildcard: any value, including absence.
    Unconstrained,
    /// Any one of the listed alternatives. Never empty when built through
    /// [`Attr::one_of`].
    OneOf(Vec<V>),
    /// The empty set.
    MatchesNothing,
}

impl<V> Attr<V> {
    /// The wildcard constraint.
    #[inline]
    #[must_use]
    pub const fn any() -> Self {
        Self::Unconstrained
    }

    /// A constraint accepting exactly one value.
    #[inline]
    #[must_use]
    pub fn one(value: V) -> Self {
        Self::OneOf(vec![value])
    }

    /// Returns true unless this is the wildcard.
    #[inline]
    #[must_use]
    pub const fn is_constrained(&self) -> bool {
        !matches!(self, Self::Unconstrained)
    }

    /// Returns false only for [`Attr::MatchesNothing`] (or a hand-built empty
    /// `OneOf`).
    #[inline]
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::OneOf(values) => !values.is_empty(),
            Self::MatchesNothing => false,
        }
    }

    /// The accepted alternatives, if this attribute lists any.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Option<&[V]> {
        match self {
            Self::OneOf(values) => Some(values),
            _ => None,
        }
    }
}

impl<V: PartialEq> Attr<V> {
    /// Builds a `OneOf` from alternatives, dropping repeats.
    ///
    /// An empty iterator yields [`Attr::MatchesNothing`], never a wildcard.
    #[must_use]
    pub fn one_of(values: impl IntoIterator<Item = V>) -> Self {
        let mut unique: Vec<V> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            Self::MatchesNothing
        } else {
            Self::OneOf(unique)
        }
    }

    /// Evaluates this constraint against one concrete value.
    #[must_use]
    pub fn matches(&self, value: &V) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::OneOf(values) => values.contains(value),
            Self::MatchesNothing => false,
        }
    }

    /// Returns true if both constraints could accept a common value.
    ///
    /// A wildcard on either side is always compatible.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MatchesNothing, _) | (_, Self::MatchesNothing) => false,
            (Self::Unconstrained, _) | (_, Self::Unconstrained) => true,
            (Self::OneOf(a), Self::OneOf(b)) => a.iter().any(|v| b.contains(v)),
        }
    }
}

impl<V> Default for Attr<V> {
    fn default() -> Self {
        Self::Unconstrained
    }
}

impl<V> From<Option<V>> for Attr<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Self::one(value),
            None => Self::Unconstrained,
        }
    }
}
