//! # Configuration Errors and Warnings
//!
//! Errors abort loading a generation. Warnings describe configuration that
//! loads fine but is probably not what the author meant; they are returned
//! to the caller and logged.

use std::fmt;
use std::path::PathBuf;

use bounty_core::RuleId;
use bounty_domains::RegistryError;
use bounty_economy::{EconomyError, ResourceKind};
use thiserror::Error;

use crate::trigger::Trigger;

/// Errors that stop a configuration generation from loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file could not be read.
    #[error("cannot read {path}: {error}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: std::io::Error,
    },

    /// A file is not valid TOML or does not fit the schema.
    #[error("cannot parse {file}: {error}")]
    Parse {
        /// File being parsed.
        file: String,
        /// Underlying error.
        #[source]
        error: toml::de::Error,
    },

    /// A name no registry knows.
    #[error("{file}: unknown {kind} name {name:?}")]
    UnknownName {
        /// File the name appears in.
        file: String,
        /// Registry consulted.
        kind: &'static str,
        /// The name.
        name: String,
    },

    /// A numeric id that does not fit the attribute's id type.
    #[error("{file}: {kind} id {id} is out of range")]
    IdOutOfRange {
        /// File the id appears in.
        file: String,
        /// Attribute kind.
        kind: &'static str,
        /// The id.
        id: u32,
    },

    /// A player, group, preset or world name that is empty once trimmed.
    #[error("{file}: blank {kind} name")]
    BlankName {
        /// File the name appears in.
        file: String,
        /// Attribute the name was given for.
        kind: &'static str,
    },

    /// A multiplier below zero.
    #[error("{file}: negative multiplier {value}")]
    NegativeMultiplier {
        /// File the multiplier appears in.
        file: String,
        /// The multiplier.
        value: f64,
    },

    /// A malformed range or resource.
    #[error("{file}: {error}")]
    Economy {
        /// File the value appears in.
        file: String,
        /// Underlying error.
        #[source]
        error: EconomyError,
    },

    /// A registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Suspicious but loadable configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigWarning {
    /// A rule with exactly the same attributes as an earlier one in the same
    /// file. The later rule wins every lookup; the earlier one is dead.
    DuplicateRule {
        /// File both rules are in.
        file: String,
        /// Trigger section.
        trigger: Trigger,
        /// Position of the later rule within its section.
        index: usize,
        /// Id of the shadowed rule.
        shadows: RuleId,
    },

    /// A reward that can take resources away.
    NegativeReward {
        /// File the rule is in.
        file: String,
        /// Trigger section.
        trigger: Trigger,
        /// Position of the rule within its section.
        index: usize,
        /// Resource with a negative bound.
        kind: ResourceKind,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRule {
                file,
                trigger,
                index,
                shadows,
            } => write!(
                f,
                "{file}: {trigger} rule {index} repeats rule {shadows} and replaces it"
            ),
            Self::NegativeReward {
                file,
                trigger,
                index,
                kind,
            } => write!(f, "{file}: {trigger} rule {index} may take away {kind}"),
        }
    }
}
