//! # Registry Error Types

use thiserror::Error;

/// Errors raised while building a name registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same name was defined twice in one registry.
    #[error("{registry}: name {name:?} is already defined")]
    DuplicateName {
        /// Registry being built.
        registry: &'static str,
        /// Normalized name.
        name: String,
    },

    /// An alias pointing at a name that does not exist (yet).
    #[error("{registry}: alias {alias:?} refers to unknown name {target:?}")]
    UnknownTarget {
        /// Registry being built.
        registry: &'static str,
        /// Alias being defined.
        alias: String,
        /// Name it refers to.
        target: String,
    },

    /// A name that is empty after normalization.
    #[error("{registry}: names must not be empty")]
    EmptyName {
        /// Registry being built.
        registry: &'static str,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
