//! # Economy Error Types
//!
//! All recoverable errors raised while building rewards from configuration.

use thiserror::Error;

/// Errors that can occur while building ranges and rewards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomyError {
    /// Text that does not describe a range.
    #[error("invalid range {text:?}: {reason}")]
    InvalidRange {
        /// The offending text.
        text: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A range bound or multiplier that is NaN or infinite.
    #[error("non-finite value {0} in reward configuration")]
    NonFiniteBound(f64),

    /// A resource kind with an empty name.
    #[error("resource kind must have a name")]
    UnknownResource,
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
