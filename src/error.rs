//! Error types for rule construction and reducer generation.

use thiserror::Error;

use crate::domain::suffix::Phase;

/// Result type alias using the phaser error type.
pub type Result<T> = std::result::Result<T, PhaserError>;

/// Main error type for rule construction, configuration and generation.
///
/// Every variant is raised synchronously at the call that misused the API.
/// A reducer that was generated successfully never fails.
#[derive(Error, Debug)]
pub enum PhaserError {
    /// Argument has the wrong shape (e.g. an array where an object is required)
    #[error("{what} must be {expected}")]
    InvalidType {
        what: &'static str,
        expected: &'static str,
    },

    /// Argument has the right shape but is semantically invalid
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Type suffix override is rejected (empty mapping, unknown key)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The default transition builder was handed an empty label
    #[error("Missing type suffix label for phase '{0}'")]
    MissingSuffix(Phase),

    /// The default transition builder was handed one label for two phases
    #[error("Type suffix label '{label}' is shared by phases '{first}' and '{second}'")]
    DuplicateSuffix {
        label: String,
        first: Phase,
        second: Phase,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error raised by a user-supplied policy function
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhaserError {
    /// Returns true if a type suffix override was rejected.
    pub fn is_config(&self) -> bool {
        matches!(self, PhaserError::Config(_))
    }
}
