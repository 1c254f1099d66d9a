//! Error types for machine construction, transitions, and definitions.

use thiserror::Error;

/// A single problem found while validating a machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("no states declared. A machine needs at least one state")]
    EmptyStates,

    #[error("state '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("initial state '{state}' is not a declared state")]
    UnknownInitialState { state: String },

    #[error("transition '{from}' -> '{to}' references undeclared state '{state}'")]
    UnknownTransitionState {
        from: String,
        to: String,
        state: String,
    },
}

/// Malformed state machine construction arguments.
///
/// Carries every issue found, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid state machine configuration: {}", render_issues(.issues))]
pub struct ConfigurationError {
    issues: Vec<ConfigIssue>,
}

impl ConfigurationError {
    pub(crate) fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by a rejected transition. A rejected transition leaves
/// the machine exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("invalid state '{state}'. Valid states: {valid:?}")]
    InvalidState { state: String, valid: Vec<String> },

    #[error("transition from '{from}' to '{to}' is not allowed")]
    IllegalTransition { from: String, to: String },
}

/// Errors raised while loading, saving, or building from a machine definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
