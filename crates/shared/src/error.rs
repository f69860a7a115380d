use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Internal,
}

/// JSON error body returned by the analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A molecule was added under a role that is not reactant, product or solvent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown molecule role '{role}'")]
pub struct InvalidRoleError {
    pub role: String,
}

impl InvalidRoleError {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SicFormatError {
    #[error("no reactions found in the input")]
    NoReaction,
    #[error("only a single reaction is supported, found {count}")]
    MultipleReactions { count: usize },
    #[error("expected '{{reactants}}>>{{solvent}}>>{{products}}', got '{line}'")]
    MalformedLine { line: String },
}
