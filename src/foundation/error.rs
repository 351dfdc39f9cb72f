/// Convenience result type used across cardframe.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy.
///
/// Only precondition violations are surfaced by the presentation API; everything else is
/// recovered locally and reported through `tracing`.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// A required input for the operation was not supplied.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Invalid user-provided geometry or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CardError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
