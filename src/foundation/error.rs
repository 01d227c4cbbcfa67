/// Convenience result type used across the generator.
pub type OpgenResult<T> = Result<T, OpgenError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum OpgenError {
    /// Malformed operation table or invalid generation options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing the operation table.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpgenError {
    /// Build a [`OpgenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OpgenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
