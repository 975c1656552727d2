/// Convenient result alias used across shellmotion APIs.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error type for configuration, animation, and DOM backend failures.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid configuration or input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation definition (bad duration, unknown effect handle, ...).
    #[error("animation error: {0}")]
    Animation(String),

    /// A DOM backend operation failed (element creation, listener attachment, ...).
    #[error("dom error: {0}")]
    Dom(String),

    /// Serialization/deserialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped external error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Dom`] value.
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
