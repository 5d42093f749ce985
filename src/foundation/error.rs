/// Convenience result type used across layercast.
pub type LayercastResult<T> = Result<T, LayercastError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-layer problems never surface here; they are recovered and reported as
/// [`ComposeWarning`](crate::ComposeWarning)s on the composed result.
#[derive(thiserror::Error, Debug)]
pub enum LayercastError {
    /// Invalid caller-provided data (document shape, canvas size, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rendering or compositing pixels.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The composition was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("composition cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayercastError {
    /// Build a [`LayercastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayercastError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`LayercastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayercastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
