/// Convenience result type used across the compositors.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Top-level error taxonomy for compositing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// Missing or malformed configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// Asset loading, decoding or sizing problems.
    #[error("asset error: {0}")]
    Asset(String),

    /// Font registration or text layout failures.
    #[error("text error: {0}")]
    Text(String),

    /// Animated image encoding failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// Build a [`ComposeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ComposeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ComposeError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`ComposeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<serde_json::Error> for ComposeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<image::ImageError> for ComposeError {
    fn from(err: image::ImageError) -> Self {
        Self::Asset(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
