use thiserror::Error;

/// Errors raised while validating configuration or building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A configuration value is out of its allowed range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// Generation produced no particles at all.
    #[error("scene is empty: {0}")]
    EmptyScene(String),
}

impl SceneError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type using [`SceneError`].
pub type Result<T> = std::result::Result<T, SceneError>;
