/// Convenience result type used across scenery.
pub type SceneryResult<T> = Result<T, SceneryError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Malformed-but-renderable scene data (unknown layout kind, dangling edge endpoints,
/// unknown primitive tags) never reaches this type; those paths degrade and are reported
/// as [`crate::Diagnostic`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum SceneryError {
    /// Invalid spec document or canvas configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// An id did not resolve to a registered visualization, node, or layer.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What kind of entity was looked up.
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneryError {
    /// Build a [`SceneryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneryError::NotFound`] value.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build a [`SceneryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneryError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
