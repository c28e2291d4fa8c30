/// Convenience result type used across framestack.
pub type FrameStackResult<T> = Result<T, FrameStackError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum FrameStackError {
    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be bound as a texture.
    #[error("resource binding error: {0}")]
    ResourceBinding(String),

    /// Offscreen render targets could not be allocated for the requested size.
    #[error("target allocation error: {0}")]
    TargetAllocation(String),

    /// An effect routine failed while rendering a pass.
    #[error("effect error: {0}")]
    Effect(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameStackError {
    /// Build a [`FrameStackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameStackError::ResourceBinding`] value.
    pub fn resource_binding(msg: impl Into<String>) -> Self {
        Self::ResourceBinding(msg.into())
    }

    /// Build a [`FrameStackError::TargetAllocation`] value.
    pub fn target_allocation(msg: impl Into<String>) -> Self {
        Self::TargetAllocation(msg.into())
    }

    /// Build a [`FrameStackError::Effect`] value.
    pub fn effect(msg: impl Into<String>) -> Self {
        Self::Effect(msg.into())
    }

    /// Build a [`FrameStackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
