/// Result alias used across the baking pipeline.
pub type BakeResult<T> = Result<T, BakeError>;

/// Errors that terminate a bake run.
///
/// User cancellation is not represented here; it is reported as
/// [`BakeStatus::Cancelled`](crate::BakeStatus::Cancelled).
#[derive(thiserror::Error, Debug)]
pub enum BakeError {
    /// Invalid options or output location, detected before any capture.
    #[error("configuration error: {0}")]
    Config(String),

    /// A capture collaborator failed in a way that cannot degrade to a blank bitmap.
    #[error("capture error: {0}")]
    Capture(String),

    /// Inconsistent bitmap geometry (mismatched buffers, impossible crops).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Atlas packing failed.
    #[error("packing error: {0}")]
    Packing(String),

    /// Saving a texture, material, sprite sheet or prefab failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Manifest or report (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error, usually IO or image decoding with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BakeError {
    /// Build a [`BakeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BakeError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`BakeError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`BakeError::Packing`] value.
    pub fn packing(msg: impl Into<String>) -> Self {
        Self::Packing(msg.into())
    }

    /// Build a [`BakeError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`BakeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
