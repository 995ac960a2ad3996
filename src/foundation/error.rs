/// Convenience result type used across papercut.
pub type PapercutResult<T> = Result<T, PapercutError>;

/// Top-level error taxonomy used by generation and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum PapercutError {
    /// Parameter set outside its documented contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster synthesis failed (tile allocation, encoding).
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Scene serialization or rasterization failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing parameter documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PapercutError {
    /// Build a [`PapercutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PapercutError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`PapercutError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`PapercutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
