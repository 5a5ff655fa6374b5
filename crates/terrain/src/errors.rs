use thiserror::Error;

/// Errors raised while validating a terrain request.
///
/// Both variants are reported before any grid memory is allocated, so a
/// failed call never leaves a partial heightmap behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Requested grid of {requested} cells exceeds the limit of {limit} cells")]
    ResourceLimitExceeded { requested: u64, limit: u64 },
}

impl TerrainError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TerrainError::InvalidArgument(msg.into())
    }
}
