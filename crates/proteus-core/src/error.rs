use thiserror::Error;

/// Errors returned by the proteus subsystems.
///
/// Each variant maps to one of the legacy negative return codes documented in
/// `proteus::version` callers that still care about them; see [`ProteusError::code`].
#[derive(Debug, Error)]
pub enum ProteusError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("data path not found or not readable: {0}")]
    DataPathNotFound(String),

    #[error("failed to parse data file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("failed to decompress tile: {0}")]
    Decompression(String),

    #[error("requested resource is not yet available")]
    ResourceUnavailable,

    #[error("background refresh task failed to start: {0}")]
    RefreshTaskFailed(String),

    #[error("subsystem not initialized")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProteusError {
    /// The legacy signed status code a C caller would have seen from the
    /// corresponding `proteus_*_init` function.
    pub fn code(&self) -> i32 {
        match self {
            ProteusError::InvalidArgument(_) => -3,
            ProteusError::DataPathNotFound(_) => -3,
            ProteusError::ParseError { .. } => -1,
            ProteusError::Decompression(_) => -1,
            ProteusError::ResourceUnavailable => -2,
            ProteusError::RefreshTaskFailed(_) => -2,
            ProteusError::NotInitialized => -1,
            ProteusError::Io(_) => -1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProteusError>;
