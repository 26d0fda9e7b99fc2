use thiserror::Error;

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur during asset operations
#[derive(Error, Debug)]
pub enum AssetError {
    /// Key would escape the managed root or is otherwise malformed.
    #[error("Invalid asset key: {message}")]
    InvalidKey { message: String },

    /// Rejected by the MIME/size policy before any write.
    #[error("Asset not allowed: {message}")]
    NotAllowed { message: String },

    /// Staged blob for a finalize is missing.
    #[error("Staged asset not found: {staging_key}")]
    StagedNotFound { staging_key: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AssetError {
    pub fn invalid_key<S: Into<String>>(message: S) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    pub fn not_allowed<S: Into<String>>(message: S) -> Self {
        Self::NotAllowed {
            message: message.into(),
        }
    }

    pub fn staged_not_found<S: Into<String>>(staging_key: S) -> Self {
        Self::StagedNotFound {
            staging_key: staging_key.into(),
        }
    }
}
