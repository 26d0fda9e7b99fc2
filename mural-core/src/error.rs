use thiserror::Error;

/// Result type for mural operations
pub type Result<T> = std::result::Result<T, Error>;

/// The application-level error taxonomy.
///
/// Every operation surfaces one of these kinds so callers can react to the
/// kind itself instead of string-matching messages. The HTTP layer maps each
/// kind to a status code via [`Error::status_code`].
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing required input. Never touches storage.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Upload rejected by the MIME/size gate before any write.
    #[error("Invalid asset: {message}")]
    InvalidAsset { message: String },

    /// Referenced record or asset is absent.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Staging, finalize or delete failure in the asset store.
    #[error("Asset persistence failed: {message}")]
    AssetPersist { message: String },

    /// Record store operation failure (connectivity, constraint).
    #[error("Record store error: {message}")]
    Store { message: String },
}

impl Error {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_asset<S: Into<String>>(message: S) -> Self {
        Self::InvalidAsset {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn asset_persist<S: Into<String>>(message: S) -> Self {
        Self::AssetPersist {
            message: message.into(),
        }
    }

    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// HTTP status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput { .. } | Error::InvalidAsset { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::AssetPersist { .. } | Error::Store { .. } => 500,
        }
    }

    /// Stable kind name for clients.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "InvalidInput",
            Error::InvalidAsset { .. } => "InvalidAsset",
            Error::NotFound { .. } => "NotFound",
            Error::AssetPersist { .. } => "AssetPersistError",
            Error::Store { .. } => "StoreError",
        }
    }

    fn message(&self) -> &str {
        match self {
            Error::InvalidInput { message }
            | Error::InvalidAsset { message }
            | Error::NotFound { message }
            | Error::AssetPersist { message }
            | Error::Store { message } => message,
        }
    }

    /// Client-safe JSON payload: kind, human-readable detail, status code.
    /// No internals beyond the message the constructor was given.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.kind_name(),
            "message": self.message(),
            "code": self.status_code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_status_codes() {
        assert_eq!(Error::invalid_input("x").status_code(), 400);
        assert_eq!(Error::invalid_asset("x").status_code(), 400);
        assert_eq!(Error::not_found("x").status_code(), 404);
        assert_eq!(Error::asset_persist("x").status_code(), 500);
        assert_eq!(Error::store("x").status_code(), 500);
    }

    #[test]
    fn json_payload_carries_kind_and_message() {
        let body = Error::not_found("post abc not found").to_json();
        assert_eq!(body["name"], "NotFound");
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "post abc not found");
    }
}
