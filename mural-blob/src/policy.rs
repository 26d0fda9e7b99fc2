use crate::{AssetError, AssetResult};

/// MIME/size gate for uploads. Checked before any storage write happens.
#[derive(Debug, Clone)]
pub struct AssetPolicy {
    /// Accepted MIME types, exact match.
    pub allowed_mime_types: Vec<String>,

    /// Absolute max size allowed for a single asset.
    pub max_asset_bytes: u64,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: [
                "image/jpeg",
                "image/jpg",
                "image/png",
                "image/gif",
                "image/webp",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_asset_bytes: 5 * 1024 * 1024, // 5 MiB
        }
    }
}

impl AssetPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_asset_bytes(mut self, bytes: u64) -> Self {
        self.max_asset_bytes = bytes;
        self
    }

    pub fn allow_mime_type<S: Into<String>>(mut self, mime: S) -> Self {
        self.allowed_mime_types.push(mime.into());
        self
    }

    /// Gatekeeper: accept or reject a declared MIME type and size.
    pub fn check(&self, mime_type: &str, size_bytes: u64) -> AssetResult<()> {
        if !self.allowed_mime_types.iter().any(|m| m == mime_type) {
            return Err(AssetError::not_allowed(format!(
                "unsupported file type '{mime_type}', only images are accepted"
            )));
        }
        if size_bytes > self.max_asset_bytes {
            return Err(AssetError::not_allowed(format!(
                "file of {size_bytes} bytes exceeds the limit of {} bytes",
                self.max_asset_bytes
            )));
        }
        Ok(())
    }

    /// Canonical extension for an accepted MIME type, used when the uploaded
    /// filename carries none.
    pub fn extension_for(&self, mime_type: &str) -> Option<&'static str> {
        match mime_type {
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/gif" => Some("gif"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }
}
