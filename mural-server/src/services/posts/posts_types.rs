use bytes::Bytes;
use mural_core::PostRecord;
use serde::Serialize;

/// One inbound upload: the binary payload plus its declared metadata and the
/// optional text fields sent alongside it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub mime_type: String,
    pub original_name: String,
    pub description: Option<String>,
    pub alt_text: Option<String>,
}

/// Metadata describing the finalized asset of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct FileReceipt {
    /// Record id, which doubles as the asset filename stem.
    pub id: String,
    /// Final asset filename (`{id}.{ext}`).
    pub name: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub path: String,
}

/// Result of a completed upload: the linked record plus asset metadata.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub file: FileReceipt,
    pub post: PostRecord,
}
