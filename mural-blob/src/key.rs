use uuid::Uuid;

use crate::{AssetError, AssetResult};

/// Final, id-derived name of an asset inside the managed root:
/// `{record id}.{extension}`. Construction validates both halves, so a key
/// that exists can never resolve outside the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(stem: &str, extension: &str) -> AssetResult<Self> {
        validate_segment(stem, "stem")?;
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AssetError::invalid_key(format!(
                "extension '{extension}' must be non-empty and alphanumeric"
            )));
        }
        Ok(Self(format!("{stem}.{}", extension.to_ascii_lowercase())))
    }

    /// Parse a full filename, e.g. the basename of a previously issued URL.
    pub fn from_file_name(name: &str) -> AssetResult<Self> {
        let (stem, extension) = name.rsplit_once('.').ok_or_else(|| {
            AssetError::invalid_key(format!("'{name}' has no extension"))
        })?;
        Self::new(stem, extension)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collision-free temporary name for a staged upload. Random, not time-based,
/// so concurrent uploads can never contend for the same staging name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagingKey(String);

impl StagingKey {
    pub fn new() -> Self {
        Self(format!("temp_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StagingKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StagingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_segment(segment: &str, what: &str) -> AssetResult<()> {
    if segment.is_empty() {
        return Err(AssetError::invalid_key(format!("{what} must not be empty")));
    }
    if segment.contains('/') || segment.contains('\\') || segment.contains("..") {
        return Err(AssetError::invalid_key(format!(
            "{what} '{segment}' contains path separators"
        )));
    }
    if segment.starts_with('.') {
        return Err(AssetError::invalid_key(format!(
            "{what} '{segment}' must not start with '.'"
        )));
    }
    Ok(())
}
