use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post. Wire field names follow the public API (`descricao`,
/// `imgUrl`, `alt`), the Rust names stay idiomatic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Store-generated identifier, immutable once assigned. Doubles as the
    /// asset filename stem, so it must stay free of path separators.
    pub id: String,

    #[serde(rename = "descricao")]
    pub description: String,

    /// Externally resolvable locator for the post's image. Empty only during
    /// the staging window of an in-progress upload.
    #[serde(rename = "imgUrl")]
    pub image_url: String,

    #[serde(rename = "alt")]
    pub alt_text: String,

    /// Original filename of the uploaded image, kept for reference.
    #[serde(rename = "nomeOriginal", skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new post. The store assigns id and timestamps on insert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    #[serde(rename = "descricao", default)]
    pub description: String,

    #[serde(rename = "imgUrl", default)]
    pub image_url: String,

    #[serde(rename = "alt", default)]
    pub alt_text: String,

    #[serde(rename = "nomeOriginal", default)]
    pub original_name: Option<String>,
}

impl NewPost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url<S: Into<String>>(mut self, image_url: S) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_alt_text<S: Into<String>>(mut self, alt_text: S) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    pub fn with_original_name<S: Into<String>>(mut self, original_name: S) -> Self {
        self.original_name = Some(original_name.into());
        self
    }
}

/// Partial update: only supplied fields change, omitted fields keep their
/// prior values. There is no merge of sub-fields within a field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,

    #[serde(rename = "imgUrl", default)]
    pub image_url: Option<String>,

    #[serde(rename = "alt", default)]
    pub alt_text: Option<String>,
}

impl PostPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url<S: Into<String>>(mut self, image_url: S) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_alt_text<S: Into<String>>(mut self, alt_text: S) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// Blank strings count as absent, matching how the public API has always
    /// treated them.
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            description: keep(self.description),
            image_url: keep(self.image_url),
            alt_text: keep(self.alt_text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.image_url.is_none() && self.alt_text.is_none()
    }
}

/// Outcome of a partial update. A valid request that changes nothing is a
/// distinct success condition, not an error and not a missing record.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(PostRecord),
    NotModified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_drops_blank_fields() {
        let patch = PostPatch::new()
            .with_description("  ")
            .with_image_url("new/path.png")
            .normalized();
        assert!(patch.description.is_none());
        assert_eq!(patch.image_url.as_deref(), Some("new/path.png"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_deserializes_wire_names() {
        let patch: PostPatch =
            serde_json::from_str(r#"{"descricao":"a","imgUrl":"b","alt":"c"}"#).unwrap();
        assert_eq!(patch.description.as_deref(), Some("a"));
        assert_eq!(patch.image_url.as_deref(), Some("b"));
        assert_eq!(patch.alt_text.as_deref(), Some("c"));
    }

    #[test]
    fn empty_body_is_empty_patch() {
        let patch: PostPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.normalized().is_empty());
    }
}
