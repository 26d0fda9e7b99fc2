use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{NewPost, PostPatch, PostRecord, RecordStore, Result};

/// In-memory record store.
///
/// The shipped adapter behind the [`RecordStore`] seam; a document database
/// client slots in behind the same trait without touching the coordinators.
#[derive(Default)]
pub struct MemoryRecordStore {
    posts: RwLock<HashMap<String, PostRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, post: NewPost) -> Result<PostRecord> {
        let now = Utc::now();
        let record = PostRecord {
            id: Uuid::new_v4().to_string(),
            description: post.description,
            image_url: post.image_url,
            alt_text: post.alt_text,
            original_name: post.original_name,
            created_at: now,
            updated_at: now,
        };

        let mut posts = self.posts.write().await;
        posts.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>> {
        let posts = self.posts.read().await;
        Ok(posts.get(id).cloned())
    }

    async fn update_fields(&self, id: &str, patch: PostPatch) -> Result<u64> {
        let mut posts = self.posts.write().await;
        let Some(record) = posts.get_mut(id) else {
            return Ok(0);
        };

        let mut changed = false;
        if let Some(description) = patch.description {
            if record.description != description {
                record.description = description;
                changed = true;
            }
        }
        if let Some(image_url) = patch.image_url {
            if record.image_url != image_url {
                record.image_url = image_url;
                changed = true;
            }
        }
        if let Some(alt_text) = patch.alt_text {
            if record.alt_text != alt_text {
                record.alt_text = alt_text;
                changed = true;
            }
        }

        if changed {
            record.updated_at = Utc::now();
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<PostRecord>> {
        let posts = self.posts.read().await;
        let mut all: Vec<PostRecord> = posts.values().cloned().collect();
        // Newest first; id as tie-break so the order is stable.
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn count(&self) -> Result<u64> {
        let posts = self.posts.read().await;
        Ok(posts.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPost {
        NewPost::new()
            .with_description("um gato")
            .with_image_url("http://localhost:3000/uploads/x.png")
            .with_alt_text("gato laranja")
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = MemoryRecordStore::new();
        let record = store.insert(sample()).await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let store = MemoryRecordStore::new();
        let record = store.insert(sample()).await.unwrap();

        let modified = store
            .update_fields(&record.id, PostPatch::new().with_description("novo texto"))
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let updated = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(updated.description, "novo texto");
        assert_eq!(updated.image_url, record.image_url);
        assert_eq!(updated.alt_text, record.alt_text);
        assert!(updated.updated_at > record.updated_at);
    }

    #[tokio::test]
    async fn update_with_equal_values_modifies_nothing() {
        let store = MemoryRecordStore::new();
        let record = store.insert(sample()).await.unwrap();

        let modified = store
            .update_fields(&record.id, PostPatch::new().with_description("um gato"))
            .await
            .unwrap();
        assert_eq!(modified, 0);

        let unchanged = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(unchanged.updated_at, record.updated_at);
    }

    #[tokio::test]
    async fn update_of_unknown_id_modifies_nothing() {
        let store = MemoryRecordStore::new();
        let modified = store
            .update_fields("missing", PostPatch::new().with_description("x"))
            .await
            .unwrap();
        assert_eq!(modified, 0);
    }

    #[tokio::test]
    async fn delete_reports_whether_record_existed() {
        let store = MemoryRecordStore::new();
        let record = store.insert(sample()).await.unwrap();
        assert!(store.delete_by_id(&record.id).await.unwrap());
        assert!(!store.delete_by_id(&record.id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_all_returns_newest_first() {
        let store = MemoryRecordStore::new();
        let first = store.insert(sample()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.insert(sample()).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }
}
