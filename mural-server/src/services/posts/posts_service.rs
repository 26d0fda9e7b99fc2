use std::path::Path;
use std::sync::Arc;

use mural_blob::{AssetKey, AssetPolicy, AssetStore, StagingKey};
use mural_core::{Error, NewPost, PostPatch, PostRecord, RecordStore, Result, UpdateOutcome};
use tracing::{debug, error, warn};

use crate::utils::validator::require_non_empty;

use super::{FileReceipt, UploadReceipt, UploadRequest};

const DEFAULT_DESCRIPTION: &str = "Imagem enviada via upload";

/// Stateless unit of behavior for everything post-related. Holds explicit
/// references to its record store and asset store, injected at construction.
///
/// The two stores are independent and non-transactional; the upload and
/// update paths below keep them consistent with compensating actions, never
/// with retries.
#[derive(Clone)]
pub struct PostsService {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    policy: AssetPolicy,
}

impl PostsService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<dyn AssetStore>,
        policy: AssetPolicy,
    ) -> Self {
        Self {
            records,
            assets,
            policy,
        }
    }

    /// Upload coordinator: validate, stage, insert a placeholder record,
    /// finalize the asset under the id-derived key, link it.
    ///
    /// The record is inserted *before* the asset reaches its final name
    /// because the generated id is what the final name is derived from. Any
    /// failure after the insert deletes the record again; after a failure
    /// return no orphaned record remains.
    pub async fn upload_image(&self, req: UploadRequest) -> Result<UploadReceipt> {
        let size = req.data.len() as u64;
        self.policy
            .check(&req.mime_type, size)
            .map_err(|e| Error::invalid_asset(e.to_string()))?;

        let extension = match extension_of(&req.original_name) {
            Some(ext) => ext,
            None => self
                .policy
                .extension_for(&req.mime_type)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::invalid_asset(format!(
                        "cannot derive a file extension for '{}'",
                        req.original_name
                    ))
                })?,
        };

        let staged = self
            .assets
            .stage(req.data.clone())
            .await
            .map_err(|e| Error::asset_persist(format!("failed to stage upload: {e}")))?;

        let placeholder = NewPost::new()
            .with_description(
                req.description
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            )
            .with_alt_text(
                req.alt_text
                    .clone()
                    .filter(|a| !a.trim().is_empty())
                    .unwrap_or_else(|| req.original_name.clone()),
            )
            .with_original_name(req.original_name.clone());

        let record = match self.records.insert(placeholder).await {
            Ok(record) => record,
            Err(e) => {
                self.discard_staged(&staged).await;
                return Err(e);
            }
        };

        let key = match AssetKey::new(&record.id, &extension) {
            Ok(key) => key,
            Err(e) => {
                self.roll_back_record(&record.id).await;
                self.discard_staged(&staged).await;
                return Err(Error::asset_persist(format!("invalid asset key: {e}")));
            }
        };

        let path = match self.assets.finalize(&staged, &key).await {
            Ok(path) => path,
            Err(e) => {
                self.roll_back_record(&record.id).await;
                self.discard_staged(&staged).await;
                return Err(Error::asset_persist(format!(
                    "failed to finalize asset {key}: {e}"
                )));
            }
        };

        let url = self.assets.url_for(&key);
        let linked = self
            .records
            .update_fields(&record.id, PostPatch::new().with_image_url(url))
            .await;
        if let Err(e) = linked {
            self.roll_back_record(&record.id).await;
            if let Err(cleanup) = self.assets.delete_if_exists(&key).await {
                warn!(asset = %key, error = %cleanup, "could not remove asset after link failure");
            }
            return Err(e);
        }

        let post = self
            .records
            .find_by_id(&record.id)
            .await?
            .ok_or_else(|| Error::store(format!("post {} vanished during upload", record.id)))?;

        debug!(post_id = %post.id, asset = %key, "upload completed");
        Ok(UploadReceipt {
            file: FileReceipt {
                id: post.id.clone(),
                name: key.to_string(),
                original_name: req.original_name,
                size,
                mime_type: req.mime_type,
                path: path.display().to_string(),
            },
            post,
        })
    }

    /// Update coordinator: partial field merge plus optional replacement of
    /// the record's asset.
    ///
    /// The record store is updated *before* the old asset is deleted. The
    /// reverse order would leave a crash window where the record still points
    /// at a file that no longer exists.
    pub async fn update_post(&self, id: &str, patch: PostPatch) -> Result<UpdateOutcome> {
        let existing = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))?;

        let patch = patch.normalized();
        if patch.is_empty() {
            return Err(Error::invalid_input(
                "provide at least one field to update: descricao, imgUrl or alt",
            ));
        }

        let new_image_url = patch.image_url.clone();
        let modified = self.records.update_fields(id, patch).await?;
        if modified == 0 {
            return Ok(UpdateOutcome::NotModified);
        }

        if let Some(new_url) = new_image_url {
            if !existing.image_url.is_empty() && existing.image_url != new_url {
                self.remove_asset_behind(&existing.image_url).await?;
            }
        }

        let updated = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))?;
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Manual-create path: a fully-formed record, no asset involvement.
    pub async fn create_post(&self, post: NewPost) -> Result<PostRecord> {
        require_non_empty("descricao", &post.description)?;
        require_non_empty("imgUrl", &post.image_url)?;
        require_non_empty("alt", &post.alt_text)?;
        self.records.insert(post).await
    }

    pub async fn get_post(&self, id: &str) -> Result<PostRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))
    }

    /// All posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>> {
        self.records.find_all().await
    }

    /// Delete a record, then its asset. Same ordering rationale as
    /// [`Self::update_post`]: never leave a record pointing at nothing.
    pub async fn delete_post(&self, id: &str) -> Result<PostRecord> {
        let existing = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))?;

        if !self.records.delete_by_id(id).await? {
            return Err(Error::not_found(format!("post {id} not found")));
        }

        if !existing.image_url.is_empty() {
            self.remove_asset_behind(&existing.image_url).await?;
        }

        Ok(existing)
    }

    /// Compensating delete for a placeholder record. Its own failure is
    /// logged and must not mask the error that triggered it.
    async fn roll_back_record(&self, id: &str) {
        if let Err(e) = self.records.delete_by_id(id).await {
            error!(post_id = %id, error = %e, "compensating record delete failed");
        }
    }

    /// Best-effort removal of a staged blob.
    async fn discard_staged(&self, staged: &StagingKey) {
        match self.assets.delete_staged(staged).await {
            Ok(_) => {}
            Err(e) => warn!(staging_key = %staged, error = %e, "could not remove staged blob"),
        }
    }

    /// Idempotent delete of the asset a URL points at. A file that is
    /// already gone only produces a warning; a real I/O failure surfaces.
    async fn remove_asset_behind(&self, url: &str) -> Result<()> {
        let name = url.rsplit('/').next().unwrap_or(url);
        let key = match AssetKey::from_file_name(name) {
            Ok(key) => key,
            Err(e) => {
                warn!(url = %url, error = %e, "old image URL does not name a managed asset, skipping delete");
                return Ok(());
            }
        };

        match self.assets.delete_if_exists(&key).await {
            Ok(true) => {
                debug!(asset = %key, "old asset removed");
                Ok(())
            }
            Ok(false) => {
                warn!(asset = %key, "old asset was already gone");
                Ok(())
            }
            Err(e) => Err(Error::asset_persist(format!(
                "failed to delete old asset {key}: {e}"
            ))),
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
}
