use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use crate::{AssetError, AssetKey, AssetResult, StagingKey};

/// Core asset storage operations - must be implemented by all asset backends
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write bytes under a fresh, collision-free staging name.
    async fn stage(&self, data: Bytes) -> AssetResult<StagingKey>;

    /// Atomically move a staged blob to its final key. Both names live inside
    /// the managed root; a key that would resolve outside it is rejected.
    async fn finalize(&self, staged: &StagingKey, key: &AssetKey) -> AssetResult<PathBuf>;

    /// Whether an asset exists under the given key.
    async fn exists(&self, key: &AssetKey) -> AssetResult<bool>;

    /// Delete an asset if present. A missing file is `Ok(false)`, never an
    /// error.
    async fn delete_if_exists(&self, key: &AssetKey) -> AssetResult<bool>;

    /// Delete a staged blob if it is still around.
    async fn delete_staged(&self, staged: &StagingKey) -> AssetResult<bool>;

    /// Deterministic external locator for a key.
    fn url_for(&self, key: &AssetKey) -> String;

    /// Filesystem path a key resolves to.
    fn path_for(&self, key: &AssetKey) -> PathBuf;
}

/// Filesystem asset store rooted at one managed directory.
pub struct FsAssetStore {
    root: PathBuf,
    public_base: String,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a name inside the managed root. Keys are validated at
    /// construction; this re-checks so a hand-rolled name cannot escape.
    fn resolve(&self, name: &str) -> AssetResult<PathBuf> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(AssetError::invalid_key(format!(
                "'{name}' would resolve outside the managed root"
            )));
        }
        Ok(self.root.join(name))
    }

    async fn remove(&self, name: &str) -> AssetResult<bool> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(asset = %name, "asset removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn stage(&self, data: Bytes) -> AssetResult<StagingKey> {
        fs::create_dir_all(&self.root).await?;

        let staged = StagingKey::new();
        let path = self.resolve(staged.as_str())?;
        fs::write(&path, &data).await?;

        debug!(staging_key = %staged, size = data.len(), "asset staged");
        Ok(staged)
    }

    async fn finalize(&self, staged: &StagingKey, key: &AssetKey) -> AssetResult<PathBuf> {
        let from = self.resolve(staged.as_str())?;
        let to = self.resolve(key.as_str())?;

        match fs::rename(&from, &to).await {
            Ok(()) => {
                debug!(staging_key = %staged, asset = %key, "asset finalized");
                Ok(to)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::staged_not_found(staged.as_str()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &AssetKey) -> AssetResult<bool> {
        let path = self.resolve(key.as_str())?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete_if_exists(&self, key: &AssetKey) -> AssetResult<bool> {
        self.remove(key.as_str()).await
    }

    async fn delete_staged(&self, staged: &StagingKey) -> AssetResult<bool> {
        self.remove(staged.as_str()).await
    }

    fn url_for(&self, key: &AssetKey) -> String {
        format!("{}/uploads/{}", self.public_base, key)
    }

    fn path_for(&self, key: &AssetKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}
