use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use mural_blob::{AssetPolicy, FsAssetStore};
use mural_core::MemoryRecordStore;

use crate::http;
use crate::services::posts::PostsService;

/// Runtime configuration, read from the environment with fallback defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Managed root directory for uploaded assets.
    pub uploads_dir: PathBuf,
    /// Base used to build externally resolvable asset URLs.
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let uploads_dir = std::env::var("MURAL_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        let public_base_url = std::env::var("MURAL_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        Self {
            host,
            port,
            uploads_dir,
            public_base_url,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Assemble the application: stores, policy, coordinators, router.
///
/// Everything is constructed here and injected explicitly; nothing reads
/// ambient global state.
pub fn build(config: &AppConfig) -> Router {
    let records = Arc::new(MemoryRecordStore::new());
    let assets = Arc::new(FsAssetStore::new(
        &config.uploads_dir,
        &config.public_base_url,
    ));
    let policy = AssetPolicy::default();

    let posts = PostsService::new(records, assets, policy.clone());
    http::router(posts, &config.uploads_dir, &policy)
}
