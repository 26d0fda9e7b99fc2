mod posts_service;
mod posts_types;

pub use posts_service::PostsService;
pub use posts_types::{FileReceipt, UploadReceipt, UploadRequest};
