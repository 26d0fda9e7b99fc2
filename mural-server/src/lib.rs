mod app;
mod http;
mod services;
mod utils;

pub use app::{build, AppConfig};
pub use services::posts::{FileReceipt, PostsService, UploadReceipt, UploadRequest};
