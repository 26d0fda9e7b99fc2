use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mural_blob::AssetPolicy;
use mural_core::{NewPost, PostPatch, PostRecord, UpdateOutcome};
use serde_json::{json, Value};
use tower_http::services::ServeDir;

use crate::services::posts::{PostsService, UploadRequest};

/// Transport-side wrapper that turns the error taxonomy into a response:
/// kind-derived status code plus a client-safe JSON body.
#[derive(Debug)]
pub struct ApiError(pub mural_core::Error);

impl From<mural_core::Error> for ApiError {
    fn from(e: mural_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.to_json())).into_response()
    }
}

fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    mural_core::Error::invalid_input(format!(
        "failed to parse the request body as JSON: {rejection}"
    ))
    .into()
}

pub fn router(posts: PostsService, uploads_dir: &Path, policy: &AssetPolicy) -> Router {
    // Leave headroom above the asset limit so the policy, not the transport,
    // is what rejects a file that is exactly at the boundary.
    let body_limit = policy.max_asset_bytes as usize + 1024 * 1024;

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(posts)
}

async fn list_posts(State(posts): State<PostsService>) -> Result<Json<Vec<PostRecord>>, ApiError> {
    Ok(Json(posts.list_posts().await?))
}

async fn get_post(
    State(posts): State<PostsService>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<PostRecord>, ApiError> {
    Ok(Json(posts.get_post(&id).await?))
}

async fn create_post(
    State(posts): State<PostsService>,
    body: Result<Json<NewPost>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_post) = body.map_err(map_json_rejection)?;
    let record = posts.create_post(new_post).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_post(
    State(posts): State<PostsService>,
    UrlPath(id): UrlPath<String>,
    body: Result<Json<PostPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = body.map_err(map_json_rejection)?;

    match posts.update_post(&id, patch).await? {
        UpdateOutcome::Updated(post) => Ok(Json(json!({
            "message": "Post atualizado com sucesso",
            "post": post,
        }))),
        UpdateOutcome::NotModified => Ok(Json(json!({
            "message": "Nenhuma modificação realizada",
            "notModified": true,
        }))),
    }
}

async fn delete_post(
    State(posts): State<PostsService>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = posts.delete_post(&id).await?;
    Ok(Json(json!({
        "message": "Post removido com sucesso",
        "post": removed,
    })))
}

async fn upload_image(
    State(posts): State<PostsService>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file: Option<(bytes::Bytes, String, String)> = None;
    let mut description: Option<String> = None;
    let mut alt_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "imagem" => {
                let original_name = field.file_name().unwrap_or("imagem").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(bad_multipart)?;
                file = Some((data, mime_type, original_name));
            }
            "descricao" => description = Some(field.text().await.map_err(bad_multipart)?),
            "alt" => alt_text = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let (data, mime_type, original_name) = file.ok_or_else(|| {
        ApiError(mural_core::Error::invalid_input("Nenhuma imagem foi enviada"))
    })?;

    let receipt = posts
        .upload_image(UploadRequest {
            data,
            mime_type,
            original_name,
            description,
            alt_text,
        })
        .await?;

    Ok(Json(json!({
        "message": "Upload realizado com sucesso",
        "file": receipt.file,
        "post": receipt.post,
    })))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError(mural_core::Error::invalid_input(format!(
        "invalid multipart payload: {e}"
    )))
}
