use axum::{
    extract::{DefaultBodyLimit, Multipart},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};

use super::services::{extract_text, FileText};
use crate::{
    error::{AppError, AppResult, FieldError},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub results: Vec<FileText>,
}

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/extract-text", post(extract_files))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /extract-text (multipart)
/// Field: files (repeatable)
#[instrument(skip(mp))]
pub async fn extract_files(mut mp: Multipart) -> AppResult<Json<ExtractResponse>> {
    let mut results = Vec::new();
    while let Some(field) = mp.next_field().await.map_err(bad_multipart)? {
        if !matches!(field.name(), Some("files") | Some("files[]")) {
            continue;
        }
        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(bad_multipart)?;
        results.push(extract_text(filename, content_type.as_deref(), data).await);
    }

    if results.is_empty() {
        return Err(AppError::Validation(vec![FieldError::new(
            "body → files",
            "at least one file is required",
        )]));
    }

    info!(files = results.len(), "text extracted");
    Ok(Json(ExtractResponse { results }))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(vec![FieldError::new("body → files", e.body_text())])
}
