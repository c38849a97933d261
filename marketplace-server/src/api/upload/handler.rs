//! File Upload Handler
//!
//! Accepts a multipart `file` field, hands the bytes to the configured
//! [`ObjectStorage`](crate::services::storage::ObjectStorage) and returns the
//! public URL.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};
use serde::Serialize;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::services::storage::{StorageError, is_safe_file_name};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Empty => AppError::new(ErrorCode::EmptyFile),
            StorageError::TooLarge { .. } => {
                AppError::with_message(ErrorCode::FileTooLarge, err.to_string())
            }
            StorageError::UnsupportedExtension(_) => {
                AppError::with_message(ErrorCode::InvalidFileExtension, err.to_string())
            }
            StorageError::Io(e) => AppError::with_message(ErrorCode::FileStorageFailed, e.to_string()),
        }
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::validation(format!("Invalid multipart request: {}", e.body_text()))
    }
}

/// POST /api/v1/upload
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("No filename provided in file field"))?;
        let data = field.bytes().await.map_err(multipart_error)?;

        let url = state.storage.upload(&file_name, &data).await?;
        return Ok(Json(ApiResponse::success_with_message(
            "File uploaded successfully",
            UploadResponse { url },
        )));
    }

    Err(AppError::new(ErrorCode::NoFileProvided))
}

/// GET /uploads/{name}
pub async fn serve(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    if !is_safe_file_name(&name) {
        return Err(AppError::invalid_request("Invalid filename"));
    }

    let path = std::path::Path::new(&state.config.upload_dir).join(&name);
    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(file = %name, "Upload not found");
            return Err(AppError::not_found("File"));
        }
        Err(e) => {
            return Err(AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to read {name}: {e}"),
            ));
        }
    };
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        content,
    )
        .into_response())
}
