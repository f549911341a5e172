//! Error types for the OCR web server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ocr::OcrError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("no file uploaded")]
    MissingFile,

    #[error("no file selected")]
    EmptyFilename,

    #[error("file exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read upload: {0}")]
    MalformedUpload(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Recognition(#[from] OcrError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::EmptyFilename | Self::MalformedUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Storage(_) | Self::Recognition(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Transient file storage errors.
///
/// Per-request variants name only the client file, never the server path.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create upload directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("Failed to write upload {file}: {message}")]
    Write { file: String, message: String },

    #[error("Failed to read upload {file}: {message}")]
    Read { file: String, message: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected upload: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
