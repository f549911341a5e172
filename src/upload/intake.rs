//! Upload intake
//!
//! Pulls the `file` part out of a multipart request and enforces the size
//! ceiling while the bytes stream in.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::error::AppError;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// An accepted upload, scoped to one request
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-supplied file name, untrusted
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Check the file name of a `file` part
pub fn validate_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.is_empty() {
        return Err(AppError::EmptyFilename);
    }
    Ok(())
}

/// Read the first `file` part from the request.
///
/// Parts without a file name are form fields, not files, and are skipped.
pub async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<UploadRequest, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        validate_file_name(&file_name)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, limit))? {
            if bytes.len() + chunk.len() > limit {
                tracing::warn!(
                    file_name = %file_name,
                    limit,
                    "Upload exceeds size limit"
                );
                return Err(AppError::PayloadTooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(file_name = %file_name, size = bytes.len(), "Received upload");

        return Ok(UploadRequest { file_name, bytes });
    }

    Err(AppError::MissingFile)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::MalformedUpload(e.body_text())
    }
}
