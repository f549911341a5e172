//! Recognition endpoint
//!
//! POST /recognize - multipart upload with a single `file` part

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::response::RecognitionResponse;
use crate::state::AppState;
use crate::upload::read_upload;

pub async fn recognize(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<RecognitionResponse>> {
    // A body that is not multipart at all has no file part
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Request is not multipart: {}", e);
        AppError::MissingFile
    })?;

    let upload = read_upload(&mut multipart, state.config().upload.max_file_size).await?;

    tracing::info!(
        file_name = %upload.file_name,
        size = upload.bytes.len(),
        "Recognition requested"
    );

    let response = state.pipeline().run(upload).await?;
    Ok(Json(response))
}
