//! Recognition pipeline
//!
//! write -> recognize -> read back -> shape, with the transient file
//! released on every exit path.

use crate::error::Result;
use crate::ocr::RecognitionInvoker;
use crate::response::{shape_response, RecognitionResponse};
use crate::upload::{TransientFile, TransientStore, UploadRequest};

#[derive(Clone)]
pub struct RecognitionPipeline {
    store: TransientStore,
    invoker: RecognitionInvoker,
}

impl RecognitionPipeline {
    pub fn new(store: TransientStore, invoker: RecognitionInvoker) -> Self {
        Self { store, invoker }
    }

    pub async fn run(&self, upload: UploadRequest) -> Result<RecognitionResponse> {
        let file = self.store.write(&upload.file_name, &upload.bytes).await?;
        let request_id = file.id();

        // `file` is also dropped on cancellation or panic, which removes it too
        let outcome = self.process(&file).await;
        file.release().await;

        match &outcome {
            Ok(response) => tracing::info!(
                request_id = %request_id,
                file_name = %upload.file_name,
                regions = response.text_results.len(),
                "Recognition succeeded"
            ),
            Err(e) => tracing::warn!(
                request_id = %request_id,
                file_name = %upload.file_name,
                error = %e,
                "Recognition failed"
            ),
        }

        outcome
    }

    async fn process(&self, file: &TransientFile) -> Result<RecognitionResponse> {
        let result = self.invoker.invoke(file.path()).await?;
        let image = file.read().await?;
        Ok(shape_response(result, &image))
    }
}
