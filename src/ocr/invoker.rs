//! Recognition Invoker
//!
//! Hands a stored upload to the configured recognizer. Failures are passed
//! through untouched; retries and timeouts belong to the engine.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::provider::Recognizer;
use super::types::{OcrError, OcrResult};

#[derive(Clone)]
pub struct RecognitionInvoker {
    recognizer: Arc<dyn Recognizer>,
}

impl RecognitionInvoker {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    pub fn backend(&self) -> &'static str {
        self.recognizer.name()
    }

    pub async fn invoke(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let started = Instant::now();
        let result = self.recognizer.recognize(path).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => tracing::debug!(
                backend = self.backend(),
                path = %path.display(),
                elapsed_ms,
                "OCR completed"
            ),
            Err(e) => tracing::warn!(
                backend = self.backend(),
                path = %path.display(),
                elapsed_ms,
                error = %e,
                "OCR failed"
            ),
        }

        result
    }
}
