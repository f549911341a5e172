//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::error::StorageError;
use crate::ocr::{RecognitionInvoker, Recognizer};
use crate::pipeline::RecognitionPipeline;
use crate::upload::TransientStore;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to prepare upload directory: {0}")]
    UploadDir(#[from] StorageError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: RecognitionPipeline,
}

impl AppState {
    /// Create a new application state
    ///
    /// Creates the upload directory if it does not exist yet.
    pub fn new(config: Config, recognizer: Arc<dyn Recognizer>) -> Result<Self, StateError> {
        let store = TransientStore::open(&config.upload.dir)?;
        let pipeline = RecognitionPipeline::new(store, RecognitionInvoker::new(recognizer));

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the recognition pipeline
    pub fn pipeline(&self) -> &RecognitionPipeline {
        &self.inner.pipeline
    }
}
