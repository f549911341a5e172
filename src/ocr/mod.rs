//! OCR Module
//!
//! Bridges this service to an external OCR engine.
//!
//! Supports two backends:
//! - Command: a local program that prints its result as JSON
//! - HTTP: a remote engine that accepts a base64 image
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ocr_web_server::ocr::{CommandRecognizer, RecognitionInvoker};
//!
//! let invoker = RecognitionInvoker::new(Arc::new(CommandRecognizer::new("ocr-engine", vec![])));
//! let result = invoker.invoke(Path::new("uploads/receipt.png")).await?;
//! for region in result.regions().unwrap_or_default() {
//!     println!("{} ({})", region.text, region.rate);
//! }
//! ```

mod invoker;
mod provider;
mod types;

use std::sync::Arc;

use crate::config::{OcrBackend, OcrConfig};

pub use invoker::RecognitionInvoker;
pub use provider::{CommandRecognizer, HttpRecognizer, Recognizer};
pub use types::{DetectedRegion, OcrError, OcrResult};

/// Build the recognizer selected by configuration
pub fn recognizer_from_config(config: &OcrConfig) -> Arc<dyn Recognizer> {
    match (config.backend, config.url.as_deref()) {
        (OcrBackend::Http, Some(url)) => Arc::new(HttpRecognizer::new(url)),
        _ => Arc::new(CommandRecognizer::new(
            config.command.clone(),
            config.args.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        let mut config = crate::config::Config::default().ocr;
        assert_eq!(recognizer_from_config(&config).name(), "command");

        config.backend = OcrBackend::Http;
        config.url = Some("http://localhost:8868/ocr".to_string());
        assert_eq!(recognizer_from_config(&config).name(), "http");
    }
}
