//! OCR Providers
//!
//! Defines the recognizer trait and the backends that reach an external
//! OCR engine.

use std::path::Path;

use async_trait::async_trait;

use super::types::{OcrError, OcrResult};

/// OCR recognizer trait
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Recognize text in the image stored at `path`
    async fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError>;
}

/// Runs an external OCR program that prints its result as JSON on stdout
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| OcrError::Launch(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("OCR engine exited with {}", output.status)
            } else {
                stderr
            };
            return Err(OcrError::Engine(message));
        }

        let raw: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| OcrError::InvalidOutput(e.to_string()))?;

        Ok(OcrResult::new(raw))
    }
}

/// Sends the image to a remote OCR engine over HTTP
pub struct HttpRecognizer {
    client: reqwest::Client,
    url: String,
}

impl HttpRecognizer {
    pub fn new(url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let image_data = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to read image for OCR engine");
            OcrError::Launch(format!("Failed to read {}: {}", file_name, e))
        })?;

        let request = serde_json::json!({
            "fileName": file_name,
            "image": base64::engine::general_purpose::STANDARD.encode(&image_data),
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::Api(format!("Failed to call {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Api(format!("OCR engine returned {}: {}", status, body)));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidOutput(e.to_string()))?;

        Ok(OcrResult::new(raw))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;

    fn shell(script: &str) -> CommandRecognizer {
        // `sh -c <script> sh <path>` exposes the image path as $1
        CommandRecognizer::new("sh", vec!["-c".into(), script.into(), "sh".into()])
    }

    #[tokio::test]
    async fn test_command_output_parsed() {
        let recognizer = shell(r#"echo '{"width": 5, "height": 7, "path": "'"$1"'"}'"#);
        let result = recognizer.recognize(Path::new("receipt.png")).await.unwrap();

        assert_eq!(
            result.raw(),
            &json!({"width": 5, "height": 7, "path": "receipt.png"})
        );
    }

    #[tokio::test]
    async fn test_command_failure_carries_stderr() {
        let recognizer = shell("echo 'cannot identify image file' >&2; exit 3");
        let err = recognizer.recognize(Path::new("x.png")).await.unwrap_err();

        assert!(matches!(err, OcrError::Engine(_)));
        assert_eq!(err.to_string(), "cannot identify image file");
    }

    #[tokio::test]
    async fn test_command_silent_failure() {
        let recognizer = shell("exit 2");
        let err = recognizer.recognize(Path::new("x.png")).await.unwrap_err();
        assert!(err.to_string().contains("exited"));
    }

    #[tokio::test]
    async fn test_command_invalid_json() {
        let recognizer = shell("echo not-json");
        let err = recognizer.recognize(Path::new("x.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let recognizer = CommandRecognizer::new("definitely-not-an-ocr-engine", vec![]);
        let err = recognizer.recognize(Path::new("x.png")).await.unwrap_err();
        assert!(matches!(err, OcrError::Launch(_)));
    }
}
