//! Configuration management for the OCR web server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default upload ceiling: 16MB
pub const DEFAULT_MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Extra request body allowance for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory that holds transient uploads while they are recognized
    pub dir: PathBuf,
    /// Largest accepted image, in bytes
    pub max_file_size: usize,
}

impl UploadConfig {
    /// Limit applied to the whole request body
    pub fn body_limit(&self) -> usize {
        self.max_file_size.saturating_add(MULTIPART_OVERHEAD)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub backend: OcrBackend,
    /// Program run by the command backend
    pub command: String,
    /// Arguments placed before the image path
    pub args: Vec<String>,
    /// Endpoint used by the http backend
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    Command,
    Http,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("OCR_URL must be set when OCR_BACKEND=http")]
    MissingOcrUrl,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            upload: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_file_size: DEFAULT_MAX_FILE_SIZE,
            },
            ocr: OcrConfig {
                backend: OcrBackend::Command,
                command: "ocr-engine".to_string(),
                args: Vec::new(),
                url: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value,
            })?,
            None => defaults.server.port,
        };

        let max_file_size = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "MAX_UPLOAD_BYTES",
                value,
            })?,
            None => defaults.upload.max_file_size,
        };

        let backend = match lookup("OCR_BACKEND") {
            Some(value) => match value.to_lowercase().as_str() {
                "command" => OcrBackend::Command,
                "http" => OcrBackend::Http,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "OCR_BACKEND",
                        value,
                    })
                }
            },
            None => defaults.ocr.backend,
        };

        let url = lookup("OCR_URL").filter(|u| !u.trim().is_empty());
        if backend == OcrBackend::Http && url.is_none() {
            return Err(ConfigError::MissingOcrUrl);
        }

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            upload: UploadConfig {
                dir: lookup("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.upload.dir),
                max_file_size,
            },
            ocr: OcrConfig {
                backend,
                command: lookup("OCR_COMMAND").unwrap_or(defaults.ocr.command),
                args: lookup("OCR_ARGS")
                    .map(|a| a.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
                url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.upload.dir, PathBuf::from("uploads"));
        assert_eq!(config.upload.max_file_size, 16 * 1024 * 1024);
        assert_eq!(config.ocr.backend, OcrBackend::Command);
        assert_eq!(config.ocr.command, "ocr-engine");
        assert!(config.ocr.args.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "8080"),
            ("UPLOAD_DIR", "/tmp/ocr"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("OCR_COMMAND", "python3"),
            ("OCR_ARGS", "engine.py  --json"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upload.dir, PathBuf::from("/tmp/ocr"));
        assert_eq!(config.upload.max_file_size, 1024);
        assert_eq!(config.upload.body_limit(), 1024 + MULTIPART_OVERHEAD);
        assert_eq!(config.ocr.command, "python3");
        assert_eq!(config.ocr.args, vec!["engine.py", "--json"]);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("SERVER_PORT", "abc")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "SERVER_PORT", .. })
        ));
    }

    #[test]
    fn test_http_backend_requires_url() {
        let result = Config::from_lookup(lookup_from(&[("OCR_BACKEND", "http")]));
        assert!(matches!(result, Err(ConfigError::MissingOcrUrl)));

        let config = Config::from_lookup(lookup_from(&[
            ("OCR_BACKEND", "HTTP"),
            ("OCR_URL", "http://localhost:8868/ocr"),
        ]))
        .unwrap();
        assert_eq!(config.ocr.backend, OcrBackend::Http);
        assert_eq!(config.ocr.url.as_deref(), Some("http://localhost:8868/ocr"));
    }

    #[test]
    fn test_unknown_backend() {
        let result = Config::from_lookup(lookup_from(&[("OCR_BACKEND", "tesseract")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "OCR_BACKEND", .. })
        ));
    }
}
