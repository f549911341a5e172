//! Transient Store
//!
//! Each upload is written to its own directory under the upload root:
//! `<root>/<uuid>/<file name>`. The returned `TransientFile` owns that
//! directory and removes it when released or dropped, so a request never
//! leaves anything behind and same-named uploads never share a path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::StorageError;

/// Name used when the client file name has no usable component
const FALLBACK_FILE_NAME: &str = "upload";

/// Writes uploads beneath a fixed root directory
#[derive(Debug, Clone)]
pub struct TransientStore {
    root: PathBuf,
}

impl TransientStore {
    /// Open the store, creating the root directory if absent
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StorageError::CreateDir {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Persist `bytes` under a fresh request directory
    pub async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<TransientFile, StorageError> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());
        let name = sanitize_file_name(file_name);

        if let Err(e) = tokio::fs::create_dir(&dir).await {
            tracing::error!(request_id = %id, dir = %dir.display(), error = %e, "Failed to create request directory");
            return Err(StorageError::Write {
                file: name,
                message: e.to_string(),
            });
        }

        // From here on the guard owns the directory, including on a failed write
        let file = TransientFile {
            id,
            path: dir.join(&name),
            dir,
            released: false,
        };

        if let Err(e) = tokio::fs::write(&file.path, bytes).await {
            tracing::error!(request_id = %id, path = %file.path.display(), error = %e, "Failed to write upload");
            return Err(StorageError::Write {
                file: name,
                message: e.to_string(),
            });
        }

        tracing::debug!(request_id = %id, path = %file.path.display(), size = bytes.len(), "Stored upload");

        Ok(file)
    }
}

/// An upload on disk whose lifetime is bound to one request
#[derive(Debug)]
pub struct TransientFile {
    id: Uuid,
    path: PathBuf,
    dir: PathBuf,
    released: bool,
}

impl TransientFile {
    /// Request id, also the name of the request directory
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back exactly what was written to disk
    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(request_id = %self.id, path = %self.path.display(), error = %e, "Failed to read upload");
            StorageError::Read {
                file: self.file_name(),
                message: e.to_string(),
            }
        })
    }

    /// Remove the file and its request directory. Failures are logged only.
    pub async fn release(mut self) {
        self.released = true;
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => tracing::debug!(request_id = %self.id, "Removed upload"),
            Err(e) => log_cleanup_failure(self.id, &self.dir, &e),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        // Blocking removal; only reached on error, cancellation or unwind
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            log_cleanup_failure(self.id, &self.dir, &e);
        }
    }
}

fn log_cleanup_failure(id: Uuid, dir: &Path, e: &std::io::Error) {
    if e.kind() != ErrorKind::NotFound {
        tracing::warn!(request_id = %id, dir = %dir.display(), error = %e, "Failed to remove upload");
    }
}

/// Reduce a client file name to a single safe path component
pub fn sanitize_file_name(file_name: &str) -> String {
    let last = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();

    match last {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        name => name.to_string(),
    }
}
