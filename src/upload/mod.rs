//! Upload Module
//!
//! Request intake and the per-request transient file store.
//!
//! Flow:
//! 1. `read_upload` validates the multipart body and collects the image bytes
//! 2. `TransientStore::write` persists them under a unique request directory
//! 3. The returned `TransientFile` is released (or dropped) once the request ends

pub mod intake;
pub mod store;

pub use intake::{read_upload, validate_file_name, UploadRequest, FILE_FIELD};
pub use store::{sanitize_file_name, TransientFile, TransientStore};
