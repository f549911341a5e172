//! OCR Web Server
//!
//! Accepts an uploaded image, hands it to an external OCR engine and returns
//! the recognized text regions together with the original image.
//!
//! # Modules
//!
//! - `upload`: request intake and per-request transient files
//! - `ocr`: recognizer backends and the invoker
//! - `response`: shaping engine output into the client schema
//! - `pipeline`: the write, recognize, shape, cleanup sequence
//! - `routes`: HTTP handlers and router

pub mod config;
pub mod error;
pub mod ocr;
pub mod pipeline;
pub mod response;
pub mod routes;
pub mod state;
pub mod upload;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
