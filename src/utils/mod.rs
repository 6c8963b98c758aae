// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod text_debug;

pub use error::{AppError, DecodeError, StorageError}; // Re-export error types for convenience
