use std::path::PathBuf;
use thiserror::Error;

/// Failures from the I/O collaborators (file loading, PNG chunk reading,
/// path resolution). The extractor itself never fails; its outcomes are
/// encoded in [`crate::ExtractionResult`].
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image file not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a valid PNG image: {0}")]
    InvalidPng(String),
    #[error("Invalid image path: {0}")]
    InvalidPath(String),
}
