//! # Workflow Importer
//!
//! This crate recovers embedded ComfyUI workflow/prompt metadata from PNG
//! images. The core is [`extract`]: given an image's text-chunk metadata, it
//! locates the serialized workflow graph and/or execution prompt among the
//! known key variants, parses it as JSON, and classifies the outcome
//! (success, foreign-format, absent). The surrounding modules are thin I/O
//! collaborators that turn a file path or a raw byte upload into that
//! metadata.

pub mod errors;
pub mod extract;
pub mod png;
pub mod resolve;
pub mod types;

pub use errors::ExtractError;
pub use extract::extract;
pub use png::read_png_metadata;
pub use resolve::{
    load_image_metadata, parse_annotated_path, resolve_annotated, resolve_image_path, FolderType,
    StorageDirs,
};
pub use types::{ExtractionResult, ImageMetadata, MetadataSource};
