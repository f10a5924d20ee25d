//! Path resolution for locally stored images.
//!
//! Turns the two reference styles the API accepts into a concrete file path:
//! the annotated-filepath convention (`name.png [output]`) and the
//! filename/subfolder/type triple from an upload response. Both resolve
//! against the configured storage directories, and neither may escape them.

use crate::errors::ExtractError;
use crate::png::read_png_metadata;
use crate::types::ImageMetadata;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// The storage area an image reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    #[default]
    Input,
    Output,
    Temp,
}

impl FolderType {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            "temp" => Some(Self::Temp),
            _ => None,
        }
    }
}

/// The base directories image references resolve against.
#[derive(Debug, Clone)]
pub struct StorageDirs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub temp: PathBuf,
}

impl StorageDirs {
    pub fn base_dir(&self, folder_type: FolderType) -> &Path {
        match folder_type {
            FolderType::Input => &self.input,
            FolderType::Output => &self.output,
            FolderType::Temp => &self.temp,
        }
    }
}

/// Splits an annotated filepath (`name.png [output]`) into the bare name and
/// its storage type. A path without a recognized annotation is returned
/// whole, defaulting to the input folder.
pub fn parse_annotated_path(raw: &str) -> (&str, FolderType) {
    if let Some(stripped) = raw.strip_suffix(']') {
        if let Some((name, tag)) = stripped.rsplit_once(" [") {
            if let Some(folder_type) = FolderType::from_tag(tag) {
                return (name, folder_type);
            }
        }
    }
    (raw, FolderType::Input)
}

/// Lexical traversal check: relative, and no `..` components.
fn is_safe_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Resolves an upload-response triple (`filename`, `subfolder`, `type`)
/// against the storage directories. Rejects empty filenames and any
/// component that would escape the base directory.
pub fn resolve_image_path(
    dirs: &StorageDirs,
    filename: &str,
    subfolder: &str,
    folder_type: FolderType,
) -> Result<PathBuf, ExtractError> {
    if filename.is_empty() {
        return Err(ExtractError::InvalidPath("filename is empty".to_string()));
    }
    let relative = Path::new(subfolder).join(filename);
    if !is_safe_relative(&relative) {
        return Err(ExtractError::InvalidPath(format!(
            "path '{}' escapes the storage directory",
            relative.display()
        )));
    }
    Ok(dirs.base_dir(folder_type).join(relative))
}

/// Resolves an `image_path` request value. An annotated path resolves its
/// bare name inside the tagged storage directory; an unannotated relative
/// path resolves inside the input directory; an absolute path is taken as
/// given.
pub fn resolve_annotated(dirs: &StorageDirs, raw: &str) -> Result<PathBuf, ExtractError> {
    let (name, folder_type) = parse_annotated_path(raw);
    let path = Path::new(name);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    if !is_safe_relative(path) {
        return Err(ExtractError::InvalidPath(format!(
            "image path '{raw}' escapes the storage directory"
        )));
    }
    Ok(dirs.base_dir(folder_type).join(path))
}

/// Reads an image file and recovers its text metadata.
pub async fn load_image_metadata(path: &Path) -> Result<ImageMetadata, ExtractError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::NotFound(path.to_path_buf())
        } else {
            ExtractError::Io(e)
        }
    })?;
    read_png_metadata(&bytes)
}
