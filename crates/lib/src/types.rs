use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Workflow text-chunk keys, in priority order. Earlier entries win when
/// more than one is present in the same image.
pub const WORKFLOW_KEYS: &[&str] = &["workflow", "Workflow", "comfyui_workflow", "ComfyUI_Workflow"];

/// Prompt text-chunk keys, in priority order.
pub const PROMPT_KEYS: &[&str] = &["prompt", "Prompt", "comfyui_prompt", "ComfyUI_Prompt"];

/// Standalone version keys, in priority order. Only consulted when the
/// workflow itself does not carry an embedded `extra.comfyui_version`.
pub const VERSION_KEYS: &[&str] = &["comfyui_version", "ComfyUI_version", "version"];

/// Keys that mark an Automatic1111-style image (generation parameters as a
/// flat text blob, not a node graph).
pub const PARAMETERS_KEYS: &[&str] = &["parameters", "Parameters"];

/// Text metadata recovered from an image, as a string-to-string map that
/// preserves first-seen key order.
///
/// Built by merging two sources: dedicated text chunks (consumed first,
/// taking precedence) and a generic info map whose entries are included only
/// if string-valued and only for keys not already present. Insertion is
/// first-wins, so feeding the sources in that order realizes the precedence.
#[derive(Debug, Clone, Default)]
pub struct ImageMetadata {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl ImageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds metadata from the two merge sources in one call.
    pub fn from_sources<I>(text_chunks: I, info: &Map<String, Value>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut metadata = Self::new();
        for (key, value) in text_chunks {
            metadata.insert(key, value);
        }
        metadata.merge_info(info);
        metadata
    }

    /// Inserts a key/value pair unless the key is already present.
    ///
    /// Returns `true` if the pair was inserted. First-wins keeps both the
    /// source precedence (text chunks before info) and the key-priority
    /// tie-break stable.
    pub fn insert(&mut self, key: String, value: String) -> bool {
        if self.values.contains_key(&key) {
            return false;
        }
        self.keys.push(key.clone());
        self.values.insert(key, value);
        true
    }

    /// Merges a generic info map: string-valued entries only, and only for
    /// keys not already present.
    pub fn merge_info(&mut self, info: &Map<String, Value>) {
        for (key, value) in info {
            if let Value::String(text) = value {
                self.insert(key.clone(), text.clone());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// All keys, first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for ImageMetadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Which producer's metadata convention matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSource {
    #[default]
    Unknown,
    Comfyui,
    Automatic1111,
}

/// The classified outcome of a metadata extraction.
///
/// Invariants: `success == (has_workflow || has_prompt)`; `error` is set
/// exactly when `success` is false; `raw_keys` lists every observed key in
/// first-seen order regardless of outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub source: MetadataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
    pub has_workflow: bool,
    pub has_prompt: bool,
    pub raw_keys: Vec<String>,
    /// Soft notes from per-key parse failures that were recovered from.
    /// Distinguishes "no key matched" from "keys matched but all malformed".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
