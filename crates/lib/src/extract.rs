//! The metadata extractor: locating the serialized workflow graph and/or
//! execution prompt among the known text-chunk key variants, parsing it as
//! JSON, and classifying the outcome.

use crate::types::{
    ExtractionResult, ImageMetadata, MetadataSource, PARAMETERS_KEYS, PROMPT_KEYS, VERSION_KEYS,
    WORKFLOW_KEYS,
};
use serde_json::Value;
use tracing::{debug, warn};

/// The result of scanning one key table: the first value that parsed, the
/// key it was found under, and a note for every key that was present but
/// malformed along the way.
#[derive(Debug, Default)]
struct KeyLookup {
    value: Option<Value>,
    matched_key: Option<String>,
    warnings: Vec<String>,
}

/// Scans `keys` in order against `metadata`, returning the first value that
/// parses as JSON.
///
/// A key that is present but malformed is recorded as a soft warning and the
/// scan continues with the remaining keys; it never aborts the extraction.
fn lookup_json_key(metadata: &ImageMetadata, keys: &[&str]) -> KeyLookup {
    let mut lookup = KeyLookup::default();
    for &key in keys {
        let Some(raw) = metadata.get(key) else {
            continue;
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => {
                lookup.value = Some(value);
                lookup.matched_key = Some(key.to_string());
                return lookup;
            }
            Err(e) => {
                warn!("Metadata key '{key}' present but not valid JSON: {e}");
                lookup.warnings.push(format!("key '{key}' is not valid JSON: {e}"));
            }
        }
    }
    lookup
}

/// Best-effort version sniffing. The version embedded in the workflow's
/// `extra` object takes precedence over any standalone version key.
fn sniff_version(workflow: Option<&Value>, metadata: &ImageMetadata) -> Option<String> {
    if let Some(version) = workflow
        .and_then(|w| w.get("extra"))
        .and_then(|extra| extra.get("comfyui_version"))
        .and_then(Value::as_str)
    {
        return Some(version.to_string());
    }
    VERSION_KEYS
        .iter()
        .find_map(|&key| metadata.get(key).filter(|v| !v.is_empty()))
        .map(str::to_string)
}

/// Extracts and classifies workflow/prompt metadata from an image's text
/// chunks.
///
/// Pure function of its input: no I/O, and no failure mode escapes — absent
/// metadata, malformed values, and foreign-format images are all reported
/// through the result's `success`/`error` fields.
pub fn extract(metadata: &ImageMetadata) -> ExtractionResult {
    if metadata.is_empty() {
        return ExtractionResult {
            error: Some("No metadata found in image".to_string()),
            ..Default::default()
        };
    }

    let mut result = ExtractionResult {
        raw_keys: metadata.keys().map(str::to_string).collect(),
        ..Default::default()
    };

    let workflow = lookup_json_key(metadata, WORKFLOW_KEYS);
    result.warnings.extend(workflow.warnings);
    if let Some(value) = workflow.value {
        debug!("Found workflow under key '{}'", workflow.matched_key.as_deref().unwrap_or(""));
        result.workflow = Some(value);
        result.has_workflow = true;
        result.source = MetadataSource::Comfyui;
    }

    let prompt = lookup_json_key(metadata, PROMPT_KEYS);
    result.warnings.extend(prompt.warnings);
    if let Some(value) = prompt.value {
        debug!("Found prompt under key '{}'", prompt.matched_key.as_deref().unwrap_or(""));
        result.prompt = Some(value);
        result.has_prompt = true;
        result.source = MetadataSource::Comfyui;
    }

    result.source_version = sniff_version(result.workflow.as_ref(), metadata);

    result.success = result.has_workflow || result.has_prompt;
    if !result.success {
        if PARAMETERS_KEYS.iter().any(|&key| metadata.contains_key(key)) {
            result.source = MetadataSource::Automatic1111;
            result.error = Some(
                "Image contains Automatic1111 generation parameters, not a ComfyUI workflow"
                    .to_string(),
            );
        } else {
            result.error =
                Some("No ComfyUI workflow or prompt found in image metadata".to_string());
        }
    }

    result
}
