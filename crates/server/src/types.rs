use serde::{Deserialize, Serialize};
use serde_json::Value;
use workflow_importer::ExtractionResult;

/// The response body for both extraction endpoints.
///
/// `workflow` and `prompt` are the parsed structured values or null; `info`
/// carries the full classified extraction result.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub workflow: Option<Value>,
    pub prompt: Option<Value>,
    pub info: ExtractionResult,
    pub error: Option<String>,
}

impl From<ExtractionResult> for ExtractResponse {
    fn from(info: ExtractionResult) -> Self {
        Self {
            success: info.success,
            workflow: info.workflow.clone(),
            prompt: info.prompt.clone(),
            error: info.error.clone(),
            info,
        }
    }
}
