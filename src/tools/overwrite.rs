//! overwrite_file_content — replace the content of an existing text file.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::{EditError, EditResult};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverwriteParams {
    pub file_path: String,
    pub file_content: String,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "overwrite_file_content",
        description: "Replace the entire content of an existing file. Fails for missing or \
            binary files; use create_file for new files.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path of the file to overwrite"
                },
                "fileContent": {
                    "type": "string",
                    "description": "The new content (may be empty)"
                }
            },
            "required": ["filePath", "fileContent"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<OverwriteParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &OverwriteParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    if !path.exists() {
        return Err(EditError::FileNotFound { path });
    }
    if crate::util::binary::is_binary(&path) {
        return Err(EditError::BinaryFile { path });
    }

    super::write_text(&path, &params.file_content)?;
    Ok(format!("Overwrote {}", path.display()))
}
