//! delete_file — remove a file from disk.
//!
//! The only destructive operation that skips the binary guard: deleting a
//! binary file is fine, editing one is not.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::{EditError, EditResult};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    pub file_path: String,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "delete_file",
        description: "Delete a file.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path of the file to delete"
                }
            },
            "required": ["filePath"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<DeleteFileParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &DeleteFileParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    if !path.exists() {
        return Err(EditError::FileNotFound { path });
    }
    std::fs::remove_file(&path).map_err(|e| EditError::io(&path, e))?;

    Ok(format!("Deleted {}", path.display()))
}
