//! move_or_rename_file — relocate a file on disk.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::{EditError, EditResult};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameParams {
    pub source_file_path: String,
    pub target_file_path: String,
    #[serde(default, deserialize_with = "crate::util::truthy")]
    pub create_missing_directories: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "move_or_rename_file",
        description: "Move or rename a file. Fails if the target already exists; missing \
            target directories are created only when createMissingDirectories is set.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "sourceFilePath": {
                    "type": "string",
                    "description": "Path of the file to move"
                },
                "targetFilePath": {
                    "type": "string",
                    "description": "Destination path"
                },
                "createMissingDirectories": {
                    "type": "boolean",
                    "description": "Create missing target directories (default: false)",
                    "default": false
                }
            },
            "required": ["sourceFilePath", "targetFilePath"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<RenameParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &RenameParams) -> EditResult<String> {
    super::require_non_empty(&params.source_file_path, "sourceFilePath")?;
    super::require_non_empty(&params.target_file_path, "targetFilePath")?;

    let source = super::validate_path(workspace, &params.source_file_path)?;
    let target = super::validate_path(workspace, &params.target_file_path)?;

    if !source.exists() {
        return Err(EditError::FileNotFound { path: source });
    }
    if target.exists() {
        return Err(EditError::TargetExists { path: target });
    }

    super::ensure_parent_dir(&target, params.create_missing_directories)?;
    std::fs::rename(&source, &target).map_err(|e| EditError::io(&source, e))?;

    Ok(format!(
        "Moved {} to {}",
        source.display(),
        target.display()
    ))
}
