//! create_file — create a new file, refusing to overwrite.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::{EditError, EditResult};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub file_path: String,
    #[serde(default)]
    pub file_content: String,
    #[serde(default, deserialize_with = "crate::util::truthy")]
    pub create_missing_directories: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "create_file",
        description: "Create a new file. Fails if the file already exists; missing parent \
            directories are created only when createMissingDirectories is set.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path of the file to create"
                },
                "fileContent": {
                    "type": "string",
                    "description": "Initial content (default: empty)",
                    "default": ""
                },
                "createMissingDirectories": {
                    "type": "boolean",
                    "description": "Create missing parent directories (default: false)",
                    "default": false
                }
            },
            "required": ["filePath"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<CreateParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &CreateParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    if path.exists() {
        return Err(EditError::TargetExists { path });
    }

    super::ensure_parent_dir(&path, params.create_missing_directories)?;
    super::write_text(&path, &params.file_content)?;

    Ok(format!("Created {}", path.display()))
}
