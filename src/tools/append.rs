//! append_text_to_file — add text at the end of a file.
//!
//! A line-ending literal in the file's own style is put before the
//! appended text unless the file already ends with one (or the separator
//! was turned off).

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::edit::newline::LineEnding;
use crate::error::EditResult;
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendParams {
    pub file_path: String,
    pub append_text: String,
    #[serde(
        default = "crate::util::default_true",
        deserialize_with = "crate::util::truthy"
    )]
    pub add_new_line_before_appending: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "append_text_to_file",
        description: "Append text to an existing file, starting a new line in the file's own \
            line-ending style unless disabled or already at a line start.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path of the file to append to"
                },
                "appendText": {
                    "type": "string",
                    "description": "The text to append"
                },
                "addNewLineBeforeAppending": {
                    "type": "boolean",
                    "description": "Start a new line before the appended text (default: true)",
                    "default": true
                }
            },
            "required": ["filePath", "appendText"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<AppendParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &AppendParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;
    super::require_non_empty(&params.append_text, "appendText")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    let raw = super::read_guarded(&path)?;
    let eol = LineEnding::detect(&raw);

    let mut out: String = raw.iter().collect();
    if params.add_new_line_before_appending && !out.ends_with(eol.as_str()) {
        out.push_str(eol.as_str());
    }
    out.push_str(&params.append_text);

    super::write_text(&path, &out)?;
    Ok(format!("Appended text to {}", path.display()))
}
