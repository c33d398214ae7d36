//! insert_text — place new text relative to an anchor.
//!
//! The anchor must match exactly once, optionally restricted to the range
//! between two block markers. With `addNewLine` the payload is joined to
//! the file's own line-ending convention so it lands on its own line.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::edit::{self, newline::LineEnding, AnchorPosition};
use crate::error::EditResult;
use crate::locate::flat::FlatView;
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertParams {
    pub file_path: String,
    pub text_to_be_inserted: String,
    /// Anchor the insertion site is resolved against (whitespace-insensitive).
    pub anchor_text: String,
    pub position_relative_to_anchor_text: AnchorPosition,
    /// Restrict anchor resolution to after the first occurrence of this marker.
    #[serde(default)]
    pub anchor_block_start_marker: Option<String>,
    /// Restrict anchor resolution to before the last occurrence of this marker.
    #[serde(default)]
    pub anchor_block_end_marker: Option<String>,
    /// Put the inserted text on its own line relative to the anchor.
    #[serde(default, deserialize_with = "crate::util::truthy")]
    pub add_new_line: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "insert_text",
        description: "Insert text before or after an anchor. The anchor search is \
            whitespace-insensitive and must match exactly once; optional block markers \
            narrow where the anchor is looked up. addNewLine places the text on its own line.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the file to edit"
                },
                "textToBeInserted": {
                    "type": "string",
                    "description": "The text to insert, verbatim"
                },
                "anchorText": {
                    "type": "string",
                    "description": "Existing text the insertion is anchored to"
                },
                "positionRelativeToAnchorText": {
                    "type": "string",
                    "enum": ["before", "after"],
                    "description": "Which side of the anchor to insert on"
                },
                "anchorBlockStartMarker": {
                    "type": "string",
                    "description": "Optional: resolve the anchor only after the first occurrence of this text"
                },
                "anchorBlockEndMarker": {
                    "type": "string",
                    "description": "Optional: resolve the anchor only before the last occurrence of this text"
                },
                "addNewLine": {
                    "type": "boolean",
                    "description": "Insert on its own line, using the file's line-ending style (default: false)",
                    "default": false
                }
            },
            "required": ["filePath", "textToBeInserted", "anchorText", "positionRelativeToAnchorText"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<InsertParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &InsertParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;
    super::require_non_empty(&params.text_to_be_inserted, "textToBeInserted")?;
    super::require_non_empty(&params.anchor_text, "anchorText")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    let mut raw = super::read_guarded(&path)?;
    let position = params.position_relative_to_anchor_text;

    let (insert_at, payload) = {
        let view = FlatView::build(&raw);
        let scope = super::resolve_block_scope(
            &view,
            params.anchor_block_start_marker.as_deref(),
            params.anchor_block_end_marker.as_deref(),
        )?;
        let anchor =
            super::locate_unique_in_scope(&view, scope, &params.anchor_text, "anchorText")?;

        let eol = LineEnding::detect(&raw);
        let payload = edit::insert_payload(
            &params.text_to_be_inserted,
            position,
            params.add_new_line,
            eol,
        );
        let insert_at = match position {
            AnchorPosition::Before => anchor.start,
            AnchorPosition::After => anchor.end,
        };
        (insert_at, payload)
    };

    raw.splice(insert_at..insert_at, payload);
    super::write_chars(&path, &raw)?;

    Ok(format!("Inserted text in {}", path.display()))
}
