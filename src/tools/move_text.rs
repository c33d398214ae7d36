//! move_text — relocate existing text relative to an anchor.
//!
//! Both the moved text and the anchor must match exactly once (the anchor
//! optionally within block markers). When the moved text sits alone on its
//! line and the anchor's facing edge touches a line boundary, the move is
//! line-granular: indentation travels with the text and the trailing
//! newline is consumed at the source. Otherwise the spans are moved
//! verbatim.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::edit::{self, newline::LineEnding, AnchorPosition};
use crate::error::EditResult;
use crate::locate::flat::FlatView;
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveParams {
    pub file_path: String,
    pub text_to_be_moved: String,
    pub anchor_text: String,
    pub position_relative_to_anchor_text: AnchorPosition,
    #[serde(default)]
    pub anchor_block_start_marker: Option<String>,
    #[serde(default)]
    pub anchor_block_end_marker: Option<String>,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "move_text",
        description: "Move text to a position before or after an anchor. Both searches are \
            whitespace-insensitive and must match exactly once. Whole-line moves keep their \
            indentation and line endings; moves into the middle of a line are verbatim.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the file to edit"
                },
                "textToBeMoved": {
                    "type": "string",
                    "description": "Existing text to relocate"
                },
                "anchorText": {
                    "type": "string",
                    "description": "Existing text the destination is anchored to"
                },
                "positionRelativeToAnchorText": {
                    "type": "string",
                    "enum": ["before", "after"],
                    "description": "Which side of the anchor to move to"
                },
                "anchorBlockStartMarker": {
                    "type": "string",
                    "description": "Optional: resolve the anchor only after the first occurrence of this text"
                },
                "anchorBlockEndMarker": {
                    "type": "string",
                    "description": "Optional: resolve the anchor only before the last occurrence of this text"
                }
            },
            "required": ["filePath", "textToBeMoved", "anchorText", "positionRelativeToAnchorText"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<MoveParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &MoveParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;
    super::require_non_empty(&params.text_to_be_moved, "textToBeMoved")?;
    super::require_non_empty(&params.anchor_text, "anchorText")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    let mut raw = super::read_guarded(&path)?;
    let position = params.position_relative_to_anchor_text;

    let plan = {
        let view = FlatView::build(&raw);
        let moved = super::locate_unique(&view, &params.text_to_be_moved, "textToBeMoved")?;
        let scope = super::resolve_block_scope(
            &view,
            params.anchor_block_start_marker.as_deref(),
            params.anchor_block_end_marker.as_deref(),
        )?;
        let anchor =
            super::locate_unique_in_scope(&view, scope, &params.anchor_text, "anchorText")?;

        let eol = LineEnding::detect(&raw);
        edit::plan_move(&raw, moved, anchor, position, eol)?
    };

    edit::apply_move(&mut raw, &plan);
    super::write_chars(&path, &raw)?;

    Ok(format!("Moved text in {}", path.display()))
}
