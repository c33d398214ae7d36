//! delete_matching_text — remove a located span.
//!
//! Same matching contract as replace, with an empty splice. Unlike
//! replace there is no identical-text rejection to make.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::edit::{self, RawRange};
use crate::error::{EditError, EditResult};
use crate::locate::disambiguate::disambiguation_suggestions;
use crate::locate::flat::FlatView;
use crate::locate::{find_matches, Matches};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub file_path: String,
    pub search_text: String,
    #[serde(default, deserialize_with = "crate::util::truthy")]
    pub delete_all_occurrences_of_search_text: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "delete_matching_text",
        description: "Delete text from a file. The search is insensitive to whitespace, \
            indentation, and line endings; ambiguous or missing matches return \
            searchText suggestions.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the file to edit"
                },
                "searchText": {
                    "type": "string",
                    "description": "The text to delete (whitespace-insensitive)"
                },
                "deleteAllOccurrencesOfSearchText": {
                    "type": "boolean",
                    "description": "Delete all occurrences (default: false); textual true/false forms accepted",
                    "default": false
                }
            },
            "required": ["filePath", "searchText"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<DeleteParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &DeleteParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;
    super::require_non_empty(&params.search_text, "searchText")?;

    let path = super::validate_path(workspace, &params.file_path)?;
    let mut raw = super::read_guarded(&path)?;

    let spans: Vec<RawRange> = {
        let view = FlatView::build(&raw);
        match find_matches(&view, &params.search_text) {
            Matches::Exact(spans) => {
                if spans.len() > 1 && !params.delete_all_occurrences_of_search_text {
                    return Err(EditError::MultipleMatches {
                        param: "searchText",
                        suggestions: disambiguation_suggestions(&view, &spans),
                    });
                }
                spans
                    .iter()
                    .map(|s| RawRange::new(s.raw_start, s.raw_end))
                    .collect()
            }
            Matches::Fuzzy(candidates) => {
                return Err(EditError::NoMatch {
                    param: "searchText",
                    suggestions: super::raw_slices(&raw, &candidates),
                });
            }
        }
    };

    edit::splice_all(&mut raw, &spans, &[]);
    super::write_chars(&path, &raw)?;

    Ok(format!(
        "Deleted {} occurrence{} in {}",
        spans.len(),
        if spans.len() == 1 { "" } else { "s" },
        path.display()
    ))
}
