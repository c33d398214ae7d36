//! replace_matching_text — whitespace-insensitive search and replace.
//!
//! Locates `searchText` through the fuzzy matcher. A unique exact match
//! (or all matches, when requested) is spliced with `replacementText`;
//! ambiguity and misses come back as structured failures carrying
//! ready-to-retry `searchText` suggestions.

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
pub struct ReplaceParams {
    /// Path to the file to edit (relative to workspace or absolute).
    pub file_path: String,
    /// The text to find. Whitespace differences are ignored.
    pub search_text: String,
    /// The replacement text, inserted verbatim.
    pub replacement_text: String,
    /// Replace every match instead of requiring a unique one.
    #[serde(default, deserialize_with = "crate::util::truthy")]
    pub replace_all_occurrences_of_search_text: bool,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "replace_matching_text",
        description: "Replace text in a file. The search is insensitive to whitespace, \
            indentation, and line endings. On a miss or an ambiguous match, the response \
            suggests concrete searchText values to retry with.",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the file to edit"
                },
                "searchText": {
                    "type": "string",
                    "description": "The text to find (whitespace-insensitive)"
                },
                "replacementText": {
                    "type": "string",
                    "description": "The replacement text"
                },
                "replaceAllOccurrencesOfSearchText": {
                    "type": "boolean",
                    "description": "Replace all occurrences (default: false); textual true/false forms accepted",
                    "default": false
                }
            },
            "required": ["filePath", "searchText", "replacementText"]
        }),
    }
}

pub fn execute(workspace: &Path, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params = match super::parse_params::<ReplaceParams>(arguments) {
        Ok(p) => p,
        Err(e) => return Ok(super::err_result(&e)),
    };
    match run(workspace, &params) {
        Ok(message) => Ok(super::ok_result(message)),
        Err(e) => Ok(super::err_result(&e)),
    }
}

fn run(workspace: &Path, params: &ReplaceParams) -> EditResult<String> {
    super::require_non_empty(&params.file_path, "filePath")?;
    super::require_non_empty(&params.search_text, "searchText")?;
    super::require_non_empty(&params.replacement_text, "replacementText")?;
    if params.search_text == params.replacement_text {
        return Err(EditError::IdenticalText);
    }

    let path = super::validate_path(workspace, &params.file_path)?;
    let mut raw = super::read_guarded(&path)?;

    let spans: Vec<RawRange> = {
        let view = FlatView::build(&raw);
        match find_matches(&view, &params.search_text) {
            Matches::Exact(spans) => {
                if spans.len() > 1 && !params.replace_all_occurrences_of_search_text {
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

    let replacement: Vec<char> = params.replacement_text.chars().collect();
    edit::splice_all(&mut raw, &spans, &replacement);
    super::write_chars(&path, &raw)?;

    Ok(format!(
        "Replaced {} occurrence{} in {}",
        spans.len(),
        if spans.len() == 1 { "" } else { "s" },
        path.display()
    ))
}
