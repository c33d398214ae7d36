//! Tool router — registers and dispatches MCP tool calls.
//!
//! Each tool is a module with a `Params` struct, a `tool_definition()` and
//! an `execute()` that takes JSON arguments and returns a
//! [`ToolCallResult`]. The router owns the registry; this module also holds
//! the shared path/read/write plumbing the operators go through.

pub mod append;
pub mod create;
pub mod delete;
pub mod delete_file;
pub mod insert;
pub mod move_text;
pub mod overwrite;
pub mod rename;
pub mod replace;

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::edit::RawRange;
use crate::error::{EditError, EditResult};
use crate::locate::disambiguate::disambiguation_suggestions;
use crate::locate::flat::FlatView;
use crate::locate::{find_matches, MatchSpan, Matches};
use crate::server::{OperationOutcome, ToolCallResult, ToolDefinition};

/// Resolve and validate a file path, ensuring it stays within the
/// workspace.
///
/// Rejects null bytes and lexically resolves `.`/`..` so that targets that
/// do not exist yet (create, rename) are still checked for traversal
/// escapes.
pub fn validate_path(workspace: &Path, file_path: &str) -> EditResult<PathBuf> {
    if file_path.contains('\0') {
        return Err(EditError::InvalidParams(
            "path contains a null byte".to_owned(),
        ));
    }

    let joined = if Path::new(file_path).is_absolute() {
        PathBuf::from(file_path)
    } else {
        workspace.join(file_path)
    };

    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normal.pop() {
                    return Err(EditError::InvalidParams(format!(
                        "path escapes the workspace root: {file_path}"
                    )));
                }
            }
            c => normal.push(c.as_os_str()),
        }
    }

    // Canonicalizing the workspace tolerates symlinked temp dirs; the
    // target itself may not exist yet, so it is compared lexically.
    let canonical_workspace = workspace
        .canonicalize()
        .unwrap_or_else(|_| workspace.to_path_buf());
    if !normal.starts_with(workspace) && !normal.starts_with(&canonical_workspace) {
        return Err(EditError::InvalidParams(format!(
            "path escapes workspace boundary: {file_path}"
        )));
    }

    Ok(normal)
}

/// Tool router that dispatches MCP tool calls to operator implementations.
pub struct ToolRouter {
    workspace: PathBuf,
}

impl ToolRouter {
    pub fn new(workspace: PathBuf) -> Self {
        Self { workspace }
    }

    /// All nine tool definitions, in the order they are listed to clients.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            replace::tool_definition(),
            delete::tool_definition(),
            insert::tool_definition(),
            move_text::tool_definition(),
            create::tool_definition(),
            overwrite::tool_definition(),
            append::tool_definition(),
            rename::tool_definition(),
            delete_file::tool_definition(),
        ]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for serialization-level failures; operator
    /// failures come back as structured error results.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "replace_matching_text" => replace::execute(&self.workspace, arguments),
            "delete_matching_text" => delete::execute(&self.workspace, arguments),
            "insert_text" => insert::execute(&self.workspace, arguments),
            "move_text" => move_text::execute(&self.workspace, arguments),
            "create_file" => create::execute(&self.workspace, arguments),
            "overwrite_file_content" => overwrite::execute(&self.workspace, arguments),
            "append_text_to_file" => append::execute(&self.workspace, arguments),
            "move_or_rename_file" => rename::execute(&self.workspace, arguments),
            "delete_file" => delete_file::execute(&self.workspace, arguments),
            _ => Ok(ToolCallResult::from_outcome(
                OperationOutcome {
                    message: format!("Unknown tool: {name}"),
                    suggested_parameter_values: None,
                },
                true,
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared operator plumbing
// ---------------------------------------------------------------------------

pub(crate) fn ok_result(message: String) -> ToolCallResult {
    ToolCallResult::from_outcome(
        OperationOutcome {
            message,
            suggested_parameter_values: None,
        },
        false,
    )
}

pub(crate) fn err_result(err: &EditError) -> ToolCallResult {
    let suggested = err.suggestions().and_then(|(param, values)| {
        if values.is_empty() {
            None
        } else {
            Some(
                values
                    .iter()
                    .map(|v| serde_json::json!({ param: v }))
                    .collect(),
            )
        }
    });
    ToolCallResult::from_outcome(
        OperationOutcome {
            message: err.to_string(),
            suggested_parameter_values: suggested,
        },
        true,
    )
}

/// Parse tool arguments, mapping serde failures to the parameter-schema
/// error kind.
pub(crate) fn parse_params<P: DeserializeOwned>(arguments: serde_json::Value) -> EditResult<P> {
    serde_json::from_value(arguments).map_err(|e| EditError::InvalidParams(e.to_string()))
}

pub(crate) fn require_non_empty(value: &str, name: &str) -> EditResult<()> {
    if value.is_empty() {
        return Err(EditError::InvalidParams(format!(
            "{name} must be a non-empty string"
        )));
    }
    Ok(())
}

/// Read the target file as a Unicode scalar vector, after the existence
/// check and the binary guard.
pub(crate) fn read_guarded(path: &Path) -> EditResult<Vec<char>> {
    if !path.exists() {
        return Err(EditError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if crate::util::binary::is_binary(path) {
        return Err(EditError::BinaryFile {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| EditError::io(path, e))?;
    Ok(text.chars().collect())
}

/// Write the mutated scalar vector back in one step.
pub(crate) fn write_chars(path: &Path, raw: &[char]) -> EditResult<()> {
    let text: String = raw.iter().collect();
    write_text(path, &text)
}

pub(crate) fn write_text(path: &Path, text: &str) -> EditResult<()> {
    std::fs::write(path, text).map_err(|e| EditError::io(path, e))
}

/// Check (and optionally create) the parent directory of a target path.
pub(crate) fn ensure_parent_dir(path: &Path, create_missing: bool) -> EditResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    if !create_missing {
        return Err(EditError::DirectoryMissing {
            path: parent.to_path_buf(),
        });
    }
    std::fs::create_dir_all(parent).map_err(|e| EditError::io(parent, e))
}

/// Raw slices of candidate spans, used as retry suggestions.
pub(crate) fn raw_slices(raw: &[char], spans: &[MatchSpan]) -> Vec<String> {
    spans
        .iter()
        .map(|s| raw[s.raw_start..s.raw_end].iter().collect())
        .collect()
}

/// Require exactly one exact match for `search` in the view; otherwise fail
/// with suggestions keyed by `param`.
pub(crate) fn locate_unique(
    view: &FlatView,
    search: &str,
    param: &'static str,
) -> EditResult<RawRange> {
    match find_matches(view, search) {
        Matches::Exact(spans) if spans.len() == 1 => {
            Ok(RawRange::new(spans[0].raw_start, spans[0].raw_end))
        }
        Matches::Exact(spans) => Err(EditError::MultipleMatches {
            param,
            suggestions: disambiguation_suggestions(view, &spans),
        }),
        Matches::Fuzzy(candidates) => Err(EditError::NoMatch {
            param,
            suggestions: raw_slices(view.raw(), &candidates),
        }),
    }
}

/// Resolve the optional block scope for anchor searches.
///
/// The scope runs from the end of the first start-marker occurrence to the
/// start of the last end-marker occurrence at or after it; a missing marker
/// leaves that side unbounded.
pub(crate) fn resolve_block_scope(
    view: &FlatView,
    start_marker: Option<&str>,
    end_marker: Option<&str>,
) -> EditResult<RawRange> {
    let raw = view.raw();
    let mut scope = RawRange::new(0, raw.len());

    if let Some(marker) = start_marker {
        match find_matches(view, marker) {
            Matches::Exact(spans) => {
                if let Some(first) = spans.first() {
                    scope.start = first.raw_end;
                }
            }
            Matches::Fuzzy(candidates) => {
                return Err(EditError::NoMatch {
                    param: "anchorBlockStartMarker",
                    suggestions: raw_slices(raw, &candidates),
                });
            }
        }
    }

    if let Some(marker) = end_marker {
        match find_matches(view, marker) {
            Matches::Exact(spans) => {
                match spans.iter().rev().find(|s| s.raw_start >= scope.start) {
                    Some(last) => scope.end = last.raw_start,
                    None => {
                        return Err(EditError::NoMatch {
                            param: "anchorBlockEndMarker",
                            suggestions: Vec::new(),
                        });
                    }
                }
            }
            Matches::Fuzzy(candidates) => {
                return Err(EditError::NoMatch {
                    param: "anchorBlockEndMarker",
                    suggestions: raw_slices(raw, &candidates),
                });
            }
        }
    }

    Ok(scope)
}

/// Require exactly one exact match for `search` within `scope`, returning
/// its range in whole-file coordinates.
pub(crate) fn locate_unique_in_scope(
    view: &FlatView,
    scope: RawRange,
    search: &str,
    param: &'static str,
) -> EditResult<RawRange> {
    let raw = view.raw();
    if scope.start == 0 && scope.end == raw.len() {
        return locate_unique(view, search, param);
    }
    let slice = &raw[scope.start..scope.end];
    let scoped_view = FlatView::build(slice);
    let range = locate_unique(&scoped_view, search, param)?;
    Ok(RawRange::new(
        range.start + scope.start,
        range.end + scope.start,
    ))
}
