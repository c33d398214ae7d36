//! `anchor-edit` — MCP server for whitespace-insensitive text editing.
//!
//! Exposes structure-aware file-editing tools via the Model Context
//! Protocol (MCP) over stdio (JSON-RPC 2.0, newline-delimited). Edits are
//! anchored by text rather than byte offsets or line numbers: search
//! strings are matched against a whitespace-stripped view of the file, so
//! differences in indentation, spacing, and line endings never break a
//! match. When a search misses or is ambiguous, the response carries
//! concrete parameter suggestions the caller can retry with verbatim.
//!
//! # Tools
//!
//! - `replace_matching_text` / `delete_matching_text` — span edits driven
//!   by the fuzzy locator
//! - `insert_text` / `move_text` — anchor-relative edits with optional
//!   block scoping and line-boundary awareness
//! - `create_file` / `overwrite_file_content` / `append_text_to_file` /
//!   `move_or_rename_file` / `delete_file` — plain file operations
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → Server → ToolRouter → operators → locate (matcher)
//!                                              ↓
//! stdout (JSON-RPC) ←──────────────── structured outcome
//! ```

pub mod edit;
pub mod error;
pub mod locate;
pub mod server;
pub mod tools;
pub mod util;

pub use error::{EditError, EditResult};
pub use server::run_server;
