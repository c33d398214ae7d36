//! MCP server — stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! One request per line on stdin, one response per line on stdout.
//! Requests are served strictly one at a time: each is a complete
//! validate → read → compute → write sequence with no state carried over,
//! so the server never interleaves two edits.
//!
//! Dispatch is split in two layers: [`serve_line`] owns the envelope
//! (parsing, version check, id echo, notification suppression) and
//! [`handle_request`] produces a bare result payload or a fault. Only the
//! envelope layer ever builds a [`JsonRpcResponse`].

use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::tools::ToolRouter;

const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision implemented by this server.
const PROTOCOL_VERSION: &str = "2025-06-18";

/// Upper bound on one request line (10 MiB). Longer lines are drained and
/// rejected so a runaway client cannot buffer the process to death.
const MAX_LINE_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Working directory that all file paths must resolve within.
    pub workspace: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
        }
    }
}

/// Run the server on stdin/stdout until the client closes stdin.
///
/// # Errors
///
/// Returns an error only if the transport itself fails (I/O error,
/// oversized or non-UTF-8 line); every per-request failure is recovered
/// into a response.
pub fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        workspace = %config.workspace.display(),
        "anchor-edit server starting"
    );

    let router = ToolRouter::new(config.workspace);
    let stdin = std::io::stdin();
    let mut reader = std::io::BufReader::new(stdin.lock());
    let mut out = std::io::stdout().lock();

    while let Some(line) = next_line(&mut reader, MAX_LINE_BYTES)? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(raw = trimmed, "request received");
        if let Some(response) = serve_line(&router, trimmed) {
            send(&mut out, &response)?;
        }
    }

    info!("stdin closed, anchor-edit server stopped");
    Ok(())
}

/// Decode and serve one request line. `None` means nothing goes back on
/// the wire (the line was a notification).
fn serve_line(router: &ToolRouter, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "request is not valid JSON-RPC");
            return Some(JsonRpcResponse::failure(
                None,
                JsonRpcError::PARSE_ERROR,
                format!("parse error: {e}"),
            ));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        warn!(version = request.jsonrpc, "unsupported JSON-RPC version");
        return Some(JsonRpcResponse::failure(
            request.id,
            JsonRpcError::INVALID_REQUEST,
            format!(
                "jsonrpc version must be \"{JSONRPC_VERSION}\", got \"{}\"",
                request.jsonrpc
            ),
        ));
    }

    let handled = handle_request(router, &request);

    // Notifications run for their side effects only; no id, no response.
    let id = request.id?;

    match handled {
        Handled::Reply(result) => Some(JsonRpcResponse::success(id, result)),
        Handled::Fault { code, message } => {
            Some(JsonRpcResponse::failure(Some(id), code, message))
        }
        Handled::Silent => None,
    }
}

// ---------------------------------------------------------------------------
// Method dispatch
// ---------------------------------------------------------------------------

/// What a method handler produced, before the envelope is wrapped around
/// it.
enum Handled {
    /// A result payload to echo back under the request id.
    Reply(serde_json::Value),
    /// A protocol-level fault.
    Fault { code: i64, message: String },
    /// Handled, nothing to say (notification methods).
    Silent,
}

fn handle_request(router: &ToolRouter, request: &JsonRpcRequest) -> Handled {
    match request.method.as_str() {
        "initialize" => Handled::Reply(serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": "anchor-edit",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "notifications/initialized" => {
            info!("client initialized");
            Handled::Silent
        }
        "ping" => Handled::Reply(serde_json::json!({})),
        "tools/list" => match serde_json::to_value(router.list_tools()) {
            Ok(tools) => Handled::Reply(serde_json::json!({ "tools": tools })),
            Err(e) => Handled::Fault {
                code: JsonRpcError::INTERNAL_ERROR,
                message: format!("failed to serialize tool list: {e}"),
            },
        },
        "tools/call" => call_tool(router, &request.params),
        other => {
            warn!(method = other, "method not found");
            Handled::Fault {
                code: JsonRpcError::METHOD_NOT_FOUND,
                message: format!("method not found: {other}"),
            }
        }
    }
}

/// Pull the tool name and arguments out of tools/call params and run the
/// tool. Operator failures surface as `isError` results, not faults.
fn call_tool(router: &ToolRouter, params: &serde_json::Value) -> Handled {
    let Some(name) = params.get("name").and_then(serde_json::Value::as_str) else {
        return Handled::Fault {
            code: JsonRpcError::INVALID_PARAMS,
            message: "tools/call params must carry a tool name".to_owned(),
        };
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    let result = match router.call_tool(name, arguments) {
        Ok(result) => result,
        Err(e) => {
            error!(tool = name, error = %e, "tool call failed");
            ToolCallResult::from_outcome(
                OperationOutcome {
                    message: format!("Error: {e}"),
                    suggested_parameter_values: None,
                },
                true,
            )
        }
    };

    match serde_json::to_value(&result) {
        Ok(value) => Handled::Reply(value),
        Err(e) => Handled::Fault {
            code: JsonRpcError::INTERNAL_ERROR,
            message: format!("failed to serialize tool result: {e}"),
        },
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Pull the next newline-terminated line off the transport.
///
/// Returns `Ok(None)` at EOF. The read itself is bounded by `limit`; a
/// line that fills the bound without reaching its newline is drained
/// byte-by-byte (nothing is kept) and reported as an error.
fn next_line(reader: &mut impl BufRead, limit: u64) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut buf)
        .context("failed to read from stdin")?;

    if n == 0 {
        return Ok(None);
    }

    if !buf.ends_with(b"\n") && n as u64 == limit {
        for byte in reader.by_ref().bytes() {
            if byte.context("failed to drain oversized request")? == b'\n' {
                break;
            }
        }
        anyhow::bail!("request line exceeds maximum size ({limit} bytes)");
    }

    let line = String::from_utf8(buf).context("request is not valid UTF-8")?;
    Ok(Some(line))
}

/// Ship one response as a single line-terminated write, then flush — the
/// client blocks on it.
fn send(out: &mut impl Write, response: &JsonRpcResponse) -> Result<()> {
    let mut line = serde_json::to_vec(response).context("failed to serialize response")?;
    line.push(b'\n');
    debug!(bytes = line.len(), "response sent");
    out.write_all(&line).context("failed to write to stdout")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One decoded request, or a notification when `id` is absent.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Version tag; anything but "2.0" is rejected before dispatch.
    #[serde(default)]
    pub jsonrpc: String,
    /// Echoed back in the response; notifications carry none.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response envelope. Built only through [`JsonRpcResponse::success`] and
/// [`JsonRpcResponse::failure`], so exactly one of `result`/`error` is
/// ever populated.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<serde_json::Value>, code: i64, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

/// JSON-RPC error payload, with the standard codes as associated consts.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// A tool entry in the tools/list result. Names and descriptions are
/// compile-time constants; only the schema is built at runtime.
#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// A text block in a tools/call response.
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

/// Structured payload of every tool response: a human-readable message
/// plus, on match failures, parameter-keyed retry suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub message: String,
    #[serde(
        rename = "SuggestedParameterValues",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_parameter_values: Option<Vec<serde_json::Value>>,
}

/// MCP tools/call result. `content` mirrors `structuredContent` as JSON
/// text for clients that only read text blocks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<OperationOutcome>,
}

impl ToolCallResult {
    /// Render an outcome both ways: serialized into the text block and
    /// carried verbatim as structured content.
    pub fn from_outcome(outcome: OperationOutcome, is_error: bool) -> Self {
        let text = serde_json::to_string(&outcome).unwrap_or_else(|_| outcome.message.clone());
        Self {
            content: vec![ContentItem {
                content_type: "text",
                text,
            }],
            is_error,
            structured_content: Some(outcome),
        }
    }
}
