//! Protocol-level integration tests.
//!
//! Exercises the JSON-RPC 2.0 types and the tool router the way an MCP
//! client would, without spawning a process.

use serde_json::json;

use anchor_edit::tools::ToolRouter;

#[test]
fn test_json_rpc_request_parsing() {
    let req_json = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "0.1.0"
            }
        }
    });

    let req: anchor_edit::server::JsonRpcRequest =
        serde_json::from_value(req_json).expect("should parse initialize request");

    assert_eq!(req.method, "initialize");
    assert_eq!(req.id, Some(json!(1)));
}

#[test]
fn test_json_rpc_response_serialization() {
    let resp = anchor_edit::server::JsonRpcResponse::success(
        json!(1),
        json!({"protocolVersion": "2025-06-18"}),
    );

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("2025-06-18"));
    assert!(!json_str.contains("error"));
}

#[test]
fn test_json_rpc_error_response() {
    let resp = anchor_edit::server::JsonRpcResponse::failure(
        Some(json!(2)),
        anchor_edit::server::JsonRpcError::METHOD_NOT_FOUND,
        "method not found".to_owned(),
    );

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("-32601"));
    assert!(json_str.contains("method not found"));
    assert!(!json_str.contains("result"));
}

#[test]
fn test_tool_definitions_complete() {
    let router = ToolRouter::new(std::path::PathBuf::from("/tmp"));

    let tools = router.list_tools();
    assert_eq!(tools.len(), 9);

    let names: Vec<&str> = tools.iter().map(|t| t.name).collect();
    for expected in [
        "replace_matching_text",
        "delete_matching_text",
        "insert_text",
        "move_text",
        "create_file",
        "overwrite_file_content",
        "append_text_to_file",
        "move_or_rename_file",
        "delete_file",
    ] {
        assert!(names.contains(&expected), "missing tool {expected}");
    }

    for tool in &tools {
        assert!(
            !tool.description.is_empty(),
            "tool {} missing description",
            tool.name
        );
        assert!(
            tool.input_schema.is_object(),
            "tool {} missing input_schema",
            tool.name
        );
    }
}

#[test]
fn test_tool_call_unknown() {
    let router = ToolRouter::new(std::path::PathBuf::from("/tmp"));

    let result = router
        .call_tool("nonexistent_tool", json!({}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("Unknown tool"));
}

#[test]
fn test_tool_call_missing_params_is_structured_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = ToolRouter::new(dir.path().to_path_buf());

    let result = router
        .call_tool("replace_matching_text", json!({ "filePath": "a.txt" }))
        .expect("should not error");

    assert!(result.is_error);
    let outcome = result.structured_content.expect("structured content");
    assert!(outcome.message.contains("invalid parameters"));
}

#[test]
fn test_tool_call_empty_required_string_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = ToolRouter::new(dir.path().to_path_buf());

    let result = router
        .call_tool(
            "delete_matching_text",
            json!({ "filePath": "a.txt", "searchText": "" }),
        )
        .expect("should not error");

    assert!(result.is_error);
    let outcome = result.structured_content.expect("structured content");
    assert!(outcome.message.contains("searchText"));
}

#[test]
fn test_tool_call_create_and_replace() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("notes.txt");
    let router = ToolRouter::new(dir.path().to_path_buf());

    let create = router
        .call_tool(
            "create_file",
            json!({
                "filePath": file_path.to_str().expect("path"),
                "fileContent": "hello world\n"
            }),
        )
        .expect("create should succeed");
    assert!(!create.is_error);

    let replace = router
        .call_tool(
            "replace_matching_text",
            json!({
                "filePath": file_path.to_str().expect("path"),
                "searchText": "hello world",
                "replacementText": "goodbye world"
            }),
        )
        .expect("replace should succeed");
    assert!(!replace.is_error, "{:?}", replace.content[0].text);

    let content = std::fs::read_to_string(&file_path).expect("read");
    assert_eq!(content, "goodbye world\n");
}

#[test]
fn test_tool_call_path_escape_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = ToolRouter::new(dir.path().to_path_buf());

    let result = router
        .call_tool(
            "delete_file",
            json!({ "filePath": "../../outside.txt" }),
        )
        .expect("should not error");

    assert!(result.is_error);
}

#[test]
fn test_truthy_boolean_accepts_textual_forms() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("multi.txt");
    std::fs::write(&file_path, "old old old").expect("write");
    let router = ToolRouter::new(dir.path().to_path_buf());

    let result = router
        .call_tool(
            "replace_matching_text",
            json!({
                "filePath": file_path.to_str().expect("path"),
                "searchText": "old",
                "replacementText": "new",
                "replaceAllOccurrencesOfSearchText": "true"
            }),
        )
        .expect("replace should succeed");

    assert!(!result.is_error, "{:?}", result.content[0].text);
    let content = std::fs::read_to_string(&file_path).expect("read");
    assert_eq!(content, "new new new");
}
