// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use rstest::rstest;

use super::*;
use crate::catalog::{navigate_tool, status_tool};
use crate::config::Transport;
use crate::domains::testing::RecordingApi;
use crate::model::DEFAULT_SESSION_ID;

fn parts_with(header: Option<&str>) -> Parts {
    let mut builder = axum::http::Request::builder().uri("/mcp");
    if let Some(value) = header {
        builder = builder.header(SESSION_HEADER, value);
    }
    builder.body(()).expect("request").into_parts().0
}

fn text_of(result: &CallToolResult) -> String {
    result.content[0].as_text().expect("text content").text.clone()
}

#[test]
fn server_advertises_dynamic_tool_lists() {
    let navigator = Navigator::new(
        DomainRegistry::new(RecordingApi::shared()),
        Arc::new(CredentialStore::default()),
    );
    let info = BlumiraMcp::new(Arc::new(navigator)).get_info();

    let tools = info.capabilities.tools.expect("tools capability");
    assert_eq!(tools.list_changed, Some(true));
    assert!(info.instructions.expect("instructions").contains("navigate"));
}

#[test]
fn session_header_selects_the_session() {
    let parts = parts_with(Some("abc-123"));
    assert_eq!(session_id_from_parts(Some(&parts)).as_str(), "abc-123");
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn missing_or_empty_header_maps_to_the_default_session(#[case] header: Option<&str>) {
    let parts = parts_with(header);
    assert_eq!(session_id_from_parts(Some(&parts)).as_str(), DEFAULT_SESSION_ID);
    assert!(session_id_from_parts(None).is_default());
}

#[test]
fn descriptors_convert_to_protocol_tools() {
    let descriptor = navigate_tool();
    let tool = to_rmcp_tool(&descriptor);

    assert_eq!(tool.name, "navigate");
    assert_eq!(tool.description.as_deref(), Some(descriptor.description()));
    assert_eq!(tool.input_schema.as_ref(), descriptor.input_schema().as_ref());

    let status = to_rmcp_tool(&status_tool());
    assert_eq!(status.input_schema["type"], "object");
}

#[test]
fn tool_results_map_onto_the_error_flag() {
    let ok = to_call_result(ToolResult::text("fine"));
    assert_eq!(ok.is_error, Some(false));
    assert_eq!(text_of(&ok), "fine");

    let failed = to_call_result(ToolResult::error("Unknown tool: x"));
    assert_eq!(failed.is_error, Some(true));
    assert_eq!(text_of(&failed), "Unknown tool: x");
}

#[test]
fn from_config_seeds_the_credential_store() {
    let config = Config {
        credentials: Credentials::new("jwt"),
        api_url: "http://127.0.0.1:9/v1".to_owned(),
        timeout: Duration::from_secs(1),
        transport: Transport::Stdio,
        session_idle_ttl: None,
        verbosity: 0,
    };
    let server = BlumiraMcp::from_config(&config).expect("server");
    assert!(server.navigator().credentials().has_credentials());

    let anonymous = BlumiraMcp::from_config(&Config { credentials: None, ..config }).expect("server");
    assert!(!anonymous.navigator().credentials().has_credentials());
}
