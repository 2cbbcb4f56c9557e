// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tool catalog: domain registry, handler cache and the visible-tool projection.
//!
//! At top level a session sees only `navigate` and `status`; inside a domain it sees that
//! domain's tools followed by `back`.

mod registry;

use serde_json::json;

use crate::model::{Domain, JsonObject, NavigationState, ToolDescriptor};

pub use registry::{DomainRegistry, HandlerCache, HandlerFactory};

pub const NAVIGATE_TOOL: &str = "navigate";
pub const BACK_TOOL: &str = "back";
pub const STATUS_TOOL: &str = "status";

/// Names handled by the router itself rather than by a domain.
pub const RESERVED_TOOLS: [&str; 3] = [NAVIGATE_TOOL, BACK_TOOL, STATUS_TOOL];

pub fn navigate_tool() -> ToolDescriptor {
    let mut description = format!(
        "Navigate to a domain to see its tools. Domains: {}.",
        Domain::names().join(", ")
    );
    for domain in Domain::ALL {
        description.push_str(&format!("\n- {}: {}", domain.as_str(), domain.summary()));
    }

    ToolDescriptor::new(
        NAVIGATE_TOOL,
        description,
        object_schema(json!({
            "type": "object",
            "properties": {
                "domain": {
                    "type": "string",
                    "enum": Domain::names(),
                    "description": "The domain to navigate to",
                },
            },
            "required": ["domain"],
        })),
    )
}

pub fn status_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        STATUS_TOOL,
        "Check Blumira API connection status and available domains.",
        empty_schema(),
    )
}

pub fn back_tool() -> ToolDescriptor {
    ToolDescriptor::new(BACK_TOOL, "Return to the domain navigation menu.", empty_schema())
}

/// Tools visible to a session in `state`. Pure apart from populating the handler cache.
pub fn visible_tools(state: &NavigationState, cache: &HandlerCache) -> Vec<ToolDescriptor> {
    match state.current_domain() {
        None => vec![navigate_tool(), status_tool()],
        Some(domain) => {
            let mut tools = cache.get_or_create(domain).tools();
            tools.push(back_tool());
            tools
        }
    }
}

fn empty_schema() -> JsonObject {
    object_schema(json!({ "type": "object", "properties": {} }))
}

fn object_schema(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}
