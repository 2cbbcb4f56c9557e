// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::params::PageParams;
use super::{forward, parse_args, path_segment, unknown_tool, DomainHandler, HandlerError};
use crate::client::{ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

const DEVICES_LIST: &str = "agents.devices.list";
const DEVICES_GET: &str = "agents.devices.get";
const KEYS_LIST: &str = "agents.keys.list";
const KEYS_GET: &str = "agents.keys.get";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeviceIdParams {
    /// Device UUID.
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KeyIdParams {
    /// Key UUID.
    pub key_id: String,
}

pub struct AgentsDomain {
    api: Arc<dyn SecurityApi>,
}

impl AgentsDomain {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DomainHandler for AgentsDomain {
    fn domain(&self) -> Domain {
        Domain::Agents
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::for_params::<PageParams>(
                DEVICES_LIST,
                "List agent devices in the organization.",
            ),
            ToolDescriptor::for_params::<DeviceIdParams>(DEVICES_GET, "Get an agent device by ID."),
            ToolDescriptor::for_params::<PageParams>(KEYS_LIST, "List agent keys in the organization."),
            ToolDescriptor::for_params::<KeyIdParams>(KEYS_GET, "Get an agent key by ID."),
        ]
    }

    async fn invoke(&self, tool: &str, args: JsonObject) -> Result<ToolResult, HandlerError> {
        let request = match tool {
            DEVICES_LIST => {
                let params: PageParams = parse_args(tool, args)?;
                ApiRequest::get("/org/agents/devices").with_query(&params)
            }
            DEVICES_GET => {
                let params: DeviceIdParams = parse_args(tool, args)?;
                let id = path_segment(tool, "device_id", &params.device_id)?;
                ApiRequest::get(format!("/org/agents/devices/{id}"))
            }
            KEYS_LIST => {
                let params: PageParams = parse_args(tool, args)?;
                ApiRequest::get("/org/agents/keys").with_query(&params)
            }
            KEYS_GET => {
                let params: KeyIdParams = parse_args(tool, args)?;
                let id = path_segment(tool, "key_id", &params.key_id)?;
                ApiRequest::get(format!("/org/agents/keys/{id}"))
            }
            _ => return Ok(unknown_tool(tool)),
        };

        forward(self.api.as_ref(), tool, request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{args, new_runtime, RecordingApi};
    use super::*;

    #[test]
    fn device_lookup_uses_device_path() {
        let api = RecordingApi::shared();
        let domain = AgentsDomain::new(api.clone());

        new_runtime()
            .block_on(domain.invoke(DEVICES_GET, args(json!({ "device_id": "dev-7" }))))
            .expect("invoke");

        assert_eq!(api.last().path, "/org/agents/devices/dev-7");
    }

    #[test]
    fn key_listing_passes_pagination() {
        let api = RecordingApi::shared();
        let domain = AgentsDomain::new(api.clone());

        new_runtime()
            .block_on(domain.invoke(KEYS_LIST, args(json!({ "page_size": 50 }))))
            .expect("invoke");

        let request = api.last();
        assert_eq!(request.path, "/org/agents/keys");
        assert_eq!(request.query, vec![("page_size".to_owned(), "50".to_owned())]);
    }

    #[test]
    fn api_failures_propagate_to_the_caller() {
        let api = RecordingApi::failing(503);
        let domain = AgentsDomain::new(api);

        let err = new_runtime()
            .block_on(domain.invoke(DEVICES_LIST, JsonObject::new()))
            .expect_err("api failure");

        assert!(err.to_string().contains("HTTP 503"));
    }
}
