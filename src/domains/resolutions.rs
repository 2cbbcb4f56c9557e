// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;

use super::params::NoParams;
use super::{forward, unknown_tool, DomainHandler, HandlerError};
use crate::client::{ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

const LIST: &str = "resolutions.list";

pub struct ResolutionsDomain {
    api: Arc<dyn SecurityApi>,
}

impl ResolutionsDomain {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DomainHandler for ResolutionsDomain {
    fn domain(&self) -> Domain {
        Domain::Resolutions
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![ToolDescriptor::for_params::<NoParams>(
            LIST,
            "List available resolution options for findings (e.g., 10=Valid, 20=False Positive, 30=No Action Needed, 40=Risk Accepted).",
        )]
    }

    // Arguments are ignored; the listing takes none.
    async fn invoke(&self, tool: &str, _args: JsonObject) -> Result<ToolResult, HandlerError> {
        if tool != LIST {
            return Ok(unknown_tool(tool));
        }
        forward(self.api.as_ref(), tool, ApiRequest::get("/org/resolutions")).await
    }
}
