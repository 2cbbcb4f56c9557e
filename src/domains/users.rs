// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;

use super::params::PageParams;
use super::{forward, parse_args, unknown_tool, DomainHandler, HandlerError};
use crate::client::{ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

const LIST: &str = "users.list";

pub struct UsersDomain {
    api: Arc<dyn SecurityApi>,
}

impl UsersDomain {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DomainHandler for UsersDomain {
    fn domain(&self) -> Domain {
        Domain::Users
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![ToolDescriptor::for_params::<PageParams>(
            LIST,
            "List users in the organization. Returns user IDs, emails, names, and roles.",
        )]
    }

    async fn invoke(&self, tool: &str, args: JsonObject) -> Result<ToolResult, HandlerError> {
        if tool != LIST {
            return Ok(unknown_tool(tool));
        }
        let params: PageParams = parse_args(tool, args)?;
        forward(self.api.as_ref(), tool, ApiRequest::get("/org/users").with_query(&params)).await
    }
}
