// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{Peer, RequestContext};
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::DomainRegistry;
use crate::client::HttpApiClient;
use crate::config::Config;
use crate::credentials::{CredentialPrompt, CredentialStore, Credentials};
use crate::model::{SessionId, ToolDescriptor, ToolResult};
use crate::router::Navigator;

/// Header carrying the transport-level session id on streamable HTTP.
pub const SESSION_HEADER: &str = "mcp-session-id";

const INSTRUCTIONS: &str = "Blumira security operations server. Tools are grouped into domains \
(findings, agents, users, msp, resolutions). Call `navigate` with a domain to load its tools, \
`back` to return to the domain menu, and `status` to check the API connection. The tool list \
changes after every navigate/back.";

const CREDENTIAL_REQUEST: &str =
    "Blumira API credentials are required. Paste a JWT token from the Blumira Public API settings.";

#[derive(Debug, Clone)]
pub struct BlumiraMcp {
    navigator: Arc<Navigator>,
}

impl BlumiraMcp {
    pub fn new(navigator: Arc<Navigator>) -> Self {
        Self { navigator }
    }

    /// Wires the HTTP API client, credential store and domain registry from `config`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let credentials = Arc::new(CredentialStore::new(config.credentials.clone()));
        let api = HttpApiClient::new(config.api_url.clone(), config.timeout, credentials.clone())?;
        let registry = DomainRegistry::new(Arc::new(api));
        Ok(Self::new(Arc::new(Navigator::new(registry, credentials))))
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }
}

impl ServerHandler for BlumiraMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        let session_id = session_id_from_parts(context.extensions.get::<Parts>());
        let tools = self.navigator.list_visible_tools(&session_id);
        debug!(session = %session_id, count = tools.len(), "listing tools");
        std::future::ready(Ok(ListToolsResult::with_all_items(
            tools.iter().map(to_rmcp_tool).collect(),
        )))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let session_id = session_id_from_parts(context.extensions.get::<Parts>());
            let prompt = PeerPrompt { peer: context.peer.clone() };
            let args = request.arguments.unwrap_or_default();

            let dispatch = self.navigator.invoke(&session_id, &request.name, args, &prompt).await;

            if dispatch.catalog_changed {
                if let Err(err) = context.peer.notify_tool_list_changed().await {
                    warn!(session = %session_id, error = %err, "failed to send tool list change");
                }
            }
            Ok(to_call_result(dispatch.result))
        }
    }
}

/// Session id for a request: the HTTP session header when present and valid, else the
/// default session.
pub(crate) fn session_id_from_parts(parts: Option<&Parts>) -> SessionId {
    let header = parts
        .and_then(|parts| parts.headers.get(SESSION_HEADER))
        .and_then(|value| value.to_str().ok());
    SessionId::from_host(header)
}

pub(crate) fn to_rmcp_tool(tool: &ToolDescriptor) -> Tool {
    Tool::new(tool.name().to_owned(), tool.description().to_owned(), tool.input_schema().clone())
}

pub(crate) fn to_call_result(result: ToolResult) -> CallToolResult {
    match result {
        ToolResult::Success(text) => CallToolResult::success(vec![Content::text(text)]),
        ToolResult::Error(text) => CallToolResult::error(vec![Content::text(text)]),
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CredentialForm {
    /// Blumira API JWT token.
    jwt_token: String,
}

rmcp::elicit_safe!(CredentialForm);

/// Asks the connected host for credentials through MCP elicitation.
struct PeerPrompt {
    peer: Peer<RoleServer>,
}

#[async_trait]
impl CredentialPrompt for PeerPrompt {
    async fn elicit(&self) -> Option<Credentials> {
        match self.peer.elicit::<CredentialForm>(CREDENTIAL_REQUEST).await {
            Ok(Some(form)) => Credentials::new(form.jwt_token),
            Ok(None) => {
                debug!("host returned no credentials");
                None
            }
            Err(err) => {
                warn!(error = %err, "credential elicitation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
