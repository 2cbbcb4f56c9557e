// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Domain handlers: one per [`Domain`], each declaring a static tool list and
//! forwarding every tool to a single remote API call.

mod agents;
mod findings;
mod msp;
mod params;
mod resolutions;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::client::{ApiError, ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

pub use agents::AgentsDomain;
pub use findings::FindingsDomain;
pub use msp::MspDomain;
pub use params::OwnerType;
pub use resolutions::ResolutionsDomain;
pub use users::UsersDomain;

/// Capability set shared by every domain.
///
/// Handlers hold no per-session state; one instance serves all sessions.
#[async_trait]
pub trait DomainHandler: Send + Sync {
    fn domain(&self) -> Domain;

    fn tools(&self) -> Vec<ToolDescriptor>;

    /// Runs `tool`. Unknown tool names come back as an error result; argument and API
    /// failures come back as `Err` for the caller to report.
    async fn invoke(&self, tool: &str, args: JsonObject) -> Result<ToolResult, HandlerError>;
}

impl fmt::Debug for dyn DomainHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainHandler").field("domain", &self.domain()).finish()
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl HandlerError {
    pub(crate) fn invalid(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments { tool: tool.to_owned(), message: message.into() }
    }
}

/// Constructs the handler for `domain`.
pub fn build_handler(domain: Domain, api: Arc<dyn SecurityApi>) -> Arc<dyn DomainHandler> {
    match domain {
        Domain::Findings => Arc::new(FindingsDomain::new(api)),
        Domain::Agents => Arc::new(AgentsDomain::new(api)),
        Domain::Users => Arc::new(UsersDomain::new(api)),
        Domain::Msp => Arc::new(MspDomain::new(api)),
        Domain::Resolutions => Arc::new(ResolutionsDomain::new(api)),
    }
}

pub(crate) fn parse_args<P: DeserializeOwned>(
    tool: &str,
    args: JsonObject,
) -> Result<P, HandlerError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|err| HandlerError::invalid(tool, err.to_string()))
}

/// Validates an id before it is spliced into a request path.
pub(crate) fn path_segment<'a>(
    tool: &str,
    field: &str,
    value: &'a str,
) -> Result<&'a str, HandlerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HandlerError::invalid(tool, format!("{field} must not be empty")));
    }
    if matches!(value, "." | "..")
        || value.chars().any(|ch| matches!(ch, '/' | '?' | '#' | '%') || ch.is_whitespace())
    {
        return Err(HandlerError::invalid(tool, format!("{field} is not a valid id: {value:?}")));
    }
    Ok(value)
}

pub(crate) fn unknown_tool(tool: &str) -> ToolResult {
    ToolResult::error(format!("Unknown tool: {tool}"))
}

pub(crate) async fn forward(
    api: &dyn SecurityApi,
    tool: &str,
    request: ApiRequest,
) -> Result<ToolResult, HandlerError> {
    info!(tool, path = %request.path, "API call");
    let response = api.send(request).await?;
    Ok(ToolResult::json(&response))
}
