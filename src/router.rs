// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request routing: navigation commands, status queries and domain-scoped calls.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::catalog::{
    visible_tools, DomainRegistry, HandlerCache, BACK_TOOL, NAVIGATE_TOOL, STATUS_TOOL,
};
use crate::credentials::{CredentialPrompt, CredentialStore};
use crate::model::{Domain, JsonObject, NavigationState, SessionId, ToolDescriptor, ToolResult};

const CREDENTIALS_REQUIRED: &str =
    "Blumira JWT token is required. Set the BLUMIRA_JWT_TOKEN environment variable.";

/// Result of routing one call, plus whether the session's visible catalog changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub result: ToolResult,
    pub catalog_changed: bool,
}

impl Dispatch {
    fn unchanged(result: ToolResult) -> Self {
        Self { result, catalog_changed: false }
    }

    fn changed(result: ToolResult) -> Self {
        Self { result, catalog_changed: true }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    connected: bool,
    domains: Vec<&'static str>,
    current_domain: Option<Domain>,
}

/// Owns the session states and handler cache and routes every tool call.
#[derive(Debug)]
pub struct Navigator {
    sessions: crate::session::SessionStates,
    handlers: HandlerCache,
    credentials: Arc<CredentialStore>,
}

impl Navigator {
    pub fn new(registry: DomainRegistry, credentials: Arc<CredentialStore>) -> Self {
        Self {
            sessions: crate::session::SessionStates::new(),
            handlers: HandlerCache::new(registry),
            credentials,
        }
    }

    pub fn sessions(&self) -> &crate::session::SessionStates {
        &self.sessions
    }

    pub fn handlers(&self) -> &HandlerCache {
        &self.handlers
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn state(&self, session_id: &SessionId) -> NavigationState {
        self.sessions.get(session_id)
    }

    /// Forgets sessions idle for longer than `ttl`.
    pub fn prune_idle_sessions(&self, ttl: Duration) -> usize {
        let removed = self.sessions.prune_idle(ttl);
        if removed > 0 {
            debug!(removed, remaining = self.sessions.len(), "pruned idle sessions");
        }
        removed
    }

    pub fn list_visible_tools(&self, session_id: &SessionId) -> Vec<ToolDescriptor> {
        visible_tools(&self.sessions.get(session_id), &self.handlers)
    }

    /// Routes `tool`. Never fails: every problem is reported as an error result.
    pub async fn invoke(
        &self,
        session_id: &SessionId,
        tool: &str,
        args: JsonObject,
        prompt: &dyn CredentialPrompt,
    ) -> Dispatch {
        match tool {
            NAVIGATE_TOOL => self.navigate(session_id, &args, prompt).await,
            BACK_TOOL => self.back(session_id).await,
            STATUS_TOOL => Dispatch::unchanged(self.status(session_id).await),
            _ => Dispatch::unchanged(self.call_domain_tool(session_id, tool, args).await),
        }
    }

    async fn navigate(
        &self,
        session_id: &SessionId,
        args: &JsonObject,
        prompt: &dyn CredentialPrompt,
    ) -> Dispatch {
        let requested = match args.get("domain") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => "<missing>".to_owned(),
        };
        let Ok(domain) = requested.parse::<Domain>() else {
            return Dispatch::unchanged(ToolResult::error(format!(
                "Invalid domain: {requested}. Valid: {}",
                Domain::names().join(", ")
            )));
        };

        let _turn = self.sessions.begin_turn(session_id).await;

        if !self.credentials.has_credentials() {
            warn!(session = %session_id, %domain, "missing credentials; requesting them from the host");
            match prompt.elicit().await {
                Some(credentials) => self.credentials.set(credentials),
                None => {
                    warn!(session = %session_id, "credentials were not provided");
                    return Dispatch::unchanged(ToolResult::error(CREDENTIALS_REQUIRED));
                }
            }
        }

        let handler = self.handlers.get_or_create(domain);
        self.sessions.set(session_id, domain);
        info!(session = %session_id, %domain, "navigated");

        let tools = handler.tools();
        let names = tools.iter().map(ToolDescriptor::name).collect::<Vec<_>>();
        Dispatch::changed(ToolResult::text(format!(
            "Navigated to {domain}. Available tools: {}",
            names.join(", ")
        )))
    }

    async fn back(&self, session_id: &SessionId) -> Dispatch {
        let _turn = self.sessions.begin_turn(session_id).await;
        self.sessions.clear(session_id);
        info!(session = %session_id, "returned to domain navigation");
        Dispatch::changed(ToolResult::text("Returned to domain navigation."))
    }

    async fn status(&self, session_id: &SessionId) -> ToolResult {
        let state = self.settled_state(session_id).await;
        ToolResult::json(&StatusReport {
            connected: self.credentials.has_credentials(),
            domains: Domain::names(),
            current_domain: state.current_domain(),
        })
    }

    async fn call_domain_tool(&self, session_id: &SessionId, tool: &str, args: JsonObject) -> ToolResult {
        let state = self.settled_state(session_id).await;
        let Some(domain) = state.current_domain() else {
            return ToolResult::error(format!(
                "Unknown tool: {tool}. Use {NAVIGATE_TOOL} first to select a domain."
            ));
        };

        let handler = self.handlers.get_or_create(domain);
        match AssertUnwindSafe(handler.invoke(tool, args)).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                error!(session = %session_id, %domain, tool, error = %err, "tool call failed");
                ToolResult::error(format!("Error: {err}"))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(session = %session_id, %domain, tool, %message, "tool call panicked");
                ToolResult::error(format!("Error: {tool} failed unexpectedly: {message}"))
            }
        }
    }

    /// Reads the state after any in-flight transition of the same session has finished.
    async fn settled_state(&self, session_id: &SessionId) -> NavigationState {
        let _turn = self.sessions.begin_turn(session_id).await;
        self.sessions.get(session_id)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
