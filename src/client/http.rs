// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, ApiMethod, ApiRequest, SecurityApi};
use crate::credentials::CredentialStore;

pub const DEFAULT_API_URL: &str = "https://api.blumira.com/public-api/v1";

const USER_AGENT: &str = concat!("blumira-mcp/", env!("CARGO_PKG_VERSION"));

/// Bearer-token JSON client. Credentials are read from the store on every call so
/// tokens supplied after startup take effect immediately.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl HttpApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url, credentials })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SecurityApi for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let credentials = self.credentials.get().ok_or(ApiError::MissingCredentials)?;
        let ApiRequest { method, path, query, body } = request;
        let url = self.url_for(&path);

        let mut builder = match method {
            ApiMethod::Get => self.http.get(&url),
            ApiMethod::Post => self.http.post(&url),
        };
        builder = builder.bearer_auth(credentials.jwt_token());
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        debug!(?method, %url, "sending API request");
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Transport { path: path.clone(), source })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { path: path.clone(), source })?;

        if !status.is_success() {
            return Err(ApiError::Status { path, status: status.as_u16(), body: text });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| ApiError::Decode { path, message: err.to_string() })
    }
}
