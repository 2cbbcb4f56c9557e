// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote API access.
//!
//! Domain handlers describe calls as [`ApiRequest`] values and hand them to a
//! [`SecurityApi`]; the production implementation is [`HttpApiClient`].

mod http;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use http::{HttpApiClient, DEFAULT_API_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: ApiMethod::Get, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: ApiMethod::Post, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    /// Appends every non-null scalar field of `params` as a query pair.
    pub fn with_query<P: Serialize>(mut self, params: &P) -> Self {
        if let Ok(Value::Object(fields)) = serde_json::to_value(params) {
            for (key, value) in fields {
                let rendered = match value {
                    Value::Null | Value::Array(_) | Value::Object(_) => continue,
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                self.query.push((key, rendered));
            }
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "No Blumira credentials configured. Set the BLUMIRA_JWT_TOKEN environment variable."
    )]
    MissingCredentials,
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}: {body}")]
    Status { path: String, status: u16, body: String },
    #[error("{path} returned an unreadable body: {message}")]
    Decode { path: String, message: String },
}

/// The remote security-operations API.
#[async_trait]
pub trait SecurityApi: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Filters {
        page: Option<u32>,
        status: Option<u32>,
        #[serde(rename = "name.contains")]
        name_contains: Option<String>,
        blocked: Option<bool>,
    }

    #[test]
    fn query_skips_absent_fields_and_keeps_wire_names() {
        let request = ApiRequest::get("/org/findings").with_query(&Filters {
            page: Some(2),
            status: None,
            name_contains: Some("phish".to_owned()),
            blocked: Some(false),
        });

        let mut query = request.query.clone();
        query.sort();
        assert_eq!(
            query,
            vec![
                ("blocked".to_owned(), "false".to_owned()),
                ("name.contains".to_owned(), "phish".to_owned()),
                ("page".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[test]
    fn missing_credentials_message_names_the_variable() {
        assert!(ApiError::MissingCredentials.to_string().contains("BLUMIRA_JWT_TOKEN"));
    }
}
