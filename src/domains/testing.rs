// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{ApiError, ApiRequest, SecurityApi};
use crate::model::JsonObject;

/// Fake API that records every request and answers with a canned value.
#[derive(Debug, Default)]
pub(crate) struct RecordingApi {
    requests: Mutex<Vec<ApiRequest>>,
    fail_with_status: Option<u16>,
}

impl RecordingApi {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self { requests: Mutex::new(Vec::new()), fail_with_status: Some(status) })
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub(crate) fn last(&self) -> ApiRequest {
        self.requests().pop().expect("at least one request")
    }
}

#[async_trait]
impl SecurityApi for RecordingApi {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let path = request.path.clone();
        self.requests.lock().expect("requests lock").push(request);
        match self.fail_with_status {
            Some(status) => Err(ApiError::Status { path, status, body: "boom".to_owned() }),
            None => Ok(json!({ "status": "OK", "path": path })),
        }
    }
}

pub(crate) fn new_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
}

pub(crate) fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object arguments, got {other}"),
    }
}
