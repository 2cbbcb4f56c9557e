// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

pub type JsonObject = serde_json::Map<String, Value>;

/// A named, schema-described operation offered to the calling agent.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        input_schema: JsonObject,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Arc::new(input_schema),
        }
    }

    /// Builds a descriptor whose input schema is derived from the argument struct `P`.
    pub fn for_params<P: JsonSchema>(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(name, description, params_schema::<P>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    pub fn required_params(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|required| required.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

fn params_schema<P: JsonSchema>() -> JsonObject {
    let mut object = match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(object)) => object,
        _ => JsonObject::new(),
    };
    object.remove("$schema");
    object.remove("title");
    object.entry("type").or_insert_with(|| Value::String("object".to_owned()));
    object.entry("properties").or_insert_with(|| Value::Object(JsonObject::new()));
    object
}

/// Outcome of a tool invocation. Failures are values, never faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Success(String),
    Error(String),
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Pretty-printed JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self::Success(text),
            Err(err) => Self::Error(format!("failed to serialize response: {err}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}
