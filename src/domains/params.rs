// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::HandlerError;

const RESOLUTION_IDS: [u32; 4] = [10, 20, 30, 40];

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct NoParams {}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PageParams {
    /// Page number (default: 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Maximum records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Order by field, e.g. "created;desc".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindingIdParams {
    /// Finding UUID.
    pub finding_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResolveFindingParams {
    /// Finding UUID.
    pub finding_id: String,
    /// Resolution ID: 10=Valid, 20=False Positive, 30=No Action Needed, 40=Risk Accepted.
    pub resolution: u32,
    /// Optional resolution notes.
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Responder,
    Analyst,
    Manager,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssignOwnersParams {
    /// Finding UUID.
    pub finding_id: String,
    /// Type of owner.
    pub owner_type: OwnerType,
    /// User UUIDs to assign; an empty list clears the assignment.
    pub owners: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    /// Finding UUID.
    pub finding_id: String,
    /// Comment body (may contain HTML).
    pub body: String,
    /// UUID of the commenting user (see `users.list`).
    pub sender: String,
}

/// Resolve payload shared by org-level and MSP-level resolve tools.
pub(crate) fn resolve_body(
    tool: &str,
    resolution: u32,
    resolution_notes: Option<String>,
) -> Result<Value, HandlerError> {
    if !RESOLUTION_IDS.contains(&resolution) {
        return Err(HandlerError::invalid(
            tool,
            format!("resolution must be one of 10, 20, 30, 40 (got {resolution})"),
        ));
    }
    let mut body = json!({ "resolution": resolution });
    if let Some(notes) = resolution_notes.filter(|notes| !notes.trim().is_empty()) {
        body["resolution_notes"] = Value::String(notes);
    }
    Ok(body)
}

pub(crate) fn assign_body(owner_type: OwnerType, owners: Vec<String>) -> Value {
    json!({ "owner_type": owner_type, "owners": owners })
}

pub(crate) fn comment_body(tool: &str, body: String, sender: String) -> Result<Value, HandlerError> {
    if body.trim().is_empty() {
        return Err(HandlerError::invalid(tool, "body must not be empty"));
    }
    Ok(json!({ "body": body, "sender": sender }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_body_rejects_unknown_resolution_ids() {
        let err = resolve_body("findings.resolve", 15, None).unwrap_err();
        assert!(err.to_string().contains("got 15"));
    }

    #[test]
    fn resolve_body_drops_blank_notes() {
        let body = resolve_body("findings.resolve", 20, Some("  ".to_owned())).unwrap();
        assert_eq!(body, json!({ "resolution": 20 }));

        let body = resolve_body("findings.resolve", 40, Some("accepted".to_owned())).unwrap();
        assert_eq!(body, json!({ "resolution": 40, "resolution_notes": "accepted" }));
    }

    #[test]
    fn owner_type_serializes_lowercase() {
        let body = assign_body(OwnerType::Analyst, vec!["u-1".to_owned()]);
        assert_eq!(body, json!({ "owner_type": "analyst", "owners": ["u-1"] }));
    }
}
