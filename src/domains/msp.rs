// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::params::{assign_body, comment_body, resolve_body, OwnerType, PageParams};
use super::{forward, parse_args, path_segment, unknown_tool, DomainHandler, HandlerError};
use crate::client::{ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

const ACCOUNTS_LIST: &str = "msp.accounts.list";
const ACCOUNTS_GET: &str = "msp.accounts.get";
const FINDINGS_ALL: &str = "msp.findings.all";
const FINDINGS_LIST: &str = "msp.findings.list";
const FINDINGS_GET: &str = "msp.findings.get";
const FINDINGS_RESOLVE: &str = "msp.findings.resolve";
const FINDINGS_ASSIGN: &str = "msp.findings.assign";
const FINDINGS_COMMENTS_LIST: &str = "msp.findings.comments.list";
const FINDINGS_COMMENTS_ADD: &str = "msp.findings.comments.add";
const DEVICES_LIST: &str = "msp.devices.list";
const DEVICES_GET: &str = "msp.devices.get";
const KEYS_LIST: &str = "msp.keys.list";
const KEYS_GET: &str = "msp.keys.get";
const USERS_LIST: &str = "msp.users.list";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountParams {
    /// Account UUID.
    pub account_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AccountPageParams {
    /// Account UUID.
    #[serde(skip_serializing)]
    pub account_id: String,
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct AllFindingsParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Maximum records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Filter by status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    /// Filter by priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Created after datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    /// Created before datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AccountFindingsParams {
    /// Account UUID.
    #[serde(skip_serializing)]
    pub account_id: String,
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Filter by status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    /// Filter by priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountFindingParams {
    /// Account UUID.
    pub account_id: String,
    /// Finding UUID.
    pub finding_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountResolveParams {
    /// Account UUID.
    pub account_id: String,
    /// Finding UUID.
    pub finding_id: String,
    /// Resolution ID (10, 20, 30, or 40).
    pub resolution: u32,
    /// Optional resolution notes.
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountAssignParams {
    /// Account UUID.
    pub account_id: String,
    /// Finding UUID.
    pub finding_id: String,
    /// Type of owner.
    pub owner_type: OwnerType,
    /// User UUIDs to assign.
    pub owners: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountCommentParams {
    /// Account UUID.
    pub account_id: String,
    /// Finding UUID.
    pub finding_id: String,
    /// Comment body (may contain HTML).
    pub body: String,
    /// UUID of the commenting user.
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountDeviceParams {
    /// Account UUID.
    pub account_id: String,
    /// Device UUID.
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountKeyParams {
    /// Account UUID.
    pub account_id: String,
    /// Key UUID.
    pub key_id: String,
}

/// Multi-account (MSP) management: sub-accounts and their findings, agents and users.
pub struct MspDomain {
    api: Arc<dyn SecurityApi>,
}

impl MspDomain {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }
}

fn account_path(tool: &str, account_id: &str, rest: &str) -> Result<String, HandlerError> {
    let account = path_segment(tool, "account_id", account_id)?;
    Ok(format!("/msp/accounts/{account}{rest}"))
}

fn finding_path(
    tool: &str,
    account_id: &str,
    finding_id: &str,
    rest: &str,
) -> Result<String, HandlerError> {
    let finding = path_segment(tool, "finding_id", finding_id)?;
    account_path(tool, account_id, &format!("/findings/{finding}{rest}"))
}

#[async_trait]
impl DomainHandler for MspDomain {
    fn domain(&self) -> Domain {
        Domain::Msp
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::for_params::<PageParams>(
                ACCOUNTS_LIST,
                "List MSP sub-accounts with names and open finding counts.",
            ),
            ToolDescriptor::for_params::<AccountParams>(
                ACCOUNTS_GET,
                "Get MSP account details including license, agent counts, and user count.",
            ),
            ToolDescriptor::for_params::<AllFindingsParams>(
                FINDINGS_ALL,
                "List findings across all MSP accounts.",
            ),
            ToolDescriptor::for_params::<AccountFindingsParams>(
                FINDINGS_LIST,
                "List findings for a specific MSP account.",
            ),
            ToolDescriptor::for_params::<AccountFindingParams>(
                FINDINGS_GET,
                "Get a specific finding from an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountResolveParams>(
                FINDINGS_RESOLVE,
                "Resolve a finding in an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountAssignParams>(
                FINDINGS_ASSIGN,
                "Assign owners to a finding in an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountFindingParams>(
                FINDINGS_COMMENTS_LIST,
                "List comments on a finding in an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountCommentParams>(
                FINDINGS_COMMENTS_ADD,
                "Add a comment to a finding in an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountPageParams>(
                DEVICES_LIST,
                "List agent devices for an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountDeviceParams>(
                DEVICES_GET,
                "Get an agent device from an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountPageParams>(
                KEYS_LIST,
                "List agent keys for an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountKeyParams>(
                KEYS_GET,
                "Get an agent key from an MSP account.",
            ),
            ToolDescriptor::for_params::<AccountPageParams>(
                USERS_LIST,
                "List users for an MSP account.",
            ),
        ]
    }

    async fn invoke(&self, tool: &str, args: JsonObject) -> Result<ToolResult, HandlerError> {
        let request = match tool {
            ACCOUNTS_LIST => {
                let params: PageParams = parse_args(tool, args)?;
                ApiRequest::get("/msp/accounts").with_query(&params)
            }
            ACCOUNTS_GET => {
                let params: AccountParams = parse_args(tool, args)?;
                ApiRequest::get(account_path(tool, &params.account_id, "")?)
            }
            FINDINGS_ALL => {
                let params: AllFindingsParams = parse_args(tool, args)?;
                ApiRequest::get("/msp/accounts/findings").with_query(&params)
            }
            FINDINGS_LIST => {
                let params: AccountFindingsParams = parse_args(tool, args)?;
                ApiRequest::get(account_path(tool, &params.account_id, "/findings")?)
                    .with_query(&params)
            }
            FINDINGS_GET | FINDINGS_COMMENTS_LIST => {
                let params: AccountFindingParams = parse_args(tool, args)?;
                let rest = if tool == FINDINGS_GET { "" } else { "/comments" };
                ApiRequest::get(finding_path(tool, &params.account_id, &params.finding_id, rest)?)
            }
            FINDINGS_RESOLVE => {
                let params: AccountResolveParams = parse_args(tool, args)?;
                let path = finding_path(tool, &params.account_id, &params.finding_id, "/resolve")?;
                ApiRequest::post(path, resolve_body(tool, params.resolution, params.resolution_notes)?)
            }
            FINDINGS_ASSIGN => {
                let params: AccountAssignParams = parse_args(tool, args)?;
                let path = finding_path(tool, &params.account_id, &params.finding_id, "/assign")?;
                ApiRequest::post(path, assign_body(params.owner_type, params.owners))
            }
            FINDINGS_COMMENTS_ADD => {
                let params: AccountCommentParams = parse_args(tool, args)?;
                let path =
                    finding_path(tool, &params.account_id, &params.finding_id, "/comments")?;
                ApiRequest::post(path, comment_body(tool, params.body, params.sender)?)
            }
            DEVICES_LIST | KEYS_LIST | USERS_LIST => {
                let params: AccountPageParams = parse_args(tool, args)?;
                let rest = match tool {
                    DEVICES_LIST => "/agents/devices",
                    KEYS_LIST => "/agents/keys",
                    _ => "/users",
                };
                ApiRequest::get(account_path(tool, &params.account_id, rest)?).with_query(&params)
            }
            DEVICES_GET => {
                let params: AccountDeviceParams = parse_args(tool, args)?;
                let device = path_segment(tool, "device_id", &params.device_id)?;
                ApiRequest::get(account_path(
                    tool,
                    &params.account_id,
                    &format!("/agents/devices/{device}"),
                )?)
            }
            KEYS_GET => {
                let params: AccountKeyParams = parse_args(tool, args)?;
                let key = path_segment(tool, "key_id", &params.key_id)?;
                ApiRequest::get(account_path(
                    tool,
                    &params.account_id,
                    &format!("/agents/keys/{key}"),
                )?)
            }
            _ => return Ok(unknown_tool(tool)),
        };

        forward(self.api.as_ref(), tool, request).await
    }
}
