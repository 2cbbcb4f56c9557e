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

use super::params::{
    assign_body, comment_body, resolve_body, AddCommentParams, AssignOwnersParams,
    FindingIdParams, PageParams, ResolveFindingParams,
};
use super::{forward, parse_args, path_segment, unknown_tool, DomainHandler, HandlerError};
use crate::client::{ApiRequest, SecurityApi};
use crate::model::{Domain, JsonObject, ToolDescriptor, ToolResult};

const LIST: &str = "findings.list";
const GET: &str = "findings.get";
const DETAILS: &str = "findings.details";
const RESOLVE: &str = "findings.resolve";
const ASSIGN: &str = "findings.assign";
const COMMENTS_LIST: &str = "findings.comments.list";
const COMMENTS_ADD: &str = "findings.comments.add";

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListFindingsParams {
    #[serde(flatten)]
    pub page: PageParams,
    /// Filter by status code (e.g. 10=Open, 40=Resolved).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    /// Filter by priority (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Filter by category ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<u32>,
    /// Filter by exact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Filter by name substring.
    #[serde(rename = "name.contains", default, skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    /// Filter by name regex.
    #[serde(rename = "name.regex", default, skip_serializing_if = "Option::is_none")]
    pub name_regex: Option<String>,
    /// Created after datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    /// Created before datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    /// Modified after datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<String>,
    /// Modified before datetime (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_before: Option<String>,
    /// Filter by blocked status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

/// Organization findings: search, inspect, resolve, assign and comment.
pub struct FindingsDomain {
    api: Arc<dyn SecurityApi>,
}

impl FindingsDomain {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DomainHandler for FindingsDomain {
    fn domain(&self) -> Domain {
        Domain::Findings
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::for_params::<ListFindingsParams>(
                LIST,
                "List findings with optional filtering by status, priority, category, date ranges, and name patterns.",
            ),
            ToolDescriptor::for_params::<FindingIdParams>(GET, "Get a finding by ID."),
            ToolDescriptor::for_params::<FindingIdParams>(
                DETAILS,
                "Get detailed finding info including owners, resolution, category, summary, and UI URL.",
            ),
            ToolDescriptor::for_params::<ResolveFindingParams>(
                RESOLVE,
                "Resolve a finding. Resolution IDs: 10=Valid, 20=False Positive, 30=No Action Needed, 40=Risk Accepted.",
            ),
            ToolDescriptor::for_params::<AssignOwnersParams>(
                ASSIGN,
                "Assign owners to a finding. Owner types: responder, analyst, manager. Empty owners array clears assignments.",
            ),
            ToolDescriptor::for_params::<FindingIdParams>(
                COMMENTS_LIST,
                "List comments on a finding.",
            ),
            ToolDescriptor::for_params::<AddCommentParams>(
                COMMENTS_ADD,
                "Add a comment to a finding. Body may contain HTML.",
            ),
        ]
    }

    async fn invoke(&self, tool: &str, args: JsonObject) -> Result<ToolResult, HandlerError> {
        let request = match tool {
            LIST => {
                let params: ListFindingsParams = parse_args(tool, args)?;
                ApiRequest::get("/org/findings").with_query(&params)
            }
            GET | DETAILS | COMMENTS_LIST => {
                let params: FindingIdParams = parse_args(tool, args)?;
                let id = path_segment(tool, "finding_id", &params.finding_id)?;
                let path = match tool {
                    GET => format!("/org/findings/{id}"),
                    DETAILS => format!("/org/findings/{id}/details"),
                    _ => format!("/org/findings/{id}/comments"),
                };
                ApiRequest::get(path)
            }
            RESOLVE => {
                let params: ResolveFindingParams = parse_args(tool, args)?;
                let id = path_segment(tool, "finding_id", &params.finding_id)?;
                let body = resolve_body(tool, params.resolution, params.resolution_notes)?;
                ApiRequest::post(format!("/org/findings/{id}/resolve"), body)
            }
            ASSIGN => {
                let params: AssignOwnersParams = parse_args(tool, args)?;
                let id = path_segment(tool, "finding_id", &params.finding_id)?;
                ApiRequest::post(
                    format!("/org/findings/{id}/assign"),
                    assign_body(params.owner_type, params.owners),
                )
            }
            COMMENTS_ADD => {
                let params: AddCommentParams = parse_args(tool, args)?;
                let id = path_segment(tool, "finding_id", &params.finding_id)?;
                let body = comment_body(tool, params.body, params.sender)?;
                ApiRequest::post(format!("/org/findings/{id}/comments"), body)
            }
            _ => return Ok(unknown_tool(tool)),
        };

        forward(self.api.as_ref(), tool, request).await
    }
}
