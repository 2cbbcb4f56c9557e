// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Domains partition the tool catalog; each session tracks which domain it is scoped to.

pub mod domain;
pub mod ids;
pub mod navigation;
pub mod tool;

pub use domain::{Domain, UnknownDomainError};
pub use ids::{Id, IdError, SessionId, DEFAULT_SESSION_ID};
pub use navigation::NavigationState;
pub use tool::{JsonObject, ToolDescriptor, ToolResult};
