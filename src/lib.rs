// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Blumira MCP: a navigable tool catalog over the Blumira security-operations API.
//!
//! Each MCP session starts at a top-level menu (`navigate`, `status`). Navigating into a
//! domain swaps the visible catalog for that domain's tools plus `back`.

pub mod catalog;
pub mod client;
pub mod config;
pub mod credentials;
pub mod domains;
pub mod mcp;
pub mod model;
pub mod router;
pub mod session;
