// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Tool listing and dispatch are resolved per request from the caller's session, so the
//! catalog a host sees follows its navigation.

mod server;

pub use server::{BlumiraMcp, SESSION_HEADER};
