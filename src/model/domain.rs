// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named partition of the tool catalog. The set is closed and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Findings,
    Agents,
    Users,
    Msp,
    Resolutions,
}

impl Domain {
    pub const ALL: [Domain; 5] =
        [Domain::Findings, Domain::Agents, Domain::Users, Domain::Msp, Domain::Resolutions];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Findings => "findings",
            Self::Agents => "agents",
            Self::Users => "users",
            Self::Msp => "msp",
            Self::Resolutions => "resolutions",
        }
    }

    /// One-line summary used in the `navigate` help text.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Findings => "list/search, get, get details, resolve, assign owners, comments",
            Self::Agents => "list devices, get device, list keys, get key",
            Self::Users => "list organization users",
            Self::Msp => {
                "MSP multi-account management: accounts, per-account findings/agents/users"
            }
            Self::Resolutions => "list available resolution options",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|domain| domain.as_str()).collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = UnknownDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| UnknownDomainError { requested: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown domain '{requested}' (valid: {})", Domain::names().join(", "))]
pub struct UnknownDomainError {
    pub requested: String,
}
