// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::domain::Domain;

/// Which domain a session is currently scoped to, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_domain: Option<Domain>,
}

impl NavigationState {
    pub fn current_domain(&self) -> Option<Domain> {
        self.current_domain
    }

    pub fn is_top_level(&self) -> bool {
        self.current_domain.is_none()
    }

    pub fn enter(&mut self, domain: Domain) {
        self.current_domain = Some(domain);
    }

    pub fn leave(&mut self) {
        self.current_domain = None;
    }
}
