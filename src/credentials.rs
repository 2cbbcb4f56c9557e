// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! API credentials and the interactive prompt used to obtain them.

use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    jwt_token: String,
}

impl Credentials {
    /// Returns `None` for blank tokens.
    pub fn new(jwt_token: impl Into<String>) -> Option<Self> {
        let jwt_token = jwt_token.into().trim().to_owned();
        (!jwt_token.is_empty()).then_some(Self { jwt_token })
    }

    pub fn jwt_token(&self) -> &str {
        &self.jwt_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("jwt_token", &"<redacted>").finish()
    }
}

/// Process-wide credential slot shared by the router and the HTTP client.
#[derive(Debug, Default)]
pub struct CredentialStore {
    current: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    pub fn new(initial: Option<Credentials>) -> Self {
        Self { current: RwLock::new(initial) }
    }

    pub fn has_credentials(&self) -> bool {
        self.get().is_some()
    }

    pub fn get(&self) -> Option<Credentials> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, credentials: Credentials) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(credentials),
            Err(poisoned) => *poisoned.into_inner() = Some(credentials),
        }
    }
}

/// Interactive credential elicitation offered by the host.
///
/// Implementations fail soft: declines, cancellations and hosts without elicitation
/// support all return `None`.
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    async fn elicit(&self) -> Option<Credentials>;
}

/// Prompt for contexts where no interactive host is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

#[async_trait]
impl CredentialPrompt for NoPrompt {
    async fn elicit(&self) -> Option<Credentials> {
        None
    }
}
