// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

const MAX_ID_LEN: usize = 256;

/// An opaque identifier supplied by the host.
///
/// Only a light shape check is applied (non-empty, bounded, printable); the value is
/// otherwise treated as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self { value, _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not exceed {MAX_ID_LEN} bytes")]
    TooLong,
    #[error("id must not contain control characters")]
    ControlCharacter,
}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Empty);
    }
    if value.len() > MAX_ID_LEN {
        return Err(IdError::TooLong);
    }
    if value.chars().any(char::is_control) {
        return Err(IdError::ControlCharacter);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionIdTag {}
pub type SessionId = Id<SessionIdTag>;

/// Session used when the host does not identify one (stdio transport, missing header).
pub const DEFAULT_SESSION_ID: &str = "default";

impl Id<SessionIdTag> {
    pub fn default_session() -> Self {
        Self { value: DEFAULT_SESSION_ID.to_owned(), _marker: PhantomData }
    }

    /// Maps an optional host-supplied value onto a session id, falling back to the
    /// default session when it is absent or malformed.
    pub fn from_host(value: Option<&str>) -> Self {
        value.and_then(|raw| Self::new(raw).ok()).unwrap_or_else(Self::default_session)
    }

    pub fn is_default(&self) -> bool {
        self.value == DEFAULT_SESSION_ID
    }
}

impl Default for Id<SessionIdTag> {
    fn default() -> Self {
        Self::default_session()
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdError, SessionId, DEFAULT_SESSION_ID};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));

        let result: Result<Id<()>, _> = Id::new("   ");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_control_characters() {
        let result: Result<Id<()>, _> = Id::new("a\nb");
        assert_eq!(result, Err(IdError::ControlCharacter));
    }

    #[test]
    fn id_rejects_oversized_values() {
        let result: Result<Id<()>, _> = Id::new("x".repeat(257));
        assert_eq!(result, Err(IdError::TooLong));
    }

    #[test]
    fn missing_or_malformed_host_ids_map_to_default_session() {
        assert_eq!(SessionId::from_host(None).as_str(), DEFAULT_SESSION_ID);
        assert_eq!(SessionId::from_host(Some("")).as_str(), DEFAULT_SESSION_ID);
        assert!(SessionId::from_host(Some("\u{0}")).is_default());
        assert_eq!(SessionId::from_host(Some("abc-123")).as_str(), "abc-123");
    }
}
