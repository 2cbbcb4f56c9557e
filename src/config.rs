// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::client::DEFAULT_API_URL;
use crate::credentials::Credentials;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// MCP server exposing the Blumira security-operations API through domain navigation.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blumira-mcp")]
#[command(author, version, about)]
#[command(long_about = r#"
Blumira MCP groups the Blumira public API into domains (findings, agents, users, msp,
resolutions). Agents call `navigate` to enter a domain, see only that domain's tools,
and call `back` to return to the domain menu.

By default the server speaks MCP over stdio. Use --http-port to serve streamable HTTP
at http://127.0.0.1:<port>/mcp instead.
"#)]
pub struct Cli {
    /// Blumira API JWT. When absent the server asks the host for it on first navigation.
    #[arg(long, env = "BLUMIRA_JWT_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub jwt_token: Option<String>,

    /// Base URL of the Blumira public API
    #[arg(long, env = "BLUMIRA_API_URL", default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,

    /// Per-request timeout for API calls, in seconds
    #[arg(long, env = "BLUMIRA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Serve MCP over streamable HTTP on this port instead of stdio (0 = ephemeral)
    #[arg(long, value_name = "PORT")]
    pub http_port: Option<u16>,

    /// Forget navigation state of sessions idle for longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub session_idle_ttl_secs: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http { port: u16 },
}

/// Validated runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub api_url: String,
    pub timeout: Duration,
    pub transport: Transport,
    pub session_idle_ttl: Option<Duration>,
    pub verbosity: u8,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_credentials", &self.credentials.is_some())
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .field("session_idle_ttl", &self.session_idle_ttl)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
    #[error("--session-idle-ttl-secs must be greater than zero")]
    ZeroSessionTtl,
    #[error("invalid API URL {url:?}: {message}")]
    InvalidApiUrl { url: String, message: String },
}

impl Cli {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config {
            credentials: self.jwt_token.and_then(Credentials::new),
            api_url: self.api_url.trim().to_owned(),
            timeout: Duration::from_secs(self.timeout_secs),
            transport: match self.http_port {
                Some(port) => Transport::Http { port },
                None => Transport::Stdio,
            },
            session_idle_ttl: self.session_idle_ttl_secs.map(Duration::from_secs),
            verbosity: self.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.session_idle_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(ConfigError::ZeroSessionTtl);
        }

        let url = reqwest::Url::parse(&self.api_url).map_err(|err| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                message: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        Ok(())
    }

    /// Default `tracing` filter directive for the configured verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let argv = std::iter::once("blumira-mcp").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("cli parses").into_config()
    }

    #[test]
    fn defaults_serve_stdio_against_the_public_api() {
        let cli = Cli {
            jwt_token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            http_port: None,
            session_idle_ttl_secs: None,
            verbose: 0,
        };
        let config = cli.into_config().expect("config");

        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.session_idle_ttl, None);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn explicit_flags_are_applied() {
        let config = parse(&[
            "--jwt-token",
            "abc",
            "--api-url",
            "http://localhost:9000/v1",
            "--timeout-secs",
            "5",
            "--http-port",
            "8080",
            "--session-idle-ttl-secs",
            "600",
            "-vv",
        ])
        .expect("config");

        assert_eq!(config.credentials.as_ref().map(Credentials::jwt_token), Some("abc"));
        assert_eq!(config.api_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.transport, Transport::Http { port: 8080 });
        assert_eq!(config.session_idle_ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn blank_tokens_count_as_missing() {
        let config = parse(&["--jwt-token", "   "]).expect("config");
        assert!(config.credentials.is_none());
    }

    #[rstest]
    #[case(&["--timeout-secs", "0"], ConfigError::ZeroTimeout)]
    #[case(&["--session-idle-ttl-secs", "0"], ConfigError::ZeroSessionTtl)]
    fn zero_durations_are_rejected(#[case] args: &[&str], #[case] expected: ConfigError) {
        assert_eq!(parse(args).unwrap_err(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://api.example.com")]
    fn bad_api_urls_are_rejected(#[case] url: &str) {
        let err = parse(&["--api-url", url]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }), "{err}");
    }

    #[test]
    fn debug_output_hides_the_token() {
        let config = parse(&["--jwt-token", "super-secret"]).expect("config");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
