// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Blumira MCP entrypoint.
//!
//! Serves MCP over stdio by default, or over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp` with `--http-port`.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use blumira_mcp::config::{Cli, Config, Transport};
use blumira_mcp::mcp::BlumiraMcp;
use blumira_mcp::router::Navigator;
use clap::Parser;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    // stdout carries the stdio transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn spawn_idle_sweep(navigator: Arc<Navigator>, ttl: Duration) -> tokio::task::JoinHandle<()> {
    let period = (ttl / 2).max(MIN_SWEEP_INTERVAL);
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        loop {
            ticks.tick().await;
            navigator.prune_idle_sessions(ttl);
        }
    })
}

async fn serve_http(mcp: BlumiraMcp, port: u16) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!(address = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

    let config = StreamableHttpServerConfig { stateful_mode: true, ..Default::default() };
    let shutdown_token = config.cancellation_token.clone();

    let session_manager = Arc::new(LocalSessionManager::default());
    let service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);
    let router = Router::new().nest_service("/mcp", service);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = shutdown_token.cancelled() => {}
            }
        })
        .await?;
    Ok(())
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mcp = BlumiraMcp::from_config(&config)?;
    if !mcp.navigator().credentials().has_credentials() {
        info!("no JWT token configured; the host will be asked on first navigation");
    }

    let sweep = config
        .session_idle_ttl
        .map(|ttl| spawn_idle_sweep(mcp.navigator().clone(), ttl));

    let served = match config.transport {
        Transport::Stdio => mcp.serve_stdio().await.map_err(|err| -> Box<dyn Error> { Box::new(err) }),
        Transport::Http { port } => serve_http(mcp, port).await,
    };

    if let Some(sweep) = sweep {
        sweep.abort();
    }
    served
}

fn main() {
    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("blumira-mcp: {err}");
            std::process::exit(2);
        }
    };
    init_tracing(&config);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| -> Box<dyn Error> { Box::new(err) })
        .and_then(|runtime| runtime.block_on(run(config)));

    if let Err(err) = result {
        eprintln!("blumira-mcp: {err}");
        std::process::exit(1);
    }
}
