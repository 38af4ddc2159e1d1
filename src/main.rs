use std::sync::Arc;
use anyhow::{Context, Result};
use rmcp::{ServiceExt, transport::stdio};
use tokio::sync::watch;
use clap::Parser;
use vacano_ui_mcp::config::{Cli, SourceKind};
use vacano_ui_mcp::docs::CorpusStore;
use vacano_ui_mcp::refresh::Refresher;
use vacano_ui_mcp::server::DocsServer;
use vacano_ui_mcp::source::{DocSource, GitHubSource, GitRepository};

#[cfg(feature = "trace")]
use tracing_subscriber::{EnvFilter};

/// You can inspect the server using the Model Context Protocol Inspector.
/// npx @modelcontextprotocol/inspector cargo run -p vacano-ui-mcp

#[tokio::main]
async fn main() -> Result<()> {
    // Get command line arguments
    let args = Cli::parse();

    // Log to a file; stdout belongs to the MCP transport
    #[cfg(feature = "trace")]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_writer(std::fs::File::create(&args.log_file)?)
        .with_ansi(false)
        .init();

    tracing::info!("Starting MCP server");

    let source: Arc<dyn DocSource> = match args.source {
        SourceKind::Git => Arc::new(GitRepository::new(
            &args.repo_url,
            &args.branch,
            args.ssh_key.as_deref(),
        )?),
        SourceKind::Github => Arc::new(GitHubSource::new(
            &args.github_owner,
            &args.github_repo,
            &args.branch,
            args.github_pat.as_deref(),
        )?),
    };

    // Nothing can be served without a first corpus, so this one is fatal
    let store = Arc::new(CorpusStore::new());
    let refresher = Arc::new(Refresher::new(source, store.clone(), args.refresh_interval));
    refresher
        .refresh_once()
        .await
        .context("failed to load documentation")?;
    tracing::info!("Documentation loaded successfully");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh_task = {
        let refresher = refresher.clone();
        tokio::spawn(async move { refresher.run(shutdown_rx).await })
    };

    let service = DocsServer::new(store)
        .serve(stdio()).await.inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    tokio::select! {
        result = service.waiting() => {
            result?;
            tracing::info!("MCP client disconnected");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(true);
    refresh_task.await?;

    tracing::info!("Server stopped gracefully");
    Ok(())
}
