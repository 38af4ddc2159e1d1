//! Periodic rebuild of the corpus from its [`DocSource`].
//!
//! Each cycle syncs the source, reads the docs tree and the sidebar config,
//! parses everything into a fresh [`Corpus`] and installs it in one swap. A
//! cycle that fails anywhere before the swap leaves the store as it was.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::docs::{
    Corpus, CorpusStats, CorpusStore, ICON_CATALOG_SUFFIX, SourceFiles, parse_categories, parse_docs,
    parse_icons,
};
use crate::source::DocSource;

/// Parse a fetched docs tree and sidebar config into a complete corpus.
pub fn build_corpus(files: &SourceFiles, config: &str) -> Corpus {
    let categories = parse_categories(config);
    tracing::debug!("Resolved {} sidebar category mappings", categories.len());

    let entries = parse_docs(files, &categories);

    let icons = match files.iter().find(|(path, _)| path.ends_with(ICON_CATALOG_SUFFIX)) {
        Some((_, content)) => parse_icons(content),
        None => {
            tracing::warn!("Icon catalog {} not found in docs tree", ICON_CATALOG_SUFFIX);
            Vec::new()
        }
    };

    Corpus { entries, icons }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Serving the last installed corpus
    Idle,
    /// A fetch and parse is in flight
    Refreshing,
}

/// Drives refresh cycles against one source and one store.
pub struct Refresher {
    source: Arc<dyn DocSource>,
    store: Arc<CorpusStore>,
    interval: Duration,
    refreshing: AtomicBool,
}

impl Refresher {
    pub fn new(source: Arc<dyn DocSource>, store: Arc<CorpusStore>, interval: Duration) -> Self {
        Self {
            source,
            store,
            interval,
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> RefreshState {
        if self.refreshing.load(Ordering::Acquire) {
            RefreshState::Refreshing
        } else {
            RefreshState::Idle
        }
    }

    /// Run one cycle. On error the store is left untouched.
    pub async fn refresh_once(&self) -> Result<CorpusStats> {
        self.refreshing.store(true, Ordering::Release);
        let result = self.rebuild().await;
        self.refreshing.store(false, Ordering::Release);

        let corpus = result?;
        let stats = corpus.stats();
        self.store.install(corpus);

        tracing::info!(
            "Loaded {} documentation entries and {} icons",
            stats.entries,
            stats.icons
        );
        Ok(stats)
    }

    async fn rebuild(&self) -> Result<Corpus> {
        self.source.sync().await.context("failed to sync documentation source")?;

        let config = match self.source.fetch_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to read VitePress config, using default categories: {:#}", e);
                String::new()
            }
        };

        let files = self.source.fetch_docs().await.context("failed to read docs")?;
        tracing::debug!("Fetched {} documentation files", files.len());

        tokio::task::spawn_blocking(move || build_corpus(&files, &config))
            .await
            .context("corpus parse task failed")
    }

    /// Refresh every interval until `shutdown` turns true or its sender is dropped.
    ///
    /// The first tick comes one interval after the call; the initial load is
    /// expected to have happened already.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow() {
            return;
        }

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Refresh loop stopped");
                        return;
                    }
                }
                _ = ticker.tick() => {
                    tracing::info!("Refreshing documentation...");
                    if let Err(e) = self.refresh_once().await {
                        tracing::error!("Failed to refresh docs: {:#}", e);
                    }
                }
            }
        }
    }
}
