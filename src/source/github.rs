use anyhow::{Result, bail};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use octocrab::Octocrab;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Duration, sleep};

use super::git::decode_lossy;
use super::{CONFIG_PATHS, DOCS_ROOT, DocSource, is_doc_file};
use crate::docs::SourceFiles;

/// Maximum number of concurrent requests to the GitHub API
const MAX_CONCURRENT_REQUESTS: usize = 5;
/// Attempts per file before a fetch is given up
const MAX_RETRIES: u32 = 3;

/// Reads the documentation tree through the GitHub contents API instead of
/// a local clone. Every fetch reads the current state of `reference`.
#[derive(Clone)]
pub struct GitHubSource {
    client: Arc<Octocrab>,
    owner: String,
    pub repo: String,
    reference: String,
    // Limits concurrent requests to the GitHub API
    request_semaphore: Arc<Semaphore>,
}

impl GitHubSource {
    pub fn new(owner: &str, repo: &str, reference: &str, token: Option<&str>) -> Result<Self> {
        if owner.trim().is_empty() {
            bail!("Owner cannot be empty");
        }
        if repo.trim().is_empty() {
            bail!("Repository name cannot be empty");
        }

        let mut builder = Octocrab::builder();

        if let Some(token) = token {
            if token.trim().is_empty() {
                bail!("Personal access token cannot be empty");
            }
            tracing::info!("Using personal access token for GitHub API");
            builder = builder.personal_token(token);
        }

        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            owner: owner.to_string(),
            repo: repo.to_string(),
            reference: reference.to_string(),
            request_semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_REQUESTS)),
        })
    }

    /// Fetch one file with retries and exponential backoff.
    async fn get_file_contents(&self, path: &str) -> Result<String> {
        let _permit = self.request_semaphore.clone().acquire_owned().await?;

        let mut delay = Duration::from_millis(100);
        let mut attempt = 1;

        loop {
            match self.fetch_file_content(path).await {
                Ok(content) => return Ok(content),
                Err(e) if attempt < MAX_RETRIES => {
                    tracing::warn!("Retry {}/{} for file {}: {}", attempt, MAX_RETRIES, path, e);
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e.context(format!("failed to fetch {path} after {MAX_RETRIES} attempts"))),
            }
        }
    }

    async fn fetch_file_content(&self, path: &str) -> Result<String> {
        let content = self
            .client
            .repos(&self.owner, &self.repo)
            .get_content()
            .path(path)
            .r#ref(&self.reference)
            .send()
            .await?;

        let Some(encoded) = content.items.first().and_then(|file| file.content.as_ref()) else {
            bail!("File not found or empty: {path}");
        };

        let decoded = STANDARD.decode(encoded.replace('\n', ""))?;
        Ok(decode_lossy(path, decoded))
    }

    /// Paths of every file below `root`, walking directories iteratively.
    async fn list_files(&self, root: &str) -> Result<Vec<String>> {
        let mut directories = vec![root.to_string()];
        let mut files = Vec::new();

        while let Some(current) = directories.pop() {
            let listing = self
                .client
                .repos(&self.owner, &self.repo)
                .get_content()
                .path(&current)
                .r#ref(&self.reference)
                .send()
                .await?;

            for item in listing.items {
                match item.r#type.as_str() {
                    "file" => files.push(item.path),
                    "dir" => directories.push(item.path),
                    _ => {}
                }
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl DocSource for GitHubSource {
    async fn sync(&self) -> Result<()> {
        // Nothing is cached locally; every fetch reads the remote tree.
        Ok(())
    }

    async fn fetch_docs(&self) -> Result<SourceFiles> {
        let paths: Vec<String> = self
            .list_files(DOCS_ROOT)
            .await?
            .into_iter()
            .filter(|path| is_doc_file(path))
            .collect();

        tracing::debug!("Fetching {} documentation files from GitHub", paths.len());

        fetch_all(paths, |path| {
            let source = self.clone();
            async move { source.get_file_contents(&path).await }
        })
        .await
    }

    async fn fetch_config(&self) -> Result<String> {
        for candidate in CONFIG_PATHS {
            match self.fetch_file_content(candidate).await {
                Ok(content) => return Ok(content),
                Err(e) => tracing::debug!("VitePress config {} unavailable: {}", candidate, e),
            }
        }

        tracing::info!("VitePress config not found, using default categories");
        Ok(String::new())
    }
}

/// Fetch every path concurrently. The first failure aborts the fetches
/// still in flight and fails the whole tree.
async fn fetch_all<F, Fut>(paths: Vec<String>, fetch: F) -> Result<SourceFiles>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for path in paths {
        let content = fetch(path.clone());
        tasks.spawn(async move { (path, content.await) });
    }

    let mut files = SourceFiles::new();
    while let Some(joined) = tasks.join_next().await {
        let (path, content) = joined?;
        match content {
            Ok(content) => {
                files.insert(path, content);
            }
            Err(e) => {
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_fetch_all_collects_every_file() {
        let paths = vec!["docs/a.md".to_string(), "docs/b.md".to_string()];
        let files = fetch_all(paths, |path| async move { Ok::<_, anyhow::Error>(format!("# {path}")) })
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files["docs/b.md"], "# docs/b.md");
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_remaining_fetches_on_error() {
        let finished = Arc::new(AtomicUsize::new(0));
        let paths = vec!["docs/broken.md".to_string(), "docs/slow.md".to_string()];

        let result = fetch_all(paths, |path| {
            let finished = finished.clone();
            async move {
                if path.ends_with("broken.md") {
                    bail!("not found: {path}");
                }
                sleep(Duration::from_millis(200)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(String::new())
            }
        })
        .await;

        assert!(result.is_err());
        sleep(Duration::from_millis(400)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_new_validates_arguments() {
        assert!(GitHubSource::new("", "vacano-ui", "master", None).is_err());
        assert!(GitHubSource::new("vacano-house", " ", "master", None).is_err());
        assert!(GitHubSource::new("vacano-house", "vacano-ui", "master", Some("  ")).is_err());

        let source = GitHubSource::new("vacano-house", "vacano-ui", "master", None).unwrap();
        assert_eq!(source.repo, "vacano-ui");
    }
}
