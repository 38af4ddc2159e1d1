use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};
use tokio::process::Command;
use walkdir::WalkDir;

use super::{CONFIG_PATHS, DOCS_ROOT, DocSource, is_doc_file};
use crate::docs::SourceFiles;

/// A shallow single-branch clone of the documentation repository, living in
/// a temporary directory that is removed on drop.
pub struct GitRepository {
    url: String,
    branch: String,
    checkout: TempDir,
    ssh_key: Option<NamedTempFile>,
}

impl GitRepository {
    pub fn new(url: &str, branch: &str, ssh_key: Option<&str>) -> Result<Self> {
        if url.trim().is_empty() {
            bail!("Repository URL cannot be empty");
        }
        if branch.trim().is_empty() {
            bail!("Branch cannot be empty");
        }

        let checkout = tempfile::Builder::new()
            .prefix("vacano-ui-docs-")
            .tempdir()
            .context("failed to create checkout directory")?;

        let ssh_key = match ssh_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                tracing::info!("Using SSH key for git operations");
                Some(write_ssh_key(key)?)
            }
            None => None,
        };

        Ok(Self {
            url: url.to_string(),
            branch: branch.to_string(),
            checkout,
            ssh_key,
        })
    }

    pub fn checkout_path(&self) -> &Path {
        self.checkout.path()
    }

    fn is_cloned(&self) -> bool {
        self.checkout_path().join(".git").exists()
    }

    async fn clone_repo(&self) -> Result<()> {
        tracing::info!(
            "Cloning {} (branch: {}) into {:?}",
            self.url,
            self.branch,
            self.checkout_path()
        );

        let target = self.checkout_path().to_string_lossy().into_owned();
        self.git(&[
            "clone",
            "--depth",
            "1",
            "--branch",
            &self.branch,
            "--single-branch",
            &self.url,
            &target,
        ])
        .await
        .context("git clone failed")?;

        Ok(())
    }

    async fn pull(&self) -> Result<()> {
        let target = self.checkout_path().to_string_lossy().into_owned();
        let output = self
            .git(&["-C", &target, "pull", "--ff-only"])
            .await
            .context("git pull failed")?;

        tracing::info!("Git pull: {}", output.trim());
        Ok(())
    }

    /// Run git and return its stdout, failing on a non-zero exit status.
    async fn git(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new("git");
        command.args(args).kill_on_drop(true);

        if let Some(key) = &self.ssh_key {
            command.env(
                "GIT_SSH_COMMAND",
                format!("ssh -i {} -o StrictHostKeyChecking=no", key.path().display()),
            );
        }

        let output = command.output().await.context("failed to run git")?;
        if !output.status.success() {
            bail!(
                "git exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DocSource for GitRepository {
    async fn sync(&self) -> Result<()> {
        if self.is_cloned() {
            self.pull().await
        } else {
            self.clone_repo().await
        }
    }

    async fn fetch_docs(&self) -> Result<SourceFiles> {
        let root = self.checkout_path().to_path_buf();
        tokio::task::spawn_blocking(move || read_docs_tree(&root))
            .await
            .context("docs walk task failed")?
    }

    async fn fetch_config(&self) -> Result<String> {
        for candidate in CONFIG_PATHS {
            let path = self.checkout_path().join(candidate);
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => return Ok(content),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to read VitePress config {path:?}"));
                }
            }
        }

        tracing::info!("VitePress config not found, using default categories");
        Ok(String::new())
    }
}

/// Collect the markdown files under `<root>/docs`, keyed by path relative to `root`.
fn read_docs_tree(root: &Path) -> Result<SourceFiles> {
    let docs_path = root.join(DOCS_ROOT);
    if !docs_path.is_dir() {
        bail!("docs directory not found at {docs_path:?}");
    }

    let mut files = SourceFiles::new();

    for entry in WalkDir::new(&docs_path) {
        let entry = entry.context("failed to walk docs directory")?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_path(root, entry.path());
        if !is_doc_file(&relative) {
            continue;
        }

        let bytes = std::fs::read(entry.path())
            .with_context(|| format!("failed to read {:?}", entry.path()))?;
        files.insert(relative.clone(), decode_lossy(&relative, bytes));
    }

    Ok(files)
}

/// File text, with invalid UTF-8 sequences replaced rather than failing the file.
pub(crate) fn decode_lossy(path: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} is not valid UTF-8, replacing invalid sequences", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// `/`-separated path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Keys passed through env files often carry literal `\n` sequences, and ssh
/// rejects a key without a trailing newline.
fn normalize_ssh_key(key: &str) -> String {
    let mut normalized = key.replace("\\n", "\n");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

fn write_ssh_key(key: &str) -> Result<NamedTempFile> {
    // tempfile creates the file with 0600 on unix, which ssh requires.
    let mut file = tempfile::Builder::new()
        .prefix("ssh-key-")
        .tempfile()
        .context("failed to create SSH key file")?;
    file.write_all(normalize_ssh_key(key).as_bytes())
        .context("failed to write SSH key")?;
    file.flush().context("failed to write SSH key")?;
    Ok(file)
}
