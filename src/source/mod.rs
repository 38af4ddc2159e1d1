//! Where the documentation tree comes from.
//!
//! A [`DocSource`] hands the refresh task the raw markdown files of the
//! `docs` directory and the raw text of the VitePress config. Two sources
//! exist: a local git clone kept up to date with `git pull`, and the GitHub
//! contents API.

use anyhow::Result;
use async_trait::async_trait;

use crate::docs::SourceFiles;

pub mod git;
pub mod github;

pub use git::GitRepository;
pub use github::GitHubSource;

/// Root of the documentation tree inside the repository
pub const DOCS_ROOT: &str = "docs";

/// VitePress config candidates, relative to the repository root
pub const CONFIG_PATHS: [&str; 2] = ["docs/.vitepress/config.ts", "docs/.vitepress/config.mts"];

#[async_trait]
pub trait DocSource: Send + Sync {
    /// Bring the source up to date (clone or pull).
    async fn sync(&self) -> Result<()>;

    /// Markdown files under the docs root, keyed by repository-relative path.
    async fn fetch_docs(&self) -> Result<SourceFiles>;

    /// Sidebar config text, or an empty string when the repository has none.
    async fn fetch_config(&self) -> Result<String>;
}

/// Markdown files outside the VitePress tooling directory
pub(crate) fn is_doc_file(relative_path: &str) -> bool {
    relative_path.ends_with(".md") && !relative_path.split('/').any(|segment| segment == ".vitepress")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_doc_file() {
        assert!(is_doc_file("docs/components/button.md"));
        assert!(!is_doc_file("docs/.vitepress/theme/notes.md"));
        assert!(!is_doc_file("docs/public/logo.svg"));
    }
}
