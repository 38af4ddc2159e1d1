use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Where the documentation tree is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Shallow git clone, updated with `git pull`
    Git,
    /// GitHub contents API
    Github,
}

#[derive(Debug, Parser)]
#[command(version, about = "MCP server for the vacano-ui documentation")]
pub struct Cli {
    /// How to fetch the documentation repository
    #[arg(long, value_enum, default_value = "git", env = "DOCS_SOURCE")]
    pub source: SourceKind,
    /// Git URL of the documentation repository
    #[arg(long, env = "GIT_REPO_URL", default_value = "https://github.com/vacano-house/vacano-ui.git")]
    pub repo_url: String,
    /// Branch to clone and pull (also the ref read through the GitHub API)
    #[arg(long, env = "GIT_BRANCH", default_value = "master")]
    pub branch: String,
    /// Private SSH key for cloning over ssh (optional)
    #[arg(long, env = "GIT_SSH_KEY", hide_env_values = true)]
    pub ssh_key: Option<String>,
    /// How often the documentation is refreshed, e.g. `30s`, `5m`, `1h30m`
    #[arg(long, env = "DOCS_REFRESH_INTERVAL", default_value = "5m", value_parser = parse_duration)]
    pub refresh_interval: Duration,
    /// A github repository owner, used with `--source github`
    #[arg(long, default_value = "vacano-house")]
    pub github_owner: String,
    /// A github repository, used with `--source github`
    #[arg(long, default_value = "vacano-ui")]
    pub github_repo: String,
    /// A github personal access token to use for authentication (optional)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_pat: Option<String>,
    /// File the server log is written to; stdout carries the MCP protocol
    #[arg(long, default_value = "server.log")]
    pub log_file: PathBuf,
}

/// Parse durations such as `90`, `30s`, `5m`, `2h` or `1h30m`.
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("duration cannot be empty".to_string());
    }
    if let Ok(secs) = input.parse::<u64>() {
        return non_zero(Duration::from_secs(secs), input);
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit = match c {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            _ => return Err(format!("invalid duration unit '{c}' in {input:?}")),
        };
        let value: u64 = digits
            .parse()
            .map_err(|_| format!("missing number before '{c}' in {input:?}"))?;
        total = value
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(Duration::from_secs(secs)))
            .ok_or_else(|| format!("duration too large: {input:?}"))?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(format!("missing unit after {digits} in {input:?}"));
    }

    non_zero(total, input)
}

fn non_zero(duration: Duration, input: &str) -> Result<Duration, String> {
    if duration.is_zero() {
        Err(format!("duration must be greater than zero: {input:?}"))
    } else {
        Ok(duration)
    }
}
