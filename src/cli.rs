//! CLI argument parsing and run configuration.
//!
//! Every argument can also be supplied through the environment variable
//! named next to it, which is how CI pipelines are expected to drive the
//! tool.
use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::{
    command::commit_loop::{DEFAULT_DELAY_SECS, parse_iterations},
    credentials::{self, DEFAULT_TOKEN_FILE},
    error::{AutocommitError, Result},
    forge::{
        config::{DEFAULT_API_BASE, DEFAULT_LOG_PATH, RemoteConfig},
        types::CommitIdentity,
    },
    repo::RepositoryHints,
};

/// Generate commit activity by repeatedly rewriting a log file on GitHub.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    /// GitHub personal access token. Falls back to the token file.
    pub github_token: Option<String>,

    #[arg(long, env = "TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    /// Plaintext file holding the token when GITHUB_TOKEN is unset.
    pub token_file: PathBuf,

    #[arg(long, env = "GITHUB_REPOSITORY")]
    /// Target repository as owner/name, as set by GitHub Actions.
    pub github_repository: Option<String>,

    #[arg(long, env = "REPO_OWNER")]
    /// Repository owner. Auto-detected from the token when unset.
    pub owner: Option<String>,

    #[arg(long, env = "REPO_NAME")]
    /// Repository name. Defaults to Bot-Auto-Commit.
    pub name: Option<String>,

    #[arg(long, env = "REPO_BRANCH")]
    /// Branch to commit to. Defaults to main.
    pub branch: Option<String>,

    #[arg(long, env = "AUTHOR_NAME")]
    /// Commit author and committer name (requires --author-email).
    pub author_name: Option<String>,

    #[arg(long, env = "AUTHOR_EMAIL")]
    /// Commit author and committer email (requires --author-name).
    pub author_email: Option<String>,

    #[arg(long, env = "TIMES")]
    /// Number of commits to create. Prompted for when unset.
    pub times: Option<String>,

    #[arg(long, env = "LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    /// File in the repository rewritten on every commit.
    pub path: String,

    #[arg(long, env = "COMMIT_DELAY_SECS", default_value_t = DEFAULT_DELAY_SECS)]
    /// Seconds to wait between commits.
    pub delay: u64,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    /// GitHub API base URL (for GitHub Enterprise).
    pub api_url: String,

    #[arg(long, env = "DRY_RUN", default_value_t = false)]
    /// Look up files but skip writing them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Configure the API connection, resolving the token.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let api_base = Url::parse(&self.api_url)?;

        match api_base.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AutocommitError::invalid_config(format!(
                    "unsupported api url scheme: {scheme}"
                )));
            }
        }

        let token = credentials::resolve_token(
            self.github_token.as_deref(),
            &self.token_file,
        )?;

        Ok(RemoteConfig {
            api_base: self.api_url.clone(),
            token,
            dry_run: self.dry_run,
        })
    }

    pub fn repository_hints(&self) -> RepositoryHints {
        RepositoryHints {
            owner: self.owner.clone(),
            name: self.name.clone(),
            combined: self.github_repository.clone(),
            branch: self.branch.clone(),
        }
    }

    /// Explicit author identity, only when both name and email are set.
    pub fn commit_identity(&self) -> Option<CommitIdentity> {
        let name = self.author_name.as_deref().map(str::trim);
        let email = self.author_email.as_deref().map(str::trim);

        match (name, email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(CommitIdentity {
                    name: name.to_string(),
                    email: email.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Iteration count from the arguments, or from an interactive prompt
    /// when it was not supplied.
    pub fn iterations(&self) -> Result<u64> {
        match self.times.as_deref() {
            Some(raw) => parse_iterations(raw),
            None => {
                let raw = inquire::Text::new(
                    "How many times should the log file be updated?",
                )
                .prompt()?;
                parse_iterations(&raw)
            }
        }
    }
}
