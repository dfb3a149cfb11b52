//! Traits related to the remote API
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::types::{
        ApiResponse, FileCommit, Repository, RepositorySummary,
        WriteFileRequest,
    },
};

/// Sends a single authenticated request. Only transport failures are
/// errors: any HTTP status comes back as an [`ApiResponse`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<ApiResponse>;
}

/// Operations this tool performs against the forge.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Login of the identity the token belongs to.
    async fn authenticated_login(&self) -> Result<String>;

    /// Whether `owner/name` is reachable with the current token.
    async fn repository_exists(&self, owner: &str, name: &str) -> Result<bool>;

    /// One page (1-based) of repositories the token can access.
    async fn list_repositories(
        &self,
        page: u32,
    ) -> Result<Vec<RepositorySummary>>;

    /// Current revision marker of `path`, or `None` when the file does not
    /// exist on the repository branch.
    async fn get_file_sha(
        &self,
        repo: &Repository,
        path: &str,
    ) -> Result<Option<String>>;

    /// Create or replace a file, producing a commit on the repository branch.
    async fn write_file(
        &self,
        repo: &Repository,
        req: WriteFileRequest,
    ) -> Result<FileCommit>;
}
