//! Implements the Forge trait for Github
use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use log::*;
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::{AutocommitError, Result},
    forge::{
        client::HttpClient,
        config::{DEFAULT_PAGE_SIZE, REPO_AFFILIATION, RemoteConfig},
        github::types::{
            GithubFileContent, GithubRepository, GithubUser, PutContents,
            PutContentsResponse,
        },
        traits::{Forge, Transport},
        types::{
            ApiResponse, FileCommit, Repository, RepositorySummary,
            WriteFileRequest,
        },
    },
};

mod types;

/// Github forge implementation over a [`Transport`]. Every operation is a
/// single awaited request except [`Forge::write_file`], which looks up the
/// file's revision marker before writing.
pub struct Github {
    transport: Box<dyn Transport>,
    api_base: String,
    dry_run: bool,
}

impl Github {
    /// Create Github client backed by reqwest with token authentication.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = HttpClient::new(config)?;
        Ok(Self::with_transport(Box::new(client), config))
    }

    pub fn with_transport(
        transport: Box<dyn Transport>,
        config: &RemoteConfig,
    ) -> Self {
        Self {
            transport,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            dry_run: config.dry_run,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let url = Url::parse(&format!("{}/{}", self.api_base, path))?;
        Ok(url)
    }

    /// Contents endpoint for `path`. Each path component is added as an
    /// encoded segment so `?` and `#` stay part of the file name.
    fn contents_url(&self, repo: &Repository, path: &str) -> Result<Url> {
        let path = path.strip_prefix("./").unwrap_or(path);
        let mut url = self.endpoint("repos")?;

        url.path_segments_mut()
            .map_err(|_| {
                AutocommitError::invalid_config(format!(
                    "api url cannot be a base: {}",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .extend([repo.owner.as_str(), repo.name.as_str(), "contents"])
            .extend(path.split('/').filter(|s| !s.is_empty()));

        Ok(url)
    }
}

/// Decode a JSON response body into `T`, keeping the raw body in the error
/// when the shape does not match.
fn decode<T: DeserializeOwned>(context: &str, resp: ApiResponse) -> Result<T> {
    let json = resp.body.as_json().cloned().ok_or_else(|| {
        AutocommitError::unexpected(format!(
            "{context}: expected JSON body, got: {}",
            resp.body
        ))
    })?;

    serde_json::from_value(json.clone()).map_err(|err| {
        AutocommitError::unexpected(format!("{context}: {err}: {json}"))
    })
}

#[async_trait]
impl Forge for Github {
    async fn authenticated_login(&self) -> Result<String> {
        let context = "Fetching authenticated user";
        let url = self.endpoint("user")?;
        let resp = self.transport.send(Method::GET, url, None).await?;

        if resp.status != 200 {
            return Err(AutocommitError::api(
                context,
                resp.status,
                resp.body.to_string(),
            ));
        }

        let user: GithubUser = decode(context, resp)?;
        debug!("token belongs to: {}", user.login);
        Ok(user.login)
    }

    async fn repository_exists(&self, owner: &str, name: &str) -> Result<bool> {
        let url = self.endpoint(&format!("repos/{owner}/{name}"))?;
        let resp = self.transport.send(Method::GET, url, None).await?;
        debug!("probe for {owner}/{name} returned {}", resp.status);
        Ok(resp.status == 200)
    }

    async fn list_repositories(
        &self,
        page: u32,
    ) -> Result<Vec<RepositorySummary>> {
        let context = "Listing repositories";
        let mut url = self.endpoint("user/repos")?;

        url.query_pairs_mut()
            .append_pair("per_page", &DEFAULT_PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("visibility", "all")
            .append_pair("affiliation", REPO_AFFILIATION);

        let resp = self.transport.send(Method::GET, url, None).await?;

        if resp.status != 200 {
            return Err(AutocommitError::api(
                context,
                resp.status,
                resp.body.to_string(),
            ));
        }

        let repos: Vec<GithubRepository> = decode(context, resp)?;
        debug!("page {page} listed {} repositories", repos.len());
        Ok(repos.into_iter().map(Into::into).collect())
    }

    async fn get_file_sha(
        &self,
        repo: &Repository,
        path: &str,
    ) -> Result<Option<String>> {
        let context = "Fetching file sha";
        let mut url = self.contents_url(repo, path)?;
        url.query_pairs_mut().append_pair("ref", &repo.branch);

        let resp = self.transport.send(Method::GET, url, None).await?;

        match resp.status {
            200 => {
                let file: GithubFileContent = decode(context, resp)?;
                debug!("current sha for {path}: {}", file.sha);
                Ok(Some(file.sha))
            }
            404 => {
                debug!("{path} does not exist on {}", repo.branch);
                Ok(None)
            }
            status => Err(AutocommitError::api(
                context,
                status,
                resp.body.to_string(),
            )),
        }
    }

    async fn write_file(
        &self,
        repo: &Repository,
        req: WriteFileRequest,
    ) -> Result<FileCommit> {
        let sha = self.get_file_sha(repo, &req.path).await?;

        let body = PutContents {
            message: &req.message,
            content: BASE64_STANDARD.encode(req.content.as_bytes()),
            branch: &repo.branch,
            sha: sha.as_deref(),
            author: req.identity.as_ref(),
            committer: req.identity.as_ref(),
        };

        if self.dry_run {
            warn!(
                "dry_run: would write {} on {repo}: message: {}, sha: {:?}",
                req.path, req.message, sha
            );
            return Ok(FileCommit {
                sha: "dry-run".into(),
                html_url: None,
            });
        }

        let url = self.contents_url(repo, &req.path)?;
        let payload = serde_json::to_value(&body)?;
        let resp = self.transport.send(Method::PUT, url, Some(payload)).await?;

        match resp.status {
            200 | 201 => {
                let commit: PutContentsResponse =
                    decode("Updating file", resp)?;
                Ok(commit.into())
            }
            status => Err(AutocommitError::api(
                "Updating file",
                status,
                resp.body.to_string(),
            )),
        }
    }
}
