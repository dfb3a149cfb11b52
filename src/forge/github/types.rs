use serde::{Deserialize, Serialize};

use crate::forge::types::{CommitIdentity, FileCommit, RepositorySummary};

#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GithubOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GithubRepository {
    pub name: String,
    pub owner: Option<GithubOwner>,
}

impl From<GithubRepository> for RepositorySummary {
    fn from(repo: GithubRepository) -> Self {
        RepositorySummary {
            name: repo.name,
            owner: repo.owner.map(|o| o.login),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubFileContent {
    pub sha: String,
}

#[derive(Debug, Serialize)]
pub struct PutContents<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a CommitIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<&'a CommitIdentity>,
}

#[derive(Debug, Deserialize)]
pub struct GithubCommit {
    pub sha: String,
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PutContentsResponse {
    pub commit: GithubCommit,
}

impl From<PutContentsResponse> for FileCommit {
    fn from(resp: PutContentsResponse) -> Self {
        FileCommit {
            sha: resp.commit.sha,
            html_url: resp.commit.html_url,
        }
    }
}
