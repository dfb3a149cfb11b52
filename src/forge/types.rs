use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Target repository, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.branch)
    }
}

/// Response body as returned by the API: parsed JSON when possible,
/// otherwise the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Parse `raw` as JSON, keeping it verbatim when it is not valid JSON.
    pub fn lenient(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => ApiBody::Json(value),
            Err(_) => ApiBody::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiBody::Json(value) => Some(value),
            ApiBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ApiBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiBody::Json(value) => write!(f, "{value}"),
            ApiBody::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Normalized result of a single API request. Error statuses are carried
/// here rather than raised so callers can inspect the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ApiBody,
}

/// Name and email used as both author and committer of a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

/// Request to replace the entire content of a file in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFileRequest {
    /// Relative path to the file starting from repo root
    pub path: String,
    /// New content of the file (plain text, encoded before sending)
    pub content: String,
    pub message: String,
    pub identity: Option<CommitIdentity>,
}

/// Commit produced by a file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCommit {
    pub sha: String,
    pub html_url: Option<String>,
}

/// Entry from the accessible repositories listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub name: String,
    /// Declared owner login, when the API reports one
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lenient_body_parses_json() {
        let body = ApiBody::lenient(r#"{"message":"Not Found"}"#.into());
        assert_eq!(body, ApiBody::Json(json!({"message": "Not Found"})));
    }

    #[test]
    fn lenient_body_keeps_text() {
        let body = ApiBody::lenient("<html>bad gateway</html>".into());
        assert_eq!(body, ApiBody::Text("<html>bad gateway</html>".into()));
        assert!(body.as_json().is_none());
    }

    #[test]
    fn repository_display() {
        let repo = Repository {
            owner: "octocat".into(),
            name: "Bot-Auto-Commit".into(),
            branch: "main".into(),
        };
        assert_eq!(repo.to_string(), "octocat/Bot-Auto-Commit@main");
    }
}
