//! Configuration for the GitHub API connection.
use secrecy::SecretString;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// API version sent with every request.
pub const API_VERSION: &str = "2022-11-28";
/// Media type requested from the API.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";
/// User-Agent header value for API requests.
pub const USER_AGENT_VALUE: &str = "autocommit-bot";
/// Page size used when listing repositories (GitHub's maximum).
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Affiliations searched during owner auto-detection.
pub const REPO_AFFILIATION: &str = "owner,collaborator,organization_member";
/// Repository name used when none is configured.
pub const DEFAULT_REPO_NAME: &str = "Bot-Auto-Commit";
/// Branch written to when none is configured.
pub const DEFAULT_BRANCH: &str = "main";
/// File rewritten on every iteration.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Remote API connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL (configurable for GitHub Enterprise).
    pub api_base: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Skip file writes and only log what would be committed.
    pub dry_run: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}
