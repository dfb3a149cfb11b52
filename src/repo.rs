//! Resolution of the target repository.
//!
//! The owner and name come from explicit settings when available, then from
//! a CI style `owner/name` value. When no owner can be found that way it is
//! auto-detected through the API:
//!
//! 1. look up the login the token belongs to
//! 2. probe `login/name` directly
//! 3. otherwise page through every repository the token can access until
//!    one with a matching name turns up
use log::*;

use crate::{
    error::{AutocommitError, Result},
    forge::{
        config::{DEFAULT_BRANCH, DEFAULT_REPO_NAME},
        traits::Forge,
        types::{Repository, RepositorySummary},
    },
};

/// Repository settings as supplied by the operator. Blank values are
/// treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryHints {
    pub owner: Option<String>,
    pub name: Option<String>,
    /// Combined `owner/name`, as exported by CI platforms
    pub combined: Option<String>,
    pub branch: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Split a combined `owner/name` value. Values without a separator are
/// ignored.
pub fn split_combined(combined: &str) -> Option<(Option<&str>, Option<&str>)> {
    if !combined.contains('/') {
        return None;
    }
    let mut parts = combined.split('/');
    let owner = non_empty(parts.next());
    let name = non_empty(parts.next());
    Some((owner, name))
}

/// Resolve owner, name and branch of the target repository, falling back to
/// owner auto-detection when no owner is configured.
pub async fn resolve_repository(
    forge: &dyn Forge,
    hints: &RepositoryHints,
) -> Result<Repository> {
    let (combined_owner, combined_name) = non_empty(hints.combined.as_deref())
        .and_then(split_combined)
        .unwrap_or((None, None));

    let name = non_empty(hints.name.as_deref())
        .or(combined_name)
        .unwrap_or(DEFAULT_REPO_NAME)
        .to_string();

    let branch = non_empty(hints.branch.as_deref())
        .unwrap_or(DEFAULT_BRANCH)
        .to_string();

    let owner = match non_empty(hints.owner.as_deref()).or(combined_owner) {
        Some(owner) => owner.to_string(),
        None => {
            info!("no repository owner configured: detecting from token");
            detect_owner(forge, &name).await?
        }
    };

    let repo = Repository {
        owner,
        name,
        branch,
    };

    info!("target repository: {repo}");

    Ok(repo)
}

/// Find the owner of the repository called `name` among everything the
/// token can reach.
pub async fn detect_owner(forge: &dyn Forge, name: &str) -> Result<String> {
    let candidate = forge.authenticated_login().await?;

    if forge.repository_exists(&candidate, name).await? {
        debug!("{candidate}/{name} exists: using {candidate} as owner");
        return Ok(candidate);
    }

    debug!("{candidate}/{name} not found: searching accessible repositories");

    let mut pages = RepositoryPages::new(forge);

    while let Some(repos) = pages.next_page().await? {
        if let Some(found) = repos.into_iter().find(|r| r.name == name) {
            let owner = found.owner.unwrap_or(candidate);
            info!("found {owner}/{name} on page {}", pages.current_page());
            return Ok(owner);
        }
    }

    Err(AutocommitError::RepositoryNotFound(name.to_string()))
}

/// Cursor over the pages of accessible repositories. Pages are fetched one
/// at a time on demand, and the sequence ends at the first empty page.
pub struct RepositoryPages<'a> {
    forge: &'a dyn Forge,
    page: u32,
    exhausted: bool,
}

impl<'a> RepositoryPages<'a> {
    pub fn new(forge: &'a dyn Forge) -> Self {
        Self {
            forge,
            page: 0,
            exhausted: false,
        }
    }

    /// Page number of the most recently fetched page (0 before the first).
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<RepositorySummary>>> {
        if self.exhausted {
            return Ok(None);
        }

        self.page += 1;
        let repos = self.forge.list_repositories(self.page).await?;

        if repos.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        Ok(Some(repos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::traits::MockForge;
    use mockall::predicate::eq;

    fn summary(name: &str, owner: Option<&str>) -> RepositorySummary {
        RepositorySummary {
            name: name.into(),
            owner: owner.map(Into::into),
        }
    }

    #[tokio::test]
    async fn explicit_owner_and_name_skip_detection() {
        // any forge call would panic the mock
        let forge = MockForge::new();
        let hints = RepositoryHints {
            owner: Some("acme".into()),
            name: Some("activity".into()),
            combined: Some("other/repo".into()),
            branch: None,
        };

        let repo = resolve_repository(&forge, &hints).await.unwrap();

        assert_eq!(
            repo,
            Repository {
                owner: "acme".into(),
                name: "activity".into(),
                branch: "main".into(),
            }
        );
    }

    #[tokio::test]
    async fn combined_value_supplies_owner_and_name() {
        let forge = MockForge::new();
        let hints = RepositoryHints {
            combined: Some("octocat/hello-world".into()),
            branch: Some("master".into()),
            ..Default::default()
        };

        let repo = resolve_repository(&forge, &hints).await.unwrap();

        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.branch, "master");
    }

    #[tokio::test]
    async fn explicit_name_wins_over_combined_name() {
        let forge = MockForge::new();
        let hints = RepositoryHints {
            name: Some("activity".into()),
            combined: Some("octocat/hello-world".into()),
            ..Default::default()
        };

        let repo = resolve_repository(&forge, &hints).await.unwrap();

        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "activity");
    }

    #[tokio::test]
    async fn blank_values_are_ignored() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .times(1)
            .returning(|| Ok("octocat".into()));
        forge
            .expect_repository_exists()
            .with(eq("octocat"), eq("Bot-Auto-Commit"))
            .times(1)
            .returning(|_, _| Ok(true));

        let hints = RepositoryHints {
            owner: Some("  ".into()),
            name: Some("".into()),
            combined: Some("no-separator".into()),
            branch: Some(" ".into()),
        };

        let repo = resolve_repository(&forge, &hints).await.unwrap();

        assert_eq!(
            repo,
            Repository {
                owner: "octocat".into(),
                name: "Bot-Auto-Commit".into(),
                branch: "main".into(),
            }
        );
    }

    #[tokio::test]
    async fn direct_probe_hit_skips_pagination() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .times(1)
            .returning(|| Ok("octocat".into()));
        forge
            .expect_repository_exists()
            .with(eq("octocat"), eq("activity"))
            .times(1)
            .returning(|_, _| Ok(true));
        forge.expect_list_repositories().never();

        let owner = detect_owner(&forge, "activity").await.unwrap();

        assert_eq!(owner, "octocat");
    }

    #[tokio::test]
    async fn probe_miss_paginates_until_first_match() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .times(1)
            .returning(|| Ok("octocat".into()));
        forge
            .expect_repository_exists()
            .times(1)
            .returning(|_, _| Ok(false));
        forge
            .expect_list_repositories()
            .with(eq(1u32))
            .times(1)
            .returning(|_| {
                Ok(vec![summary("dotfiles", Some("octocat"))])
            });
        forge
            .expect_list_repositories()
            .with(eq(2u32))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    summary("website", Some("acme-org")),
                    summary("activity", Some("acme-org")),
                ])
            });
        forge
            .expect_list_repositories()
            .with(eq(3u32))
            .never();

        let owner = detect_owner(&forge, "activity").await.unwrap();

        assert_eq!(owner, "acme-org");
    }

    #[tokio::test]
    async fn match_without_owner_falls_back_to_login() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .returning(|| Ok("octocat".into()));
        forge.expect_repository_exists().returning(|_, _| Ok(false));
        forge
            .expect_list_repositories()
            .with(eq(1u32))
            .times(1)
            .returning(|_| Ok(vec![summary("activity", None)]));

        let owner = detect_owner(&forge, "activity").await.unwrap();

        assert_eq!(owner, "octocat");
    }

    #[tokio::test]
    async fn exhausted_listing_is_not_found() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .returning(|| Ok("octocat".into()));
        forge.expect_repository_exists().returning(|_, _| Ok(false));
        forge
            .expect_list_repositories()
            .with(eq(1u32))
            .times(1)
            .returning(|_| Ok(vec![summary("dotfiles", Some("octocat"))]));
        forge
            .expect_list_repositories()
            .with(eq(2u32))
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = detect_owner(&forge, "activity").await;

        assert!(matches!(
            result,
            Err(AutocommitError::RepositoryNotFound(name)) if name == "activity"
        ));
    }

    #[tokio::test]
    async fn identity_failure_stops_detection() {
        let mut forge = MockForge::new();
        forge.expect_authenticated_login().times(1).returning(|| {
            Err(AutocommitError::api(
                "Fetching authenticated user",
                401,
                r#"{"message":"Bad credentials"}"#,
            ))
        });
        forge.expect_repository_exists().never();
        forge.expect_list_repositories().never();

        let result = detect_owner(&forge, "activity").await;

        assert!(matches!(
            result,
            Err(AutocommitError::Api { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn listing_failure_is_fatal() {
        let mut forge = MockForge::new();
        forge
            .expect_authenticated_login()
            .returning(|| Ok("octocat".into()));
        forge.expect_repository_exists().returning(|_, _| Ok(false));
        forge.expect_list_repositories().times(1).returning(|_| {
            Err(AutocommitError::api("Listing repositories", 500, "oops"))
        });

        let result = detect_owner(&forge, "activity").await;

        assert!(matches!(
            result,
            Err(AutocommitError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn pages_stop_after_empty_page() {
        let mut forge = MockForge::new();
        forge
            .expect_list_repositories()
            .with(eq(1u32))
            .times(1)
            .returning(|_| Ok(vec![summary("one", None)]));
        forge
            .expect_list_repositories()
            .with(eq(2u32))
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut pages = RepositoryPages::new(&forge);

        assert_eq!(pages.next_page().await.unwrap().unwrap().len(), 1);
        assert_eq!(pages.current_page(), 1);
        assert!(pages.next_page().await.unwrap().is_none());
        // exhausted cursors do not hit the API again
        assert!(pages.next_page().await.unwrap().is_none());
    }

    #[test]
    fn split_combined_handles_shapes() {
        assert_eq!(
            split_combined("octocat/hello"),
            Some((Some("octocat"), Some("hello")))
        );
        assert_eq!(split_combined("octocat/"), Some((Some("octocat"), None)));
        assert_eq!(split_combined("hello"), None);
    }
}
