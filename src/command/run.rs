//! Entry point that turns parsed arguments into a commit run.
use log::*;
use std::{io, time::Duration};

use crate::{
    cli::Args,
    command::commit_loop::{self, CommitPlan},
    error::Result,
    forge::github::Github,
    repo,
};

/// Resolve configuration from `args` and run the commit loop against GitHub.
pub async fn execute(args: &Args) -> Result<()> {
    let remote_config = args.remote_config()?;

    if remote_config.dry_run {
        warn!("dry_run: files will not be written");
    }

    let forge = Github::new(&remote_config)?;

    let repository =
        repo::resolve_repository(&forge, &args.repository_hints()).await?;

    let iterations = args.iterations()?;

    let plan = CommitPlan {
        repository,
        path: args.path.clone(),
        iterations,
        delay: Duration::from_secs(args.delay),
        identity: args.commit_identity(),
    };

    let mut stdout = io::stdout();
    let created = commit_loop::execute(&forge, &plan, &mut stdout).await?;

    info!("created {created} commits on {}", plan.repository);

    Ok(())
}
