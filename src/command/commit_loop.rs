//! Commit loop: rewrite the log file once per iteration.
use chrono::Local;
use log::*;
use std::{io::Write, time::Duration};
use tokio::time::sleep;

use crate::{
    error::{AutocommitError, Result},
    forge::{
        traits::Forge,
        types::{CommitIdentity, Repository, WriteFileRequest},
    },
};

/// Local time format embedded in every log line and commit message.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Pause between iterations, to stay clear of rate and abuse limits.
pub const DEFAULT_DELAY_SECS: u64 = 2;

/// Everything the loop needs, resolved before the first write.
#[derive(Debug, Clone)]
pub struct CommitPlan {
    pub repository: Repository,
    /// File in the repository that is rewritten every iteration
    pub path: String,
    pub iterations: u64,
    pub delay: Duration,
    pub identity: Option<CommitIdentity>,
}

/// Parse an iteration count. Only positive integers are accepted.
pub fn parse_iterations(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(AutocommitError::InvalidIterations(raw.trim().to_string())),
    }
}

/// Single line written as the entire file content.
pub fn log_line(timestamp: &str, index: u64, total: u64) -> String {
    format!("{timestamp} - log updated ({index}/{total})\n")
}

pub fn commit_message(
    path: &str,
    timestamp: &str,
    index: u64,
    total: u64,
) -> String {
    format!("chore: update {path} at {timestamp} ({index}/{total})")
}

/// Run `plan.iterations` sequential writes, reporting each commit on `out`.
///
/// Every iteration replaces the whole file with one timestamp line. The
/// first failure ends the loop. Returns the number of commits created.
pub async fn execute(
    forge: &dyn Forge,
    plan: &CommitPlan,
    out: &mut impl Write,
) -> Result<u64> {
    let total = plan.iterations;
    let mut created = 0;

    info!(
        "writing {} {total} times on {}",
        plan.path, plan.repository
    );

    for index in 1..=total {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let req = WriteFileRequest {
            path: plan.path.clone(),
            content: log_line(&timestamp, index, total),
            message: commit_message(&plan.path, &timestamp, index, total),
            identity: plan.identity.clone(),
        };

        debug!("iteration {index}/{total}: {}", req.message);

        let commit = forge.write_file(&plan.repository, req).await?;

        writeln!(out, "Committed {index}/{total}: {}", commit.sha)?;

        if let Some(url) = commit.html_url.as_deref() {
            debug!("commit url: {url}");
        }

        created += 1;

        if index < total && !plan.delay.is_zero() {
            sleep(plan.delay).await;
        }
    }

    Ok(created)
}
