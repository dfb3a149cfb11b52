//! Command execution for autocommit-bot.
//!
//! [`run`] wires the pieces together in the order the tool needs them:
//!
//! 1. resolve the API token and build the forge client
//! 2. resolve the target repository, auto-detecting the owner if needed
//! 3. determine the iteration count (prompting when it is not configured)
//! 4. drive the commit loop
//!
//! Any error aborts the run and is reported by `main`.

/// The commit loop driver.
pub mod commit_loop;

/// Top level wiring from CLI arguments to the commit loop.
pub mod run;
