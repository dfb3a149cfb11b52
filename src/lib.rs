//! Generates commit activity on a GitHub repository by repeatedly
//! rewriting a single log file through the REST Contents API.
pub mod cli;
pub mod command;
pub mod credentials;
pub mod error;
pub mod forge;
pub mod repo;

pub use cli::Args;
pub use command::run;
