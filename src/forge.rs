//! Access to the GitHub REST API.
//!
//! The low level [`client::HttpClient`] normalizes every response into a
//! status and body pair, and [`github::Github`] builds the handful of
//! operations this tool needs on top of it.

/// Configuration and authentication for the API connection.
pub mod config;

/// Authenticated HTTP transport built on reqwest.
pub mod client;

/// GitHub operations: identity, repository discovery and the Contents API.
pub mod github;

/// Common traits for transport and forge abstraction.
pub mod traits;

/// Shared data types for repositories, files and commits.
pub mod types;
