//! Resolution of the GitHub API token.
//!
//! The token is taken from the environment when present, otherwise from a
//! plaintext file in the working directory. Surrounding whitespace is
//! trimmed and a blank value counts as missing.
use log::*;
use secrecy::SecretString;
use std::{fs, io::ErrorKind, path::Path};

use crate::error::{AutocommitError, Result};

/// Default file read when no token is present in the environment.
pub const DEFAULT_TOKEN_FILE: &str = "token.txt";

/// Resolve the API token from `env_token`, falling back to `token_file`.
pub fn resolve_token(
    env_token: Option<&str>,
    token_file: &Path,
) -> Result<SecretString> {
    if let Some(token) = env_token.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using token from environment");
        return Ok(SecretString::from(token.to_string()));
    }

    match fs::read_to_string(token_file) {
        Ok(content) => {
            let token = content.trim();
            if token.is_empty() {
                warn!("token file {} is empty", token_file.display());
            } else {
                debug!("using token from {}", token_file.display());
                return Ok(SecretString::from(token.to_string()));
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("token file {} does not exist", token_file.display());
        }
        Err(err) => return Err(err.into()),
    }

    Err(AutocommitError::MissingToken {
        token_file: token_file.display().to_string(),
    })
}
