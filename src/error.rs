//! Error types.
//!
//! Errors are grouped by the layer that raises them. Store failures form a
//! closed taxonomy in [`KeychainError`] and are matched structurally by
//! callers.

use std::io;

use thiserror::Error;

/// Top-level error for every keysmith operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Keychain(#[from] KeychainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Outcomes of a keychain operation other than success.
#[derive(Error, Debug)]
pub enum KeychainError {
    #[error("secret not found in keychain")]
    NotFound,

    #[error("secret already exists in keychain")]
    AlreadyExists,

    #[error("invalid secret type '{0}': must be one of generic, internet")]
    InvalidType(String),

    #[error("failed to launch security tool: {0}")]
    SpawnFailure(#[source] io::Error),

    #[error("security tool exited with code {0}")]
    ProcessFailure(i32),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("security tool not found: {0}")]
    ToolNotFound(String),
}

/// Interactive input errors.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,

    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Prompt(PromptError::Terminal(e))
    }
}

impl Error {
    /// True when this is the store's "item not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Keychain(KeychainError::NotFound))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
