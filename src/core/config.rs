//! User settings.
//!
//! Read from `<config dir>/keysmith/config.toml` (or `$KEYSMITH_CONFIG`).
//! Every key is optional and a missing file means defaults:
//!
//! ```toml
//! security_bin = "/usr/bin/security"
//! account = "alice"
//! probe = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings from the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Location of the `security` tool; a bare name is looked up on PATH.
    pub security_bin: Option<PathBuf>,
    /// Account used when none is given on the command line.
    pub account: String,
    /// Probe every record family when no kind is given.
    pub probe: bool,
}

impl Settings {
    /// Default config file location, honouring `$KEYSMITH_CONFIG`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(constants::ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// `ConfigError::ReadFile` if the file exists but cannot be read,
    /// `ConfigError::Parse` if it is not valid TOML for these settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::parse(&contents)?;
        debug!(path = %path.display(), ?settings, "config loaded");
        Ok(settings)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// The `security` executable to run.
    ///
    /// `flag` (command line or `$KEYSMITH_SECURITY_BIN`) wins over the file,
    /// which wins over [`constants::DEFAULT_SECURITY_BIN`].
    pub fn security_bin(&self, flag: Option<&Path>) -> Result<PathBuf> {
        let candidate = flag
            .or(self.security_bin.as_deref())
            .unwrap_or_else(|| Path::new(constants::DEFAULT_SECURITY_BIN));
        resolve_program(candidate)
    }
}

/// Resolve a bare program name on PATH; paths are returned unchanged.
fn resolve_program(candidate: &Path) -> Result<PathBuf> {
    if candidate.components().count() > 1 {
        return Ok(candidate.to_path_buf());
    }
    which::which(candidate).map_err(|e| {
        ConfigError::ToolNotFound(format!("{}: {}", candidate.display(), e)).into()
    })
}
