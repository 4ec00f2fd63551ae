//! Constants used throughout keysmith.
//!
//! Centralizes magic strings, exit codes, and configuration locations.

/// Default location of the macOS `security` tool.
pub const DEFAULT_SECURITY_BIN: &str = "/usr/bin/security";

/// Exit code of `security` when the item is not in the keychain
/// (errSecItemNotFound).
pub const EXIT_ITEM_NOT_FOUND: i32 = 44;

/// Exit code of `security add-*-password` when the item already exists
/// (errSecDuplicateItem).
pub const EXIT_DUPLICATE_ITEM: i32 = 45;

/// Directory under the platform config dir (~/.config/keysmith).
pub const CONFIG_DIR: &str = "keysmith";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Overrides the configuration file path.
pub const ENV_CONFIG: &str = "KEYSMITH_CONFIG";

/// Overrides the `security` tool location.
pub const ENV_SECURITY_BIN: &str = "KEYSMITH_SECURITY_BIN";

/// Log filter (tracing `EnvFilter` syntax).
pub const ENV_LOG: &str = "KEYSMITH_LOG";
