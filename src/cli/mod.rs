//! Command-line interface.

pub mod completions;
pub mod config;
pub mod get;
pub mod output;
pub mod prompt;
pub mod rm;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants;
use crate::core::controller::{identify, Controller};
use crate::core::identity::{SecretIdentity, SecretKind};
use crate::core::keychain::{Keychain, Lookup};
use crate::core::prompt::Prompter;
use crate::core::runner::SystemRunner;
use crate::error::{ConfigError, Error, KeychainError, Result};

use self::prompt::TerminalPrompter;

/// Keysmith - named secrets in the macOS keychain.
#[derive(Parser)]
#[command(
    name = "keysmith",
    about = "Named secrets in the macOS keychain",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the security tool [env: KEYSMITH_SECURITY_BIN]
    #[arg(long, global = true, value_name = "PATH")]
    pub security_bin: Option<PathBuf>,

    /// Config file (defaults to ~/.config/keysmith/config.toml) [env: KEYSMITH_CONFIG]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Clone)]
pub enum Command {
    /// Print a secret, offering to create it when missing
    Get {
        #[command(flatten)]
        target: Target,
        /// Print the whole record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a secret, confirming before replacing an existing one
    #[command(alias = "set")]
    Config {
        #[command(flatten)]
        target: Target,
    },

    /// Delete a secret
    Rm {
        #[command(flatten)]
        target: Target,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Which secret a command acts on.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Service name or URL (asked for when omitted)
    pub service: Option<String>,

    /// Account name
    #[arg(short, long)]
    pub account: Option<String>,

    /// Record type: generic or internet
    #[arg(short, long, conflicts_with = "probe")]
    pub kind: Option<String>,

    /// Try generic, then internet, instead of classifying the service
    #[arg(long)]
    pub probe: bool,
}

impl Target {
    /// Build the identity and lookup mode for this target.
    pub fn resolve(
        &self,
        prompter: &mut dyn Prompter,
        settings: &Settings,
    ) -> Result<(SecretIdentity, Lookup)> {
        // Validate the kind before prompting for anything.
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<SecretKind>)
            .transpose()?;

        let account = self.account.as_deref().unwrap_or(&settings.account);
        let identity = identify(prompter, self.service.as_deref(), account)?;

        Ok(match kind {
            Some(kind) => (identity.with_kind(kind), Lookup::Kind(kind)),
            None if self.probe || settings.probe => (identity, Lookup::Probe),
            None => {
                let lookup = Lookup::classified(&identity);
                (identity, lookup)
            }
        })
    }
}

/// Follow-up advice printed under an error from `command`.
pub fn suggestion(command: &Command, err: &Error) -> Option<String> {
    let service = match command {
        Command::Get { target, .. } | Command::Config { target } | Command::Rm { target } => {
            target.service.as_deref().unwrap_or("<service>")
        }
        Command::Completions { .. } => "<service>",
    };

    match (command, err) {
        (Command::Rm { .. }, Error::Keychain(KeychainError::NotFound)) => Some(format!(
            "nothing was removed; check the name and account of {} or retry with --probe",
            service
        )),
        (_, Error::Keychain(KeychainError::NotFound)) => {
            Some(format!("run: keysmith config {}", service))
        }
        (_, Error::Keychain(KeychainError::AlreadyExists)) => {
            Some(format!("run: keysmith config {} to override it", service))
        }
        (_, Error::Keychain(KeychainError::SpawnFailure(_)))
        | (_, Error::Config(ConfigError::ToolNotFound(_))) => Some(format!(
            "set security_bin in the config file or {}",
            constants::ENV_SECURITY_BIN
        )),
        _ => None,
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return completions::execute(shell.clone());
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let flag = cli
        .security_bin
        .or_else(|| std::env::var_os(constants::ENV_SECURITY_BIN).map(PathBuf::from));
    let program = settings.security_bin(flag.as_deref())?;
    debug!(program = %program.display(), "using security tool");

    let controller = Controller::new(Keychain::new(program, SystemRunner));
    let mut prompter = TerminalPrompter::stdin();

    match cli.command {
        Command::Get { target, json } => {
            get::execute(&controller, &mut prompter, &settings, &target, json)
        }
        Command::Config { target } => config::execute(&controller, &mut prompter, &settings, &target),
        Command::Rm { target } => rm::execute(&controller, &mut prompter, &settings, &target),
        Command::Completions { .. } => Ok(()),
    }
}
