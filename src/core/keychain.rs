//! Keychain client over the `security` command-line tool.
//!
//! Builds the argument vector for each operation, runs the tool, and maps
//! its exit code onto [`KeychainError`]. Successful lookups are parsed with
//! [`codec::parse_dump`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::codec;
use crate::core::constants::{EXIT_DUPLICATE_ITEM, EXIT_ITEM_NOT_FOUND};
use crate::core::identity::{SecretIdentity, SecretKind};
use crate::core::runner::{Runner, ToolOutput};
use crate::error::KeychainError;

/// How a lookup picks the record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Query exactly this family.
    Kind(SecretKind),
    /// Try every family in [`SecretKind::ALL`] order until one is found.
    Probe,
}

impl Lookup {
    /// Query the family the identity was classified as.
    pub fn classified(identity: &SecretIdentity) -> Self {
        Lookup::Kind(identity.kind())
    }
}

/// A keychain item returned by a successful lookup.
#[derive(Debug, Clone)]
pub struct SecretRecord {
    pub kind: SecretKind,
    pub name: String,
    pub account: String,
    pub host: Option<String>,
    pub path: Option<String>,
    /// URL scheme with trailing colon, when the protocol code is known.
    pub scheme: Option<String>,
    /// Path of the keychain file holding the item.
    pub keychain_name: Option<String>,
    pub label: Option<String>,
    pub password: Zeroizing<String>,
}

impl SecretRecord {
    /// Assemble a record from a lookup dump, falling back to the identity
    /// for attributes the tool did not print.
    fn from_dump(identity: &SecretIdentity, kind: SecretKind, output: &str) -> Self {
        let dump = codec::parse_dump(output);

        let name = match kind {
            SecretKind::Generic => dump.service.into_option(),
            SecretKind::Networked => dump.server.as_deref().map(str::to_string),
        }
        .unwrap_or_else(|| identity.name().to_string());

        let (host, path) = match kind {
            SecretKind::Generic => (None, None),
            SecretKind::Networked => (
                dump.server
                    .into_option()
                    .or_else(|| identity.host().map(str::to_string)),
                dump.path
                    .into_option()
                    .or_else(|| identity.path().map(str::to_string)),
            ),
        };

        Self {
            kind,
            name,
            account: dump
                .account
                .into_option()
                .unwrap_or_else(|| identity.account().to_string()),
            host,
            path,
            scheme: dump
                .protocol
                .as_deref()
                .and_then(codec::code_to_scheme)
                .map(str::to_string),
            keychain_name: dump.keychain.into_option(),
            label: dump.label.into_option(),
            password: Zeroizing::new(dump.password.into_option().unwrap_or_default()),
        }
    }

    /// Identity that addresses exactly this item.
    ///
    /// Internet items are keyed on server, account, path and protocol, so
    /// all of them are carried over.
    pub fn identity(&self) -> SecretIdentity {
        match self.kind {
            SecretKind::Generic => SecretIdentity::generic(&self.name, &self.account),
            SecretKind::Networked => SecretIdentity::networked(
                self.host.as_deref().unwrap_or(&self.name),
                &self.account,
                self.path.clone(),
                self.scheme.clone(),
            ),
        }
    }
}

/// Client for one `security` executable.
pub struct Keychain<R> {
    program: PathBuf,
    runner: R,
}

impl<R: Runner> Keychain<R> {
    pub fn new(program: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// Path of the `security` executable in use.
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Look up a secret and return it with its password.
    ///
    /// # Errors
    ///
    /// `NotFound` when no family holds the item, `ProcessFailure` on any
    /// other non-zero exit, `SpawnFailure` when the tool cannot be launched.
    /// While probing only `NotFound` moves on to the next family.
    pub fn find(
        &self,
        identity: &SecretIdentity,
        lookup: Lookup,
    ) -> Result<SecretRecord, KeychainError> {
        match lookup {
            Lookup::Kind(kind) => self.find_kind(identity, kind),
            Lookup::Probe => {
                for kind in SecretKind::ALL {
                    match self.find_kind(identity, kind) {
                        Err(KeychainError::NotFound) => {
                            debug!(kind = %kind, "not found, probing next kind");
                        }
                        other => return other,
                    }
                }
                Err(KeychainError::NotFound)
            }
        }
    }

    fn find_kind(
        &self,
        identity: &SecretIdentity,
        kind: SecretKind,
    ) -> Result<SecretRecord, KeychainError> {
        let args = vec![
            format!("find-{}-password", kind.family()),
            "-a".to_string(),
            identity.account().to_string(),
            "-s".to_string(),
            identity.name().to_string(),
            "-g".to_string(),
        ];

        let out = self.exec(&args)?;
        match out.code {
            0 => Ok(SecretRecord::from_dump(identity, kind, &out.output)),
            EXIT_ITEM_NOT_FOUND => Err(KeychainError::NotFound),
            code => Err(failure(&args[0], &out, code)),
        }
    }

    /// Store a secret, replacing an existing item only when `force` is set.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the item exists and `force` is false,
    /// `ProcessFailure` or `SpawnFailure` otherwise.
    pub fn set(
        &self,
        identity: &SecretIdentity,
        secret: &str,
        force: bool,
    ) -> Result<(), KeychainError> {
        let kind = identity.kind();
        let mut args = vec![
            format!("add-{}-password", kind.family()),
            "-a".to_string(),
            identity.account().to_string(),
            "-s".to_string(),
            identity.name().to_string(),
            "-w".to_string(),
            secret.to_string(),
        ];
        if force {
            args.push("-U".to_string());
        }
        if kind == SecretKind::Networked {
            if let Some(path) = identity.path() {
                args.push("-p".to_string());
                args.push(path.to_string());
            }
            if let Some(code) = identity.scheme().and_then(codec::scheme_to_code) {
                args.push("-r".to_string());
                args.push(code.to_string());
            }
        }
        let args = Zeroizing::new(args);

        let out = self.exec(&args)?;
        match out.code {
            0 => {
                info!(kind = %kind, force, "secret stored");
                Ok(())
            }
            EXIT_DUPLICATE_ITEM => Err(KeychainError::AlreadyExists),
            code => Err(failure(&args[0], &out, code)),
        }
    }

    /// Delete a secret.
    ///
    /// # Errors
    ///
    /// `NotFound` when the item is missing, `ProcessFailure` or
    /// `SpawnFailure` otherwise.
    pub fn remove(&self, identity: &SecretIdentity) -> Result<(), KeychainError> {
        let args = vec![
            format!("delete-{}-password", identity.kind().family()),
            "-a".to_string(),
            identity.account().to_string(),
            "-s".to_string(),
            identity.name().to_string(),
        ];

        let out = self.exec(&args)?;
        match out.code {
            0 => {
                info!(kind = %identity.kind(), "secret deleted");
                Ok(())
            }
            EXIT_ITEM_NOT_FOUND => Err(KeychainError::NotFound),
            code => Err(failure(&args[0], &out, code)),
        }
    }

    fn exec(&self, args: &[String]) -> Result<ToolOutput, KeychainError> {
        // args[0] is the subcommand; later arguments may hold the secret.
        debug!(
            program = %self.program.display(),
            subcommand = %args[0],
            "running security"
        );
        let out = self
            .runner
            .run(&self.program, args)
            .map_err(KeychainError::SpawnFailure)?;
        debug!(subcommand = %args[0], code = out.code, "security exited");
        Ok(out)
    }
}

fn failure(subcommand: &str, out: &ToolOutput, code: i32) -> KeychainError {
    warn!(
        subcommand = %subcommand,
        code,
        output = %out.output.lines().next().unwrap_or_default(),
        "security failed"
    );
    KeychainError::ProcessFailure(code)
}
