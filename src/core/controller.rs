//! Secret workflows.
//!
//! Each operation is a short sequence of keychain calls with prompts in
//! between. Only `NotFound` is recovered from (by offering to create the
//! secret); every other error is returned unchanged.
//!
//! ```text
//! get:  find ─ found ──────────────────────────────────────────────────▶ record
//!         └─ not found ─ confirm ─ no ─────────────────────────────────▶ NotFound
//!                           └─ yes ─ complete ─ ask secret ─ add ─ find ▶ record | error
//! ```
//!
//! Before anything new is written the identity is completed: an unknown
//! record family is asked for, and an internet secret without a host is
//! asked for its URL.

use tracing::{debug, info};

use crate::core::identity::{classify, SecretIdentity, SecretKind};
use crate::core::keychain::{Keychain, Lookup, SecretRecord};
use crate::core::prompt::Prompter;
use crate::core::runner::Runner;
use crate::error::{KeychainError, Result};

/// Result of a `config` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new value was written.
    Stored,
    /// The user kept the existing value.
    Unchanged,
}

/// Build an identity, asking for the service when none was given.
pub fn identify(
    prompter: &mut dyn Prompter,
    service: Option<&str>,
    account: &str,
) -> Result<SecretIdentity> {
    let service = match service {
        Some(s) => s.to_string(),
        None => loop {
            let answer = prompter.ask("service or url:")?;
            let answer = answer.trim();
            if !answer.is_empty() {
                break answer.to_string();
            }
        },
    };
    Ok(classify(&service, account))
}

/// Fill in what a new item needs but the identity does not say.
///
/// A probing lookup leaves the record family open, so it is asked for. An
/// internet identity without a host (a plain name given `--kind internet`)
/// is replaced by the URL the user enters.
pub fn complete(
    prompter: &mut dyn Prompter,
    identity: &SecretIdentity,
    lookup: Lookup,
) -> Result<SecretIdentity> {
    let identity = match lookup {
        Lookup::Probe => identity.with_kind(ask_kind(prompter)?),
        Lookup::Kind(_) => addressed(identity, lookup),
    };
    if identity.kind() == SecretKind::Networked && identity.host().is_none() {
        return ask_url(prompter, identity.account());
    }
    Ok(identity)
}

fn ask_kind(prompter: &mut dyn Prompter) -> Result<SecretKind> {
    let mut question = "type (generic/internet):".to_string();
    loop {
        let answer = prompter.ask(&question)?;
        match answer.trim().parse::<SecretKind>() {
            Ok(kind) => return Ok(kind),
            Err(_) => {
                question = format!(
                    "'{}' is not a valid option: please pick one of generic, internet:",
                    answer.trim()
                )
            }
        }
    }
}

fn ask_url(prompter: &mut dyn Prompter, account: &str) -> Result<SecretIdentity> {
    let mut question = "url:".to_string();
    loop {
        let answer = prompter.ask(&question)?;
        let identity = classify(answer.trim(), account);
        if identity.kind() == SecretKind::Networked {
            return Ok(identity);
        }
        question = format!(
            "'{}' is not a valid url: please enter a valid url:",
            answer.trim()
        );
    }
}

/// The identity as addressed by an explicit lookup kind.
fn addressed(identity: &SecretIdentity, lookup: Lookup) -> SecretIdentity {
    match lookup {
        Lookup::Kind(kind) if kind != identity.kind() => identity.with_kind(kind),
        _ => identity.clone(),
    }
}

/// Orchestrates keychain calls and prompts.
pub struct Controller<R> {
    keychain: Keychain<R>,
}

impl<R: Runner> Controller<R> {
    pub fn new(keychain: Keychain<R>) -> Self {
        Self { keychain }
    }

    pub fn keychain(&self) -> &Keychain<R> {
        &self.keychain
    }

    /// Fetch a secret, offering to create it when missing.
    ///
    /// An explicit `Lookup::Kind` wins over the identity's own kind, for the
    /// lookup and for the create alike. After a successful create the lookup
    /// is retried once; a failure on that retry is returned as is.
    pub fn get(
        &self,
        prompter: &mut dyn Prompter,
        identity: &SecretIdentity,
        lookup: Lookup,
    ) -> Result<SecretRecord> {
        let mut target = addressed(identity, lookup);
        let mut lookup = lookup;
        let mut retried = false;
        loop {
            match self.keychain.find(&target, lookup) {
                Ok(record) => return Ok(record),
                Err(KeychainError::NotFound) if !retried => {
                    debug!(identity = %target, "secret missing");
                    let create = prompter.confirm(&format!(
                        "The {} secret has not been set.\nDo you want to set it now?",
                        target.name()
                    ))?;
                    if !create {
                        return Err(KeychainError::NotFound.into());
                    }

                    target = complete(prompter, &target, lookup)?;
                    lookup = Lookup::Kind(target.kind());
                    let value = prompter.ask_hidden("secret:")?;
                    self.keychain.set(&target, &value, false)?;
                    info!(identity = %target, "secret created");
                    retried = true;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Set or replace a secret.
    ///
    /// An existing secret is only overwritten after confirmation, and then
    /// addressed exactly as it was found: family, host, path and protocol.
    pub fn config(
        &self,
        prompter: &mut dyn Prompter,
        identity: &SecretIdentity,
        lookup: Lookup,
    ) -> Result<Outcome> {
        let identity = addressed(identity, lookup);
        let target = match self.keychain.find(&identity, lookup) {
            Ok(existing) => {
                let replace = prompter.confirm(&format!(
                    "The {} secret has already been set.\nDo you want to override it?",
                    identity.name()
                ))?;
                if !replace {
                    debug!(identity = %identity, "override declined");
                    return Ok(Outcome::Unchanged);
                }
                existing.identity()
            }
            Err(KeychainError::NotFound) => complete(prompter, &identity, lookup)?,
            Err(e) => return Err(e.into()),
        };

        let value = prompter.ask_hidden("secret:")?;
        self.keychain.set(&target, &value, true)?;
        info!(identity = %target, "secret set");
        Ok(Outcome::Stored)
    }

    /// Delete a secret.
    pub fn delete(&self, identity: &SecretIdentity) -> Result<()> {
        self.keychain.remove(identity)?;
        Ok(())
    }
}
