//! Config command.
//!
//! Sets a secret, asking before it replaces one that already exists.

use tracing::info;

use crate::cli::{output, Target};
use crate::core::config::Settings;
use crate::core::controller::{Controller, Outcome};
use crate::core::prompt::Prompter;
use crate::core::runner::Runner;
use crate::error::Result;

/// Set or replace a secret.
pub fn execute<R: Runner>(
    controller: &Controller<R>,
    prompter: &mut dyn Prompter,
    settings: &Settings,
    target: &Target,
) -> Result<()> {
    let (identity, lookup) = target.resolve(prompter, settings)?;
    info!(identity = %identity, ?lookup, "configuring secret");

    match controller.config(prompter, &identity, lookup)? {
        Outcome::Stored => {
            output::success(&format!("{} secret set.", output::key(identity.name())))
        }
        Outcome::Unchanged => output::dimmed("kept existing secret"),
    }
    Ok(())
}
