//! Rm command.

use tracing::info;

use crate::cli::{output, Target};
use crate::core::config::Settings;
use crate::core::controller::Controller;
use crate::core::keychain::Lookup;
use crate::core::prompt::Prompter;
use crate::core::runner::Runner;
use crate::error::Result;

/// Delete a secret.
///
/// With `--probe` the record is looked up first so the delete targets the
/// family it actually lives in.
pub fn execute<R: Runner>(
    controller: &Controller<R>,
    prompter: &mut dyn Prompter,
    settings: &Settings,
    target: &Target,
) -> Result<()> {
    let (mut identity, lookup) = target.resolve(prompter, settings)?;
    if lookup == Lookup::Probe {
        let found = controller.keychain().find(&identity, lookup)?;
        identity = identity.with_kind(found.kind);
    }
    info!(identity = %identity, "removing secret");

    controller.delete(&identity)?;
    output::success(&format!("removed: {}", output::key(identity.name())));
    Ok(())
}
