//! Get command.
//!
//! Prints the password alone so the output can be captured by scripts.

use serde_json::json;
use tracing::info;

use crate::cli::Target;
use crate::core::config::Settings;
use crate::core::controller::Controller;
use crate::core::keychain::SecretRecord;
use crate::core::prompt::Prompter;
use crate::core::runner::Runner;
use crate::error::Result;

/// Print a secret, creating it first if the user agrees.
pub fn execute<R: Runner>(
    controller: &Controller<R>,
    prompter: &mut dyn Prompter,
    settings: &Settings,
    target: &Target,
    as_json: bool,
) -> Result<()> {
    let (identity, lookup) = target.resolve(prompter, settings)?;
    info!(identity = %identity, ?lookup, "getting secret");

    let record = controller.get(prompter, &identity, lookup)?;

    if as_json {
        println!("{}", to_json(&record));
    } else {
        println!("{}", record.password.as_str());
    }
    Ok(())
}

fn to_json(record: &SecretRecord) -> String {
    let value = json!({
        "kind": record.kind.family(),
        "name": record.name,
        "account": record.account,
        "host": record.host,
        "path": record.path,
        "scheme": record.scheme,
        "keychain": record.keychain_name,
        "label": record.label,
        "password": record.password.as_str(),
    });
    // A json! value always serializes.
    serde_json::to_string_pretty(&value).unwrap_or_default()
}
