//! Startup reconciliation command.

use posixid::Settings;

use super::pass_json;
use crate::cli::DirectoryArgs;
use crate::output::OutputFormat;
use crate::session::Session;

/// Run the init command
pub fn run(
    args: &DirectoryArgs,
    settings: Settings,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(args, settings)?;
    session.save()?;

    let report = session.startup();
    match format {
        OutputFormat::Human => {
            println!("Attributes created: {}", report.attributes_created);
            println!(
                "Users:  {} scanned, {} updated, {} failed",
                report.users.scanned, report.users.updated, report.users.failed
            );
            println!(
                "Groups: {} scanned, {} updated, {} failed",
                report.groups.scanned, report.groups.updated, report.groups.failed
            );
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "attributes_created": report.attributes_created,
                "users": pass_json(&report.users),
                "groups": pass_json(&report.groups),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
