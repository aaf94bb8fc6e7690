//! Group creation command.

use posixid::{
    Settings,
    constants::GIDNUMBER,
    directory::{Attributes, Directory},
    plugin::EventArgs,
};

use crate::cli::{AddGroupArgs, DirectoryArgs};
use crate::output::{OutputFormat, id_cell};
use crate::session::Session;

/// Run the add-group command
pub fn run(
    directory: &DirectoryArgs,
    settings: Settings,
    args: &AddGroupArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(directory, settings)?;

    let id = session.directory().create_group(&args.name, Attributes::new())?;
    let group = session.directory().group(id)?;
    session.dispatch(EventArgs::GroupCreated { group })?;
    session.save()?;

    let gid = session.directory().group(id)?.integer(GIDNUMBER);
    match format {
        OutputFormat::Human => {
            println!("Created group {} (id {id})", args.name);
            println!("  gidnumber: {}", id_cell(gid));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "id": id.0,
                "name": args.name,
                "gidnumber": gid,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
