//! User creation command.

use posixid::{
    Settings,
    constants::{GIDNUMBER, UIDNUMBER},
    directory::{AttributeValue, Attributes, UserId},
    plugin::EventArgs,
};

use crate::cli::{AddUserArgs, DirectoryArgs};
use crate::output::{OutputFormat, id_cell};
use crate::session::Session;

/// Run the add-user command
pub fn run(
    directory: &DirectoryArgs,
    settings: Settings,
    args: &AddUserArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(directory, settings)?;

    let mut attributes = Attributes::new();
    if let Some(uid) = args.uidnumber {
        attributes.insert(UIDNUMBER.to_string(), AttributeValue::Integer(uid));
    }
    if let Some(gid) = args.gidnumber {
        attributes.insert(GIDNUMBER.to_string(), AttributeValue::Integer(gid));
    }

    let id = UserId::new(args.id.as_str());
    session.directory().add_user(id.clone(), attributes)?;
    let user = session.directory().user(&id)?;
    session.dispatch(EventArgs::UserCreated { user })?;
    session.save()?;

    // Re-read to show what the handlers assigned
    let user = session.directory().user(&id)?;
    let uid = user.integer(UIDNUMBER);
    let gid = user.integer(GIDNUMBER);
    match format {
        OutputFormat::Human => {
            println!("Created user {id}");
            println!("  uidnumber: {}", id_cell(uid));
            println!("  gidnumber: {}", id_cell(gid));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "id": id.as_str(),
                "uidnumber": uid,
                "gidnumber": gid,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
