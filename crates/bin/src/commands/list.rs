//! List users and groups with their POSIX ids.

use posixid::{
    Settings,
    constants::{GIDNUMBER, UIDNUMBER},
    directory::{Directory, GroupFilter},
};

use crate::cli::DirectoryArgs;
use crate::output::{OutputFormat, id_cell, print_table};
use crate::session::Session;

/// Run the list command
///
/// Listing is a host start too, so anything missing is reconciled first.
pub fn run(
    directory: &DirectoryArgs,
    settings: Settings,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(directory, settings)?;
    session.save()?;

    let users = session.directory().list_users()?;
    let groups = session.directory().list_groups(&GroupFilter::All)?;

    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                println!("No users.");
            } else {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|user| {
                        vec![
                            user.id.to_string(),
                            id_cell(user.integer(UIDNUMBER)),
                            id_cell(user.integer(GIDNUMBER)),
                        ]
                    })
                    .collect();
                print_table(&["USER", "UIDNUMBER", "GIDNUMBER"], &rows);
            }
            println!();
            if groups.is_empty() {
                println!("No groups.");
            } else {
                let rows: Vec<Vec<String>> = groups
                    .iter()
                    .map(|group| {
                        vec![
                            group.id.to_string(),
                            group.display_name.clone(),
                            id_cell(group.integer(GIDNUMBER)),
                        ]
                    })
                    .collect();
                print_table(&["ID", "NAME", "GIDNUMBER"], &rows);
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "users": users
                    .iter()
                    .map(|user| serde_json::json!({
                        "id": user.id.as_str(),
                        "uidnumber": user.integer(UIDNUMBER),
                        "gidnumber": user.integer(GIDNUMBER),
                    }))
                    .collect::<Vec<_>>(),
                "groups": groups
                    .iter()
                    .map(|group| serde_json::json!({
                        "id": group.id.0,
                        "name": group.display_name,
                        "gidnumber": group.integer(GIDNUMBER),
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
