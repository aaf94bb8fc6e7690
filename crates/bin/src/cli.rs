//! CLI argument definitions for the posixid binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use posixid::Settings;
use posixid::constants::{DEFAULT_GROUP_NAME, GID_OFFSET, UID_BASE};

/// Drive the POSIX id extension against a JSON directory file.
///
/// Every invocation behaves like a host start: the startup reconciliation
/// runs first, then the requested change and its lifecycle event.
#[derive(Parser, Debug)]
#[command(name = "posixid")]
#[command(about = "POSIX uidnumber/gidnumber reconciliation for a directory")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub directory: DirectoryArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the startup reconciliation
    Init,
    /// Create a user and dispatch its user-created event
    AddUser(AddUserArgs),
    /// Create a group and dispatch its group-created event
    AddGroup(AddGroupArgs),
    /// Show users and groups with their POSIX ids
    List,
}

/// Location of the directory file
#[derive(clap::Args, Debug)]
pub struct DirectoryArgs {
    /// JSON file holding the directory; created if missing
    #[arg(
        short,
        long,
        default_value = "posixid.json",
        env = "POSIXID_FILE",
        global = true
    )]
    pub file: PathBuf,
}

/// Reconciliation settings
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    /// Allocated user ids start just above this value
    #[arg(long, default_value_t = UID_BASE, env = "POSIXID_UID_BASE", global = true)]
    pub uid_base: i64,

    /// Added to a group's directory id to form its gidnumber
    #[arg(long, default_value_t = GID_OFFSET, env = "POSIXID_GID_OFFSET", global = true)]
    pub gid_offset: i64,

    /// Display name of the shared default group
    #[arg(
        long,
        default_value = DEFAULT_GROUP_NAME,
        env = "POSIXID_DEFAULT_GROUP",
        global = true
    )]
    pub default_group: String,
}

impl From<&SettingsArgs> for Settings {
    fn from(args: &SettingsArgs) -> Self {
        Settings::default()
            .with_uid_base(args.uid_base)
            .with_gid_offset(args.gid_offset)
            .with_default_group_name(args.default_group.clone())
    }
}

/// Arguments for the add-user command
#[derive(clap::Args, Debug)]
pub struct AddUserArgs {
    /// User id (login name)
    pub id: String,

    /// Explicit uidnumber instead of an allocated one
    #[arg(long)]
    pub uidnumber: Option<i64>,

    /// Explicit gidnumber instead of the default group's
    #[arg(long)]
    pub gidnumber: Option<i64>,
}

/// Arguments for the add-group command
#[derive(clap::Args, Debug)]
pub struct AddGroupArgs {
    /// Group display name
    pub name: String,
}
