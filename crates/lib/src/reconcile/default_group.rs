//! Finds or lazily creates the shared default group.
//!
//! The group is only created by a user pass that finds at least one user. On
//! a fresh directory this keeps it from taking a lower group id than the
//! groups the host service creates for itself.

use tracing::{error, info, warn};

use super::{Context, ReconcileError};
use crate::Result;
use crate::constants::GIDNUMBER;
use crate::directory::{AttributeValue, Attributes, Group, GroupFilter, GroupId};

/// Returns the `gidnumber` of the default group, creating the group if needed.
///
/// If several groups carry the default display name, the one with the lowest
/// directory id wins. An existing default group without an integer
/// `gidnumber` gets the derived value written back.
///
/// # Errors
/// Listing, creating or patching the group are all fatal: callers cannot
/// hand out a fallback gid without it.
pub fn resolve_default_gid(ctx: &Context) -> Result<i64> {
    let name = &ctx.settings().default_group_name;
    let mut groups = ctx
        .directory()
        .list_groups(&GroupFilter::DisplayName(name.clone()))
        .map_err(|source| {
            error!(group = %name, error = %source, "Failed to look up default group");
            ReconcileError::ListingFailed {
                what: "groups",
                source,
            }
        })?;

    groups.sort_by_key(|group| group.id);
    if groups.len() > 1 {
        let ids: Vec<i64> = groups.iter().map(|group| group.id.0).collect();
        warn!(group = %name, ?ids, "Multiple default groups found, using the lowest id");
    }

    match groups.into_iter().next() {
        Some(group) => existing_gid(ctx, &group),
        None => create_default_group(ctx),
    }
}

fn existing_gid(ctx: &Context, group: &Group) -> Result<i64> {
    if let Some(gid) = group.integer(GIDNUMBER) {
        return Ok(gid);
    }

    warn!(
        group = %group.display_name,
        id = %group.id,
        "Default group has no gidnumber, assigning one"
    );
    set_gid(ctx, group.id)
}

fn create_default_group(ctx: &Context) -> Result<i64> {
    let name = &ctx.settings().default_group_name;
    let id = ctx
        .directory()
        .create_group(name, Attributes::new())
        .map_err(|source| {
            error!(group = %name, error = %source, "Failed to create default group");
            ReconcileError::DefaultGroupCreation {
                display_name: name.clone(),
                source,
            }
        })?;
    info!(group = %name, %id, "Created default group");

    set_gid(ctx, id)
}

fn set_gid(ctx: &Context, id: GroupId) -> Result<i64> {
    let gid = ctx.gid_for(id)?;
    let attributes = Attributes::from([(GIDNUMBER.to_string(), AttributeValue::Integer(gid))]);
    ctx.directory()
        .update_group(id, attributes)
        .map_err(|source| {
            error!(%id, gid, error = %source, "Failed to set default group gidnumber");
            ReconcileError::DefaultGroupUpdate { id, source }
        })?;
    info!(%id, gid, "Assigned default group gidnumber");
    Ok(gid)
}
