//! User id allocation.

use tracing::{debug, error, info, warn};

use super::{Context, PassReport, ReconcileError, checked_offset, resolve_default_gid};
use crate::Result;
use crate::constants::{GIDNUMBER, UIDNUMBER};
use crate::directory::{AttributeValue, Attributes, User};

/// Assign a `uidnumber` and `gidnumber` to every user missing one.
///
/// New uids continue from the larger of the configured base and the highest
/// uid already present, in the order the directory lists users. Users without
/// a `gidnumber` get the default group's. The default group is resolved (and
/// possibly created) once per pass whenever there is at least one user, so an
/// empty directory sees no writes at all.
///
/// A failed patch is logged and the user skipped; the next pass retries it.
/// The uid consumed by a failed patch is not handed to another user in the
/// same pass.
///
/// # Errors
/// Listing users, resolving the default group and uid overflow are fatal.
pub fn allocate_user_ids(ctx: &Context) -> Result<PassReport> {
    let users = ctx.directory().list_users().map_err(|source| {
        error!(error = %source, "Failed to list users");
        ReconcileError::ListingFailed {
            what: "users",
            source,
        }
    })?;

    let mut report = PassReport {
        scanned: users.len(),
        ..PassReport::default()
    };
    if users.is_empty() {
        debug!("No users to reconcile");
        return Ok(report);
    }

    let default_gid = resolve_default_gid(ctx)?;

    let mut max_uid = highest_uid(&users).map_or(ctx.settings().uid_base, |uid| {
        uid.max(ctx.settings().uid_base)
    });

    for user in &users {
        let mut patch = Attributes::new();

        if user.integer(UIDNUMBER).is_none() {
            max_uid = checked_offset(max_uid, 1)?;
            patch.insert(UIDNUMBER.to_string(), AttributeValue::Integer(max_uid));
        }
        if user.integer(GIDNUMBER).is_none() {
            patch.insert(GIDNUMBER.to_string(), AttributeValue::Integer(default_gid));
        }

        if patch.is_empty() {
            continue;
        }

        match ctx.directory().update_user(&user.id, patch.clone()) {
            Ok(()) => {
                info!(user = %user.id, ?patch, "Assigned POSIX ids");
                report.updated += 1;
            }
            Err(e) => {
                warn!(user = %user.id, error = %e, "Failed to assign POSIX ids, skipping");
                report.failed += 1;
            }
        }
    }

    debug!(?report, max_uid, "User pass complete");
    Ok(report)
}

/// The highest integer `uidnumber` among `users`.
fn highest_uid(users: &[User]) -> Option<i64> {
    users.iter().filter_map(|user| user.integer(UIDNUMBER)).max()
}
