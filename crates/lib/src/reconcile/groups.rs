//! Group id allocation.
//!
//! A group's `gidnumber` is its directory id plus the configured offset.
//! Directory ids are unique, so no scan for a maximum is needed.

use tracing::{debug, error, info, warn};

use super::{Context, PassReport, ReconcileError};
use crate::Result;
use crate::constants::GIDNUMBER;
use crate::directory::{AttributeValue, Attributes, GroupFilter};

/// Assign a `gidnumber` to every group missing one.
///
/// Per-group failures, including an offset that overflows, are logged and
/// skipped.
///
/// # Errors
/// Only a failure to list groups aborts the pass.
pub fn allocate_group_ids(ctx: &Context) -> Result<PassReport> {
    let groups = ctx
        .directory()
        .list_groups(&GroupFilter::All)
        .map_err(|source| {
            error!(error = %source, "Failed to list groups");
            ReconcileError::ListingFailed {
                what: "groups",
                source,
            }
        })?;

    let mut report = PassReport {
        scanned: groups.len(),
        ..PassReport::default()
    };

    for group in groups.iter().filter(|group| group.integer(GIDNUMBER).is_none()) {
        let gid = match ctx.gid_for(group.id) {
            Ok(gid) => gid,
            Err(e) => {
                warn!(group = %group.display_name, id = %group.id, error = %e, "Cannot derive gidnumber, skipping");
                report.failed += 1;
                continue;
            }
        };

        let attributes = Attributes::from([(GIDNUMBER.to_string(), AttributeValue::Integer(gid))]);
        match ctx.directory().update_group(group.id, attributes) {
            Ok(()) => {
                info!(group = %group.display_name, id = %group.id, gid, "Assigned gidnumber");
                report.updated += 1;
            }
            Err(e) => {
                warn!(group = %group.display_name, id = %group.id, error = %e, "Failed to assign gidnumber, skipping");
                report.failed += 1;
            }
        }
    }

    debug!(?report, "Group pass complete");
    Ok(report)
}
