//! Subcommand implementations.

pub mod group;
pub mod init;
pub mod list;
pub mod user;

use posixid::reconcile::PassReport;

pub(crate) fn pass_json(report: &PassReport) -> serde_json::Value {
    serde_json::json!({
        "scanned": report.scanned,
        "updated": report.updated,
        "failed": report.failed,
    })
}
