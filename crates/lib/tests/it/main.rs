/*! Integration tests for posixid.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - directory: Tests for the in-memory directory and its persistence
 * - reconcile: Tests for the schema, default group, user and group passes
 * - plugin: Tests for event dispatch through the host handler registry
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("posixid=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod plugin;
mod reconcile;
