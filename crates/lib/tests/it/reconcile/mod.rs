//! Reconciliation pass integration tests

mod schema_tests;
mod user_allocation_tests;
