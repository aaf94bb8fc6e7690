//! Schema ensurer tests against a directory that rejects declarations.

use std::sync::Arc;

use posixid::{
    Context, Settings,
    constants::{GIDNUMBER, UIDNUMBER},
    directory::{AttributeScope, Directory},
    reconcile::{REQUIRED_ATTRIBUTES, ReconcileError, ensure_schema},
};

use crate::helpers::FaultyDirectory;

#[test]
fn test_declares_three_attributes_with_fixed_flags() {
    let directory = Arc::new(FaultyDirectory::new());
    let ctx = Context::new(directory.clone(), Settings::default());

    assert_eq!(ensure_schema(&ctx).unwrap(), REQUIRED_ATTRIBUTES.len());
    assert_eq!(directory.writes(), 3);

    let schema = directory.get_schema().unwrap();
    for required in REQUIRED_ATTRIBUTES {
        let declared = schema
            .attributes(required.scope)
            .get(required.name)
            .expect("attribute declared");
        assert!(!declared.is_list);
        assert!(declared.is_visible);
        assert!(!declared.is_editable);
    }
    assert!(schema.user_attributes.contains_key(UIDNUMBER));
    assert!(schema.user_attributes.contains_key(GIDNUMBER));
    assert!(schema.group_attributes.contains_key(GIDNUMBER));
}

#[test]
fn test_rerun_performs_no_writes() {
    let directory = Arc::new(FaultyDirectory::new());
    let ctx = Context::new(directory.clone(), Settings::default());
    ensure_schema(&ctx).unwrap();
    directory.reset_writes();

    assert_eq!(ensure_schema(&ctx).unwrap(), 0);
    assert_eq!(directory.writes(), 0);
}

#[test]
fn test_rejected_declaration_is_fatal() {
    let directory = Arc::new(FaultyDirectory::new());
    directory.fail_schema_changes(true);
    let ctx = Context::new(directory.clone(), Settings::default());

    let err = ensure_schema(&ctx).unwrap_err();
    assert!(err.is_fatal());
    match err {
        posixid::Error::Reconcile(ReconcileError::SchemaAttributeCreation { scope, name, .. }) => {
            assert_eq!(scope, AttributeScope::User);
            assert_eq!(name, UIDNUMBER);
        }
        other => panic!("Unexpected error: {other}"),
    }
    // Aborted at the first attribute
    assert_eq!(directory.writes(), 1);
}

#[test]
fn test_recovers_once_directory_accepts() {
    let directory = Arc::new(FaultyDirectory::new());
    let ctx = Context::new(directory.clone(), Settings::default());

    directory.fail_schema_changes(true);
    assert!(ensure_schema(&ctx).is_err());

    directory.fail_schema_changes(false);
    assert_eq!(ensure_schema(&ctx).unwrap(), 3);
}
