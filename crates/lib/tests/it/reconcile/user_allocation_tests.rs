//! User allocator tests: uniqueness, idempotence, lazy default group and
//! per-user failure isolation.

use posixid::{
    Settings,
    constants::{GIDNUMBER, UIDNUMBER},
    directory::Directory,
    reconcile::{PassReport, allocate_user_ids},
};

use crate::context::TestContext;
use crate::helpers::*;

#[test]
fn test_empty_directory_makes_no_writes() {
    let test = TestContext::new();
    let ctx = test.context();

    let report = allocate_user_ids(&ctx).unwrap();

    assert_eq!(report, PassReport::default());
    assert_eq!(test.directory().writes(), 0);
    assert!(default_groups(test.directory(), test.settings()).is_empty());
}

#[test]
fn test_existing_max_scenario() {
    // One user at 100005, one without: the second gets 100006 and both share
    // the default group's gid.
    let test = TestContext::new()
        .with_user("alice", uid_attributes(100_005))
        .with_user("bob", Default::default());
    let ctx = test.context();

    allocate_user_ids(&ctx).unwrap();

    let directory = test.directory();
    assert_eq!(uid_of(directory, "alice"), Some(100_005));
    assert_eq!(uid_of(directory, "bob"), Some(100_006));

    let groups = default_groups(directory, test.settings());
    assert_eq!(groups.len(), 1);
    let default_gid = test.settings().gid_offset + groups[0].id.0;
    assert_eq!(gid_of(directory, "alice"), Some(default_gid));
    assert_eq!(gid_of(directory, "bob"), Some(default_gid));
}

#[test]
fn test_uids_distinct_for_mixed_user_sets() {
    let shapes: &[&[Option<i64>]] = &[
        &[None, None, None],
        &[Some(100_001), None, Some(100_003), None],
        &[Some(100_050), Some(100_001), None],
        &[None, Some(100_002), None, Some(100_002)],
        &[Some(42), None],
    ];

    for shape in shapes {
        let mut test = TestContext::new();
        for (i, uid) in shape.iter().enumerate() {
            let attributes = uid.map(uid_attributes).unwrap_or_default();
            test = test.with_user(&format!("user{i}"), attributes);
        }
        let ctx = test.context();

        allocate_user_ids(&ctx).unwrap();

        // Pre-existing duplicates and low uids are left alone; every value the
        // pass assigned must be fresh and above the base.
        let users = test.directory().inner.list_users().unwrap();
        let mut assigned = Vec::new();
        for (user, original) in users.iter().zip(shape.iter()) {
            let uid = user.integer(UIDNUMBER).expect("uid assigned");
            match original {
                Some(existing) => assert_eq!(uid, *existing),
                None => assigned.push(uid),
            }
        }
        let base = test.settings().uid_base;
        for uid in &assigned {
            assert!(*uid > base, "assigned uid {uid} not above {base}");
            let occurrences = users
                .iter()
                .filter(|user| user.integer(UIDNUMBER) == Some(*uid))
                .count();
            assert_eq!(occurrences, 1, "uid {uid} collides in {shape:?}");
        }
        assert_all_users_have_gid(test.directory());
    }
}

#[test]
fn test_all_new_users_distinct_above_base() {
    let names: Vec<String> = (0..25).map(|i| format!("u{i:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let test = TestContext::new().with_users(&refs);
    let ctx = test.context();

    let report = allocate_user_ids(&ctx).unwrap();

    assert_eq!(report.scanned, 25);
    assert_eq!(report.updated, 25);
    assert_uids_distinct_above(test.directory(), test.settings().uid_base);
    assert_all_users_have_gid(test.directory());
}

#[test]
fn test_second_pass_changes_nothing() {
    let test = TestContext::new().with_users(&["alice", "bob", "carol"]);
    let ctx = test.context();
    allocate_user_ids(&ctx).unwrap();

    let before = test.directory().inner.list_users().unwrap();
    test.directory().reset_writes();
    let report = allocate_user_ids(&ctx).unwrap();

    assert!(report.is_noop());
    assert_eq!(test.directory().writes(), 0);
    assert_eq!(test.directory().inner.list_users().unwrap(), before);
}

#[test]
fn test_patch_failure_isolated_to_one_user() {
    let test = TestContext::new().with_users(&["alice", "bob", "carol"]);
    test.directory().fail_user("bob");
    let ctx = test.context();

    let report = allocate_user_ids(&ctx).unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.failed, 1);
    let directory = test.directory();
    assert!(uid_of(directory, "alice").is_some());
    assert!(uid_of(directory, "carol").is_some());
    assert_eq!(uid_of(directory, "bob"), None);
    assert_eq!(gid_of(directory, "bob"), None);
}

#[test]
fn test_failed_user_is_healed_by_next_pass() {
    let test = TestContext::new().with_users(&["alice", "bob"]);
    test.directory().fail_user("alice");
    let ctx = test.context();
    allocate_user_ids(&ctx).unwrap();

    test.directory().heal_user("alice");
    let report = allocate_user_ids(&ctx).unwrap();

    assert_eq!(report.updated, 1);
    assert_uids_distinct_above(test.directory(), test.settings().uid_base);
    assert_all_users_have_gid(test.directory());
}

#[test]
fn test_uid_of_failed_patch_not_reused_in_same_pass() {
    let test = TestContext::new().with_users(&["alice", "bob"]);
    test.directory().fail_user("alice");
    let ctx = test.context();

    allocate_user_ids(&ctx).unwrap();

    let base = test.settings().uid_base;
    assert_eq!(uid_of(test.directory(), "bob"), Some(base + 2));
}

#[test]
fn test_default_group_created_once_across_passes() {
    let test = TestContext::new().with_users(&["alice"]);
    let ctx = test.context();
    allocate_user_ids(&ctx).unwrap();

    add_user(test.directory(), "bob");
    allocate_user_ids(&ctx).unwrap();

    let groups = default_groups(test.directory(), test.settings());
    assert_eq!(groups.len(), 1);
    assert_eq!(
        gid_of(test.directory(), "alice"),
        gid_of(test.directory(), "bob")
    );
}

#[test]
fn test_default_group_failure_aborts_pass() {
    let test = TestContext::new().with_users(&["alice", "bob"]);
    test.directory().fail_group_creation(true);
    let ctx = test.context();

    let err = allocate_user_ids(&ctx).unwrap_err();

    assert!(err.is_fatal());
    // Nothing was patched before the default group was resolved
    assert_eq!(uid_of(test.directory(), "alice"), None);
    assert_eq!(test.directory().writes(), 1);
}

#[test]
fn test_explicit_gids_still_resolve_default_group() {
    let test = TestContext::new()
        .with_user("alice", gid_attributes(5000))
        .with_user("bob", gid_attributes(5001));
    let ctx = test.context();

    let report = allocate_user_ids(&ctx).unwrap();

    assert_eq!(report.updated, 2);
    let groups = default_groups(test.directory(), test.settings());
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].integer(GIDNUMBER),
        Some(test.settings().gid_offset + groups[0].id.0)
    );
    // Explicit gids are left alone
    assert_eq!(gid_of(test.directory(), "alice"), Some(5000));
    assert_eq!(gid_of(test.directory(), "bob"), Some(5001));
}

#[test]
fn test_custom_base() {
    let test = TestContext::new()
        .with_settings(Settings::default().with_uid_base(2000))
        .with_users(&["alice"]);
    let ctx = test.context();

    allocate_user_ids(&ctx).unwrap();

    assert_eq!(uid_of(test.directory(), "alice"), Some(2001));
}
