//! Plugin integration tests: startup ordering, event dispatch and
//! serialized passes.

use std::sync::Arc;
use std::thread;

use posixid::{
    Context, Plugin, Settings,
    constants::GIDNUMBER,
    directory::{Attributes, Directory, GroupFilter},
    plugin::{EventArgs, HandlerRegistry},
};

use crate::context::TestContext;
use crate::helpers::*;

fn registry_for(plugin: &Arc<Plugin>) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    plugin.register(&mut registry);
    registry
}

#[test]
fn test_startup_on_fresh_directory() {
    let directory = Arc::new(FaultyDirectory::new());
    directory
        .inner
        .create_group("lldap_admin", Attributes::new())
        .unwrap();
    let plugin = Plugin::new(Context::new(directory.clone(), Settings::default()));

    // The group above was created before the schema existed; startup declares
    // the schema before any group is patched.
    let report = plugin.init().unwrap();

    assert_eq!(report.attributes_created, 3);
    assert_eq!(report.groups.updated, 1);
    assert!(report.users.is_noop());
    let groups = directory.list_groups(&GroupFilter::All).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].integer(GIDNUMBER),
        Some(Settings::default().gid_offset + 1)
    );
}

#[test]
fn test_startup_reconciles_existing_identities() {
    let test = TestContext::new()
        .with_users(&["alice", "bob"])
        .with_group("staff", Attributes::new());
    let plugin = test.plugin();

    let report = plugin.init().unwrap();

    assert_eq!(report.attributes_created, 0);
    assert_eq!(report.users.updated, 2);
    // "staff" plus the default group created during the user pass
    assert_eq!(report.groups.scanned, 2);
    assert_eq!(report.groups.updated, 1);
    assert_uids_distinct_above(test.directory(), test.settings().uid_base);
    assert_all_users_have_gid(test.directory());
}

#[test]
fn test_startup_aborts_when_schema_rejected() {
    let directory = Arc::new(FaultyDirectory::new());
    directory.inner.add_user("alice", Attributes::new()).unwrap();
    directory.fail_schema_changes(true);
    let plugin = Plugin::new(Context::new(directory.clone(), Settings::default()));

    let err = plugin.init().unwrap_err();

    assert!(err.is_fatal());
    assert!(default_groups(&directory, &Settings::default()).is_empty());
}

#[test]
fn test_user_created_event() {
    let test = TestContext::new();
    let plugin = test.plugin();
    plugin.init().unwrap();
    let registry = registry_for(&plugin);

    add_user(test.directory(), "alice");
    let args = EventArgs::UserCreated {
        user: user(test.directory(), "alice"),
    };
    let returned = registry.dispatch(args.clone()).unwrap();

    assert_eq!(returned, args);
    assert_eq!(uid_of(test.directory(), "alice"), Some(test.settings().uid_base + 1));
    assert!(gid_of(test.directory(), "alice").is_some());
}

#[test]
fn test_group_created_event_ignores_users() {
    let test = TestContext::new().with_users(&["alice"]);
    let plugin = test.plugin();
    let registry = registry_for(&plugin);

    let id = add_group(test.directory(), "staff");
    let args = EventArgs::GroupCreated {
        group: test.directory().inner.group(id).unwrap(),
    };
    let returned = registry.dispatch(args.clone()).unwrap();

    assert_eq!(returned, args);
    assert_eq!(uid_of(test.directory(), "alice"), None);
    assert!(default_groups(test.directory(), test.settings()).is_empty());
}

#[test]
fn test_fatal_error_propagates_through_dispatch() {
    let test = TestContext::new();
    let plugin = test.plugin();
    let registry = registry_for(&plugin);
    test.directory().fail_group_creation(true);

    add_user(test.directory(), "alice");
    let err = registry
        .dispatch(EventArgs::UserCreated {
            user: user(test.directory(), "alice"),
        })
        .unwrap_err();

    assert!(err.is_fatal());
}

#[test]
fn test_concurrent_events_through_one_plugin() {
    let test = TestContext::new();
    let plugin = test.plugin();
    let registry = Arc::new(registry_for(&plugin));
    let directory = test.directory().clone();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                let name = format!("user{i}");
                add_user(&directory, &name);
                let args = EventArgs::UserCreated {
                    user: user(&directory, &name),
                };
                registry.dispatch(args).expect("dispatch failed");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(directory.inner.user_count(), 8);
    assert_uids_distinct_above(&directory, test.settings().uid_base);
    assert_all_users_have_gid(&directory);
    assert_eq!(default_groups(&directory, test.settings()).len(), 1);
}
