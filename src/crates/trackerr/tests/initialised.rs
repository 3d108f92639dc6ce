//! The initialisation guard seals the process-wide default realm, so these
//! checks live in their own test binary.

use trackerr::{default_realm, err_bug, err_insane, err_todo, initialised, is_initialised, recover};

#[test]
fn test_default_realm_lifecycle() {
    assert_eq!(err_todo().id(), Some(1));
    assert_eq!(err_todo().message(), "TODO: Implementation needed");
    assert_eq!(err_bug().id(), Some(2));
    assert_eq!(err_insane().id(), Some(3));

    let first = trackerr::track("first");
    let second = trackerr::new_error("second");
    let boundary = trackerr::checkpoint("boundary");
    let macro_made = trackerr::track!("made by {}", "macro");

    assert_eq!(first.id(), Some(4));
    assert_eq!(second.id(), Some(5));
    assert_eq!(boundary.id(), Some(6));
    assert!(boundary.is_checkpoint());
    assert_eq!(macro_made.id(), Some(7));
    assert_eq!(default_realm().issued(), 7);

    assert!(!is_initialised());
    initialised();
    assert!(is_initialised());

    let err = recover(|| trackerr::track("too late")).unwrap_err();
    assert_eq!(
        err.message(),
        "No tracked errors may be created after initialisation."
    );
    assert!(recover(|| trackerr::checkpoint("too late")).is_err());
    assert!(recover(|| trackerr::new_error("too late")).is_err());

    let still_fine = trackerr::untracked("untracked is allowed");
    assert!(!still_fine.is_tracked());
    assert_eq!(default_realm().issued(), 7);

    let todo = err_todo().because("still reachable after sealing");
    assert_eq!(&todo, err_todo());
}
