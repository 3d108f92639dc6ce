//! Process-wide default realm
//!
//! Most programs need a single realm. This module owns one, created on first
//! use, and forwards the package-level constructors to it.
//!
//! Call [`initialised`] once start-up is complete; any tracked error created
//! through the default realm afterwards panics, which keeps the set of tracked
//! errors enumerable from the program's statics.
//!
//! ```rust,no_run
//! fn main() {
//!     let _ = trackerr::track("Workflow failed");
//!     trackerr::initialised();
//!
//!     // From here on, trackerr::track panics.
//! }
//! ```

use crate::node::Trackerr;
use crate::realm::{IntRealm, Realm};
use once_cell::sync::Lazy;

struct DefaultRealm {
    realm: IntRealm,
    todo: Trackerr,
    bug: Trackerr,
    insane: Trackerr,
}

// The convenience errors are issued with the realm so they exist before any
// call to `initialised`.
static DEFAULT_REALM: Lazy<DefaultRealm> = Lazy::new(|| {
    let realm = IntRealm::new();
    let todo = realm.track("TODO: Implementation needed");
    let bug = realm.track("BUG: Fix needed");
    let insane = realm.track("Sanity check failed!!");

    DefaultRealm {
        realm,
        todo,
        bug,
        insane,
    }
});

/// The realm behind the package-level constructors
pub fn default_realm() -> &'static IntRealm {
    &DEFAULT_REALM.realm
}

/// Tracked error marking unfinished code
///
/// ```rust
/// fn parse_v2(_input: &str) -> Result<(), trackerr::Trackerr> {
///     Err(trackerr::err_todo().because("v2 format"))
/// }
///
/// let e = parse_v2("").unwrap_err();
/// assert_eq!(&e, trackerr::err_todo());
/// ```
pub fn err_todo() -> &'static Trackerr {
    &DEFAULT_REALM.todo
}

/// Tracked error for the site of a known bug
pub fn err_bug() -> &'static Trackerr {
    &DEFAULT_REALM.bug
}

/// Tracked error for failed sanity checks
pub fn err_insane() -> &'static Trackerr {
    &DEFAULT_REALM.insane
}

/// Seal the default realm so future calls to [`track`], [`new_error`] and
/// [`checkpoint`] panic
pub fn initialised() {
    tracing::debug!("default realm sealed");
    DEFAULT_REALM.realm.seal();
}

/// Whether [`initialised`] has been called
pub fn is_initialised() -> bool {
    DEFAULT_REALM.realm.is_sealed()
}

/// Create a tracked error from the default realm
///
/// # Panics
///
/// Panics after [`initialised`] has been called.
pub fn track(message: impl Into<String>) -> Trackerr {
    DEFAULT_REALM.realm.track(message)
}

/// Alias for [`track`]
///
/// # Panics
///
/// Panics after [`initialised`] has been called.
pub fn new_error(message: impl Into<String>) -> Trackerr {
    DEFAULT_REALM.realm.new_error(message)
}

/// Create a tracked checkpoint error from the default realm
///
/// # Panics
///
/// Panics after [`initialised`] has been called.
pub fn checkpoint(message: impl Into<String>) -> Trackerr {
    DEFAULT_REALM.realm.checkpoint(message)
}

/// Create an untracked error
pub fn untracked(message: impl Into<String>) -> Trackerr {
    DEFAULT_REALM.realm.untracked(message)
}
