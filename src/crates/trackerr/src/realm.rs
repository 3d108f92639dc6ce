//! Tracking id allocation
//!
//! A realm is the unit of uniqueness for tracking ids: every tracked error it
//! issues gets the next number in a strictly increasing sequence starting at
//! one. Ids from different realms never compare equal.

use crate::node::{TrackId, Trackerr};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{error, trace};

/// Source of realm tags, one per realm in the process
static NEXT_REALM_TAG: AtomicU64 = AtomicU64::new(1);

const SEALED_MESSAGE: &str = "No tracked errors may be created after initialisation.";

/// A space in which every tracked error has its own unique id
///
/// Realms are designed to be used while a program initialises its error
/// values, typically when building statics or in start-up code.
pub trait Realm {
    /// Create a tracked error with a freshly issued id and no cause
    fn track(&self, message: impl Into<String>) -> Trackerr;

    /// Alias for [`Realm::track`]
    fn new_error(&self, message: impl Into<String>) -> Trackerr {
        self.track(message)
    }

    /// Create a tracked error that marks an interface boundary
    fn checkpoint(&self, message: impl Into<String>) -> Trackerr;

    /// Create an untracked error; no id is issued
    fn untracked(&self, message: impl Into<String>) -> Trackerr {
        Trackerr::untracked(message)
    }
}

/// A [`Realm`] backed by an incrementing integer
///
/// The counter is atomic so a realm can be shared between threads. Once
/// [`sealed`](IntRealm::seal), any further tracked construction panics; this
/// keeps the set of tracked errors fixed after start-up.
///
/// # Example
///
/// ```rust
/// use trackerr::{IntRealm, Realm};
///
/// let realm = IntRealm::new();
/// assert_eq!(realm.track("first").id(), Some(1));
/// assert_eq!(realm.track("second").id(), Some(2));
/// ```
#[derive(Debug)]
pub struct IntRealm {
    tag: u64,
    counter: AtomicU64,
    sealed: AtomicBool,
}

impl IntRealm {
    /// Create a realm whose first issued id is 1
    pub fn new() -> Self {
        Self {
            tag: NEXT_REALM_TAG.fetch_add(1, Ordering::Relaxed),
            counter: AtomicU64::new(0),
            sealed: AtomicBool::new(false),
        }
    }

    /// Forbid any further tracked construction through this realm
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::SeqCst);
    }

    /// Whether [`IntRealm::seal`] has been called
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::SeqCst)
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// # Panics
    ///
    /// Panics when the realm has been sealed.
    fn next_id(&self) -> TrackId {
        if self.is_sealed() {
            error!(realm = self.tag, "tracked error created after initialisation");
            std::panic::panic_any(Trackerr::untracked(SEALED_MESSAGE));
        }

        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(realm = self.tag, id = seq, "issued tracking id");

        TrackId {
            realm: self.tag,
            seq,
        }
    }
}

impl Default for IntRealm {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Realm> Realm for &R {
    fn track(&self, message: impl Into<String>) -> Trackerr {
        (**self).track(message)
    }

    fn checkpoint(&self, message: impl Into<String>) -> Trackerr {
        (**self).checkpoint(message)
    }
}

impl Realm for IntRealm {
    /// # Panics
    ///
    /// Panics when the realm has been sealed.
    fn track(&self, message: impl Into<String>) -> Trackerr {
        Trackerr::from_parts(message.into(), Some(self.next_id()), false)
    }

    /// # Panics
    ///
    /// Panics when the realm has been sealed.
    fn checkpoint(&self, message: impl Into<String>) -> Trackerr {
        Trackerr::from_parts(message.into(), Some(self.next_id()), true)
    }
}
