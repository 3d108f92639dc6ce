//! Cause chain traversal and predicates
//!
//! Chains are walked through [`std::error::Error::source`], so foreign errors
//! (I/O errors, `thiserror` enums, boxed errors) take part like any
//! [`Trackerr`]. Membership tests match chain elements by downcasting to the
//! target's type and comparing with `==`, which lets each type decide what
//! "the same error" means.
//!
//! # Example
//!
//! ```rust
//! use trackerr::{all_ordered, as_stack, IntRealm, Realm};
//!
//! let realm = IntRealm::new();
//! let parse = realm.track("parse failed");
//! let read = realm.track("read failed");
//!
//! let e = read.wrap(parse.because("unexpected EOF"));
//!
//! assert_eq!(as_stack(Some(&e)).len(), 3);
//! assert!(all_ordered(&e, &[&read, &parse]));
//! assert!(!all_ordered(&e, &[&parse, &read]));
//! ```

use crate::node::Trackerr;
use std::collections::HashSet;
use std::error::Error as StdError;
use tracing::warn;

/// Flatten the cause chain into a vector, outermost error first
///
/// Returns an empty vector for `None`. Chains built only from [`Trackerr`]
/// nodes are acyclic by construction; a foreign `source` that leads back to
/// an element already visited ends the traversal there.
pub fn linearize<'a>(e: Option<&'a (dyn StdError + 'static)>) -> Vec<&'a (dyn StdError + 'static)> {
    walk(e, usize::MAX)
}

/// Flatten the cause chain, keeping at most `max_depth` elements
///
/// Used where the caller asks for a shortened trace.
pub fn linearize_bounded<'a>(
    e: Option<&'a (dyn StdError + 'static)>,
    max_depth: usize,
) -> Vec<&'a (dyn StdError + 'static)> {
    walk(e, max_depth)
}

fn walk<'a>(
    e: Option<&'a (dyn StdError + 'static)>,
    max_depth: usize,
) -> Vec<&'a (dyn StdError + 'static)> {
    let mut stack = Vec::new();
    let mut seen: HashSet<*const ()> = HashSet::new();
    let mut current = e;

    while let Some(error) = current {
        if stack.len() == max_depth {
            break;
        }
        // Keyed on the data address; vtable pointers are not unique per type.
        if !seen.insert(error as *const (dyn StdError + 'static) as *const ()) {
            warn!(depth = stack.len(), "error chain cycle detected");
            break;
        }
        stack.push(error);
        current = error.source();
    }

    stack
}

/// Alias for [`linearize`] for callers who want raw chain data
pub fn as_stack<'a>(e: Option<&'a (dyn StdError + 'static)>) -> Vec<&'a (dyn StdError + 'static)> {
    linearize(e)
}

/// Get the root cause of an error chain
pub fn root_cause<'a>(e: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    linearize(Some(e)).pop().unwrap_or(e)
}

/// Count the number of errors in an error chain (minimum 1)
pub fn chain_length(e: &(dyn StdError + 'static)) -> usize {
    linearize(Some(e)).len()
}

/// Whether the error itself carries a tracking id
///
/// Causes are not inspected; see [`has_tracked`].
pub fn is_tracked(e: &(dyn StdError + 'static)) -> bool {
    e.downcast_ref::<Trackerr>()
        .is_some_and(Trackerr::is_tracked)
}

/// Whether the error or any of its causes carries a tracking id
pub fn has_tracked(e: &(dyn StdError + 'static)) -> bool {
    linearize(Some(e)).into_iter().any(is_tracked)
}

/// Whether the error itself is a checkpoint
pub fn is_checkpoint(e: &(dyn StdError + 'static)) -> bool {
    e.downcast_ref::<Trackerr>()
        .is_some_and(Trackerr::is_checkpoint)
}

fn matches<E>(element: &(dyn StdError + 'static), target: &E) -> bool
where
    E: StdError + PartialEq + 'static,
{
    element.downcast_ref::<E>().is_some_and(|candidate| candidate == target)
}

/// Whether `target` appears anywhere in the chain of `e`, `e` included
pub fn is<E>(e: &(dyn StdError + 'static), target: &E) -> bool
where
    E: StdError + PartialEq + 'static,
{
    linearize(Some(e))
        .into_iter()
        .any(|element| matches(element, target))
}

/// Whether every target appears in the chain
///
/// True for an empty target list. All targets share one type; to mix a
/// [`Trackerr`] with a foreign error, combine separate [`is`] calls.
pub fn all<E>(e: &(dyn StdError + 'static), targets: &[&E]) -> bool
where
    E: StdError + PartialEq + 'static,
{
    targets.iter().all(|target| is(e, *target))
}

/// Whether at least one target appears in the chain
///
/// False for an empty target list. As with [`all`], the targets share one
/// type.
pub fn any<E>(e: &(dyn StdError + 'static), targets: &[&E]) -> bool
where
    E: StdError + PartialEq + 'static,
{
    targets.iter().any(|target| is(e, *target))
}

/// Whether the targets appear in the chain in the given order
///
/// The targets must form a subsequence, not necessarily contiguous, of the
/// chain read from `e` towards the root cause. Each target must match at a
/// position after the previous target's match. True for an empty list.
/// The targets share one type.
pub fn all_ordered<E>(e: &(dyn StdError + 'static), targets: &[&E]) -> bool
where
    E: StdError + PartialEq + 'static,
{
    let mut next = 0;

    for element in linearize(Some(e)) {
        if next == targets.len() {
            break;
        }
        if matches(element, targets[next]) {
            next += 1;
        }
    }

    next == targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realm::{IntRealm, Realm};
    use std::fmt;

    struct Fixtures {
        untracked_alpha: Trackerr,
        untracked_beta: Trackerr,
        untracked_charlie: Trackerr,
        tracked_alpha: Trackerr,
        tracked_beta: Trackerr,
        tracked_charlie: Trackerr,
    }

    fn fixtures() -> Fixtures {
        let realm = IntRealm::new();
        Fixtures {
            untracked_alpha: Trackerr::untracked("untracked alpha"),
            untracked_beta: Trackerr::untracked("untracked beta"),
            untracked_charlie: Trackerr::untracked("untracked charlie"),
            tracked_alpha: realm.track("tracked alpha"),
            tracked_beta: realm.track("tracked beta"),
            tracked_charlie: realm.track("tracked charlie"),
        }
    }

    /// An error whose `source` points back at a shared static
    #[derive(Debug)]
    struct Ouroboros(u8);

    static LOOP: Ouroboros = Ouroboros(0);

    impl fmt::Display for Ouroboros {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "ouroboros {}", self.0)
        }
    }

    impl StdError for Ouroboros {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&LOOP)
        }
    }

    #[test]
    fn test_linearize_none_is_empty() {
        assert!(linearize(None).is_empty());
    }

    #[test]
    fn test_linearize_order() {
        let f = fixtures();
        let c = f.untracked_charlie.clone();
        let b = f.untracked_beta.wrap(c.clone());
        let a = f.untracked_alpha.wrap(b.clone());

        let stack = linearize(Some(&a));
        let messages: Vec<String> = stack.iter().map(|e| e.to_string()).collect();

        assert_eq!(
            messages,
            vec!["untracked alpha", "untracked beta", "untracked charlie"]
        );
        assert!(stack.last().unwrap().source().is_none());
    }

    #[test]
    fn test_linearize_stops_at_cycle() {
        assert_eq!(chain_length(&LOOP), 1);

        let head = Ouroboros(1);
        let messages: Vec<String> = linearize(Some(&head)).iter().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["ouroboros 1", "ouroboros 0"]);
    }

    #[test]
    fn test_linearize_bounded() {
        let f = fixtures();
        let e = f.untracked_alpha.wrap(f.untracked_beta.because("gamma"));

        assert_eq!(linearize_bounded(Some(&e), 2).len(), 2);
        assert_eq!(linearize_bounded(Some(&e), 10).len(), 3);
        assert!(linearize_bounded(Some(&e), 0).is_empty());
    }

    #[test]
    fn test_deep_chain_is_walked_to_the_root() {
        let realm = IntRealm::new();
        let root = realm.track("tracked root");

        let mut e = root.clone();
        for _ in 0..5000 {
            e = Trackerr::untracked("link").wrap(e);
        }

        let stack = linearize(Some(&e));
        assert_eq!(stack.len(), 5001);
        assert!(stack.last().unwrap().source().is_none());
        assert!(has_tracked(&e));
        assert!(is(&e, &root));
        assert_eq!(root_cause(&e).to_string(), "tracked root");
    }

    #[test]
    fn test_root_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let e = Trackerr::untracked("outer").caused_by(io, "middle");

        assert_eq!(root_cause(&e).to_string(), "File not found");
        assert_eq!(chain_length(&e), 3);
    }

    #[test]
    fn test_is_tracked() {
        let f = fixtures();
        assert!(is_tracked(&f.tracked_alpha));
        assert!(!is_tracked(&f.untracked_alpha));
    }

    #[test]
    fn test_is_tracked_ignores_causes() {
        let f = fixtures();
        let e = f.untracked_alpha.wrap(f.tracked_alpha.clone());
        assert!(!is_tracked(&e));
    }

    #[test]
    fn test_is_tracked_foreign_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "io");
        assert!(!is_tracked(&io));
    }

    #[test]
    fn test_has_tracked() {
        let f = fixtures();
        let b = f.untracked_beta.wrap(f.tracked_charlie.clone());
        let a = f.untracked_alpha.wrap(b);

        assert!(has_tracked(&a));
    }

    #[test]
    fn test_has_tracked_none() {
        let f = fixtures();
        let b = f.untracked_beta.wrap(f.untracked_charlie.clone());
        let a = f.untracked_alpha.wrap(b);

        assert!(!has_tracked(&a));
    }

    #[test]
    fn test_is_checkpoint() {
        let realm = IntRealm::new();
        assert!(is_checkpoint(&realm.checkpoint("API")));
        assert!(!is_checkpoint(&realm.track("not a boundary")));
    }

    #[test]
    fn test_is_matches_wrapped_tracked() {
        let f = fixtures();
        let e = Trackerr::untracked("outer").wrap(f.tracked_beta.because("why"));

        assert!(is(&e, &f.tracked_beta));
        assert!(!is(&e, &f.tracked_alpha));
    }

    #[test]
    fn test_is_foreign_target() {
        #[derive(Debug, PartialEq, thiserror::Error)]
        #[error("quota exceeded for {0}")]
        struct QuotaExceeded(String);

        let e = Trackerr::untracked("upload failed").wrap(QuotaExceeded("alice".into()));

        assert!(is(&e, &QuotaExceeded("alice".into())));
        assert!(!is(&e, &QuotaExceeded("bob".into())));
    }

    #[test]
    fn test_mixed_target_types() {
        #[derive(Debug, PartialEq, thiserror::Error)]
        #[error("quota exceeded")]
        struct QuotaExceeded;

        let f = fixtures();
        let e = f.untracked_alpha.wrap(f.tracked_alpha.wrap(QuotaExceeded));

        assert!(is(&e, &f.tracked_alpha) && is(&e, &QuotaExceeded));
        assert!(!(is(&e, &f.tracked_beta) && is(&e, &QuotaExceeded)));
    }

    #[test]
    fn test_all() {
        let f = fixtures();
        let c = f.untracked_charlie.clone();
        let b = f.untracked_beta.wrap(c.clone());
        let a = f.untracked_alpha.wrap(b.clone());

        assert!(all::<Trackerr>(&a, &[]));
        assert!(all(&a, &[&a, &b, &c]));
        assert!(!all(&a, &[&a, &b, &f.tracked_charlie]));
    }

    #[test]
    fn test_any() {
        let f = fixtures();
        let c = f.untracked_charlie.clone();
        let b = f.untracked_beta.wrap(c.clone());
        let a = f.untracked_alpha.wrap(b.clone());

        assert!(any(&a, &[&a]));
        assert!(any(&a, &[&a, &b]));
        assert!(any(&a, &[&a, &b, &c]));
        assert!(any(&a, &[&b, &c]));
        assert!(any(&a, &[&c]));

        assert!(!any::<Trackerr>(&a, &[]));
        assert!(!any(
            &a,
            &[&f.tracked_alpha, &f.tracked_beta, &f.tracked_charlie]
        ));
    }

    #[test]
    fn test_all_ordered() {
        let f = fixtures();
        let cu = f.untracked_charlie.clone();
        let ct = f.tracked_charlie.wrap(cu.clone());
        let bu = f.untracked_beta.wrap(ct.clone());
        let bt = f.tracked_beta.wrap(bu.clone());
        let au = f.untracked_alpha.wrap(bt.clone());
        let at = f.tracked_alpha.wrap(au.clone());

        let e = &at;

        assert!(all_ordered::<Trackerr>(e, &[]));

        assert!(all_ordered(e, &[&at, &au]));
        assert!(!all_ordered(e, &[&au, &at]));

        assert!(all_ordered(e, &[&at, &au, &bt, &bu, &ct, &cu]));
        assert!(!all_ordered(e, &[&at, &bt, &bu, &au, &ct, &cu]));
        assert!(!all_ordered(e, &[&at, &au, &bt, &bu, &cu, &ct]));
    }

    #[test]
    fn test_all_ordered_missing_target() {
        let f = fixtures();
        let e = f.untracked_alpha.wrap(f.untracked_beta.clone());

        assert!(!all_ordered(&e, &[&e, &f.tracked_alpha]));
        assert!(all_ordered(&e, &[&e, &f.untracked_beta]));
        assert!(!all_ordered(&e, &[&f.untracked_alpha]));
    }
}
