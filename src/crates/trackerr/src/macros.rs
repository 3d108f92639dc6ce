//! Formatting constructors

/// Create an untracked error from a format string
///
/// ```rust
/// let e = trackerr::untracked!("row {} is malformed", 3);
/// assert_eq!(e.to_string(), "row 3 is malformed");
/// ```
#[macro_export]
macro_rules! untracked {
    ($($arg:tt)*) => {
        $crate::Trackerr::untracked(format!($($arg)*))
    };
}

/// Create a tracked error from a format string
///
/// With a leading realm expression the error is issued by that realm,
/// otherwise by the default realm.
///
/// ```rust
/// use trackerr::IntRealm;
///
/// let realm = IntRealm::new();
/// let e = trackerr::track!(realm => "abc{}{}{}", 1, 2, 3);
/// assert_eq!(e.to_string(), "abc123");
/// assert_eq!(e.id(), Some(1));
/// ```
#[macro_export]
macro_rules! track {
    ($realm:expr => $($arg:tt)*) => {
        $crate::Realm::track(&$realm, format!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::track(format!($($arg)*))
    };
}

/// Create a tracked checkpoint error from a format string
///
/// Accepts an optional leading realm the same way as [`track!`].
#[macro_export]
macro_rules! checkpoint {
    ($realm:expr => $($arg:tt)*) => {
        $crate::Realm::checkpoint(&$realm, format!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::checkpoint(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use crate::IntRealm;

    #[test]
    fn test_untracked_macro() {
        let e = untracked!("abc{}{}{}", 1, 2, 3);
        assert_eq!(e.message(), "abc123");
        assert!(!e.is_tracked());
    }

    #[test]
    fn test_track_macro_with_realm() {
        let realm = IntRealm::new();
        let a = track!(realm => "first {}", "error");
        let b = track!(realm => "second");

        assert_eq!(a.message(), "first error");
        assert_eq!(a.id(), Some(1));
        assert_eq!(b.id(), Some(2));
    }

    #[test]
    fn test_checkpoint_macro_with_realm() {
        let realm = IntRealm::new();
        let e = checkpoint!(realm => "{} API", "Storage");

        assert!(e.is_checkpoint());
        assert_eq!(e.message(), "Storage API");
        assert_eq!(e.id(), Some(1));
    }
}
