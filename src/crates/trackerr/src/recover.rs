//! Converting panics into error chains
//!
//! Two modes are offered at a function boundary:
//!
//! - [`recover`] turns a panic into a returned [`Trackerr`]
//! - [`debug_panic`] with an output slot stores the converted error there;
//!   without a slot it prints the stack and lets the panic continue
//!
//! A panic whose payload already is a [`Trackerr`] (raised with
//! [`std::panic::panic_any`]) is handed back unchanged.

use crate::node::Trackerr;
use crate::render::debug;
use std::any::Any;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug as log_debug;

/// Convert a caught panic payload into an error chain node
pub fn from_panic_payload(payload: &(dyn Any + Send)) -> Trackerr {
    if let Some(node) = payload.downcast_ref::<Trackerr>() {
        return node.clone();
    }
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return Trackerr::untracked(*message);
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return Trackerr::untracked(message.as_str());
    }
    if let Some(error) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
        return Trackerr::untracked(error.to_string());
    }
    Trackerr::untracked("unknown panic payload")
}

/// Run `f`, converting a panic into a returned error
///
/// # Example
///
/// ```rust
/// let result = trackerr::recover(|| -> u32 { panic!("division by zero") });
/// assert_eq!(result.unwrap_err().message(), "division by zero");
/// ```
pub fn recover<F, T>(f: F) -> Result<T, Trackerr>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let error = from_panic_payload(&*payload);
        log_debug!(error = %error, "recovered from panic");
        error
    })
}

/// Run `f` with a panic guard
///
/// Returns `Some` with the closure's value when it completes. On panic:
///
/// - with a `slot`, the converted error is stored in it and `None` is returned
/// - without one, the stack is printed via [`debug`] and the original panic
///   is resumed
pub fn debug_panic<F, T>(slot: Option<&mut Option<Trackerr>>, f: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => return Some(value),
        Err(payload) => payload,
    };

    let error = from_panic_payload(&*payload);

    match slot {
        Some(slot) => {
            log_debug!(error = %error, "recovered from panic into output slot");
            *slot = Some(error);
            None
        }
        None => {
            // A failed print must not mask the panic.
            let _ = debug(Some(&error));
            panic::resume_unwind(payload)
        }
    }
}
