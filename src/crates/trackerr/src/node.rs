//! Error chain nodes
//!
//! A [`Trackerr`] is one link of a cause chain. Nodes are immutable and shared
//! through an `Arc`, so the same node can be the cause of several wrapping
//! errors. Every combinator returns a new node; the receiver is never changed.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased cause of a node
type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Identifier issued by a realm
///
/// The realm tag keeps ids from different realms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TrackId {
    pub(crate) realm: u64,
    pub(crate) seq: u64,
}

/// A node in an error cause chain
///
/// Tracked nodes carry an identifier issued by a [`Realm`](crate::Realm);
/// untracked nodes do not. Checkpoint nodes mark module or interface
/// boundaries and their message doubles as the boundary label.
///
/// Equality follows the tracking id: two tracked nodes are equal when they
/// were issued the same id by the same realm, which keeps a wrapped copy of a
/// tracked error equal to the original. Untracked nodes are only equal to
/// themselves (the same shared node).
///
/// # Example
///
/// ```rust
/// use trackerr::{IntRealm, Realm, Trackerr};
///
/// let realm = IntRealm::new();
/// let not_found = realm.track("config file not found");
///
/// let e = not_found.because("no such file or directory");
/// assert_eq!(e, not_found);
/// assert_eq!(e.to_string(), "config file not found");
/// assert!(e.cause().is_some());
/// ```
#[derive(Clone)]
pub struct Trackerr {
    inner: Arc<Node>,
}

struct Node {
    message: String,
    id: Option<TrackId>,
    checkpoint: bool,
    cause: Option<Cause>,
}

impl Trackerr {
    pub(crate) fn from_parts(message: String, id: Option<TrackId>, checkpoint: bool) -> Self {
        Self {
            inner: Arc::new(Node {
                message,
                id,
                checkpoint,
                cause: None,
            }),
        }
    }

    /// Create an untracked error with no cause
    ///
    /// Equivalent to [`Realm::untracked`](crate::Realm::untracked) but needs
    /// no realm since no id is issued.
    pub fn untracked(message: impl Into<String>) -> Self {
        Self::from_parts(message.into(), None, false)
    }

    fn with_cause(&self, cause: Option<Cause>) -> Self {
        Self {
            inner: Arc::new(Node {
                message: self.inner.message.clone(),
                id: self.inner.id,
                checkpoint: self.inner.checkpoint,
                cause,
            }),
        }
    }

    /// Return a copy of this error with `cause` as its underlying cause
    ///
    /// Any previous cause of the copy is replaced.
    #[must_use]
    pub fn wrap<E>(&self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_cause(Some(Arc::new(cause)))
    }

    /// Return a copy of this error caused by a new untracked leaf error
    #[must_use]
    pub fn because(&self, message: impl Into<String>) -> Self {
        self.wrap(Self::untracked(message))
    }

    /// Return a copy of this error caused by a new untracked error which in
    /// turn wraps `cause`
    ///
    /// Inserts one link between this error and the existing chain.
    #[must_use]
    pub fn caused_by<E>(&self, cause: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.wrap(Self::untracked(message).wrap(cause))
    }

    /// Return a copy of this error with a checkpoint inserted between it and
    /// `cause`
    ///
    /// `message` becomes the checkpoint label.
    #[must_use]
    pub fn checkpoint<E>(&self, cause: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.wrap(Self::from_parts(message.into(), None, true).wrap(cause))
    }

    /// Return a copy of this error caused by `cause.because(message)`
    ///
    /// Adds two links at once, e.g. a tracked error and its untracked reason.
    #[must_use]
    pub fn because_of(&self, cause: &Trackerr, message: impl Into<String>) -> Self {
        self.wrap(cause.because(message))
    }

    /// The underlying cause, or `None` at the root of the chain
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.cause.as_deref()
    }

    /// The underlying cause when it is itself a [`Trackerr`]
    pub fn cause_node(&self) -> Option<&Trackerr> {
        self.cause().and_then(|cause| cause.downcast_ref::<Trackerr>())
    }

    /// The node's own message, without any cause text
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Tracking id issued by the realm, `None` for untracked errors
    pub fn id(&self) -> Option<u64> {
        self.inner.id.map(|id| id.seq)
    }

    pub(crate) fn track_id(&self) -> Option<TrackId> {
        self.inner.id
    }

    /// Whether this node itself carries a tracking id
    pub fn is_tracked(&self) -> bool {
        self.id().is_some_and(|id| id >= 1)
    }

    /// Whether this node marks an interface boundary
    pub fn is_checkpoint(&self) -> bool {
        self.inner.checkpoint
    }

    /// Label of the boundary, or `None` when this node is not a checkpoint
    pub fn checkpoint_label(&self) -> Option<&str> {
        self.is_checkpoint().then(|| self.message())
    }
}

// Unlink the chain one node at a time; the default drop glue recurses once
// per link and overflows the stack on long chains.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(mut cause) = next {
            next = Arc::get_mut(&mut cause)
                .and_then(|error| error.downcast_mut::<Trackerr>())
                .and_then(|node| Arc::get_mut(&mut node.inner))
                .and_then(|node| node.cause.take());
        }
    }
}

impl fmt::Display for Trackerr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}

impl fmt::Debug for Trackerr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trackerr")
            .field("id", &self.id())
            .field("message", &self.inner.message)
            .field("checkpoint", &self.inner.checkpoint)
            .field("cause", &self.inner.cause)
            .finish()
    }
}

impl StdError for Trackerr {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl PartialEq for Trackerr {
    fn eq(&self, other: &Self) -> bool {
        match (self.inner.id, other.inner.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => Arc::ptr_eq(&self.inner, &other.inner),
            _ => false,
        }
    }
}

impl Eq for Trackerr {}
