//! Stack trace rendering
//!
//! Turns a cause chain into a readable, multi-line trace:
//!
//! ```text
//!   Failed to execute workflow
//! ⤷ Could not read input
//! ——Storage API——
//! ⤷ disk unplugged
//! ```
//!
//! Each element is printed with its own text only. Foreign errors that build
//! their message by appending the cause (`"{msg}: {cause}"`) have the
//! duplicated suffix removed. Checkpoints print as fenced separator lines.

use crate::chain::linearize;
use crate::node::Trackerr;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::io::{self, Write};

/// Text rendered in place of a chain when there is no error
pub const NIL_ERROR: &str = "<nil error>";

/// Tokens used to lay out a rendered stack trace
///
/// The defaults render
///
/// ```text
///   abc
/// ⤷ efg
/// ——hij——
/// ⤷ klm
/// ```
///
/// for a chain `abc ← efg ← checkpoint(hij) ← klm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackStyle {
    /// Written once before the first element
    pub prefix: String,
    /// Written between elements
    pub delimiter: String,
    /// Written before a checkpoint element instead of `delimiter`
    pub checkpoint_delimiter: String,
    /// Written on both sides of a checkpoint label
    pub checkpoint_fence: String,
    /// Written once after the last element
    pub suffix: String,
    /// Separator trimmed after a duplicated cause suffix is removed
    pub cause_separator: String,
}

impl Default for StackStyle {
    fn default() -> Self {
        Self {
            prefix: "  ".to_string(),
            delimiter: "\n⤷ ".to_string(),
            checkpoint_delimiter: "\n".to_string(),
            checkpoint_fence: "——".to_string(),
            suffix: "\n".to_string(),
            cause_separator: ":".to_string(),
        }
    }
}

impl StackStyle {
    /// Create a style from the four layout tokens
    ///
    /// The checkpoint fence and cause separator keep their defaults.
    pub fn new(
        prefix: impl Into<String>,
        delimiter: impl Into<String>,
        checkpoint_delimiter: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: delimiter.into(),
            checkpoint_delimiter: checkpoint_delimiter.into(),
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    /// Set the fence written around checkpoint labels
    pub fn with_checkpoint_fence(mut self, fence: impl Into<String>) -> Self {
        self.checkpoint_fence = fence.into();
        self
    }

    /// Set the separator trimmed from duplicated cause text
    pub fn with_cause_separator(mut self, separator: impl Into<String>) -> Self {
        self.cause_separator = separator.into();
        self
    }

    /// Render the chain starting at `e`
    pub fn render(&self, e: Option<&(dyn StdError + 'static)>) -> String {
        match e {
            Some(_) => self.render_stack(&linearize(e)),
            None => format!("{}{}{}", self.prefix, NIL_ERROR, self.suffix),
        }
    }

    /// Render an already linearised chain
    pub(crate) fn render_stack(&self, stack: &[&(dyn StdError + 'static)]) -> String {
        let mut out = String::from(&self.prefix);

        for (i, element) in stack.iter().enumerate() {
            if let Some(label) = checkpoint_label(*element) {
                if i > 0 {
                    out.push_str(&self.checkpoint_delimiter);
                }
                out.push_str(&self.checkpoint_fence);
                out.push_str(label);
                out.push_str(&self.checkpoint_fence);
            } else {
                if i > 0 {
                    out.push_str(&self.delimiter);
                }
                out.push_str(&strip_cause(*element, &self.cause_separator));
            }
        }

        out.push_str(&self.suffix);
        out
    }
}

fn checkpoint_label<'a>(e: &'a (dyn StdError + 'static)) -> Option<&'a str> {
    e.downcast_ref::<Trackerr>()
        .and_then(Trackerr::checkpoint_label)
}

fn strip_cause(e: &(dyn StdError + 'static), separator: &str) -> String {
    if let Some(node) = e.downcast_ref::<Trackerr>() {
        return node.message().to_string();
    }

    let text = e.to_string();
    let Some(cause) = e.source() else {
        return text;
    };

    let cause_text = cause.to_string();
    if cause_text.is_empty() {
        return text;
    }

    match text.strip_suffix(cause_text.as_str()) {
        Some(head) => {
            let head = head.trim();
            head.strip_suffix(separator)
                .unwrap_or(head)
                .trim_end()
                .to_string()
        }
        None => text,
    }
}

/// The error's own text with any duplicated cause text removed
///
/// When the text ends with the direct cause's text, that suffix is dropped,
/// surrounding whitespace is trimmed and one trailing `:` is removed.
pub fn error_without_cause(e: &(dyn StdError + 'static)) -> String {
    strip_cause(e, &StackStyle::default().cause_separator)
}

/// Render the chain with the default [`StackStyle`]
///
/// # Example
///
/// ```rust
/// use trackerr::{error_stack, IntRealm, Realm};
///
/// let realm = IntRealm::new();
/// let e = realm.track("abc").because("efg");
///
/// assert_eq!(error_stack(Some(&e)), "  abc\n⤷ efg\n");
/// assert_eq!(error_stack(None), "  <nil error>\n");
/// ```
pub fn error_stack(e: Option<&(dyn StdError + 'static)>) -> String {
    StackStyle::default().render(e)
}

/// Render the chain with custom tokens
pub fn error_stack_with(e: Option<&(dyn StdError + 'static)>, style: &StackStyle) -> String {
    style.render(e)
}

/// Write a debug print of the chain to `writer`
///
/// Returns the number of bytes written.
pub fn debug_to<W: Write>(mut writer: W, e: Option<&(dyn StdError + 'static)>) -> Result<usize> {
    let text = match e {
        Some(_) => format!("[Debug error]\n{}", error_stack(e)),
        None => "[Debug error] nil error\n".to_string(),
    };

    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(text.len())
}

/// Print the chain to stdout for debugging
///
/// Not meant for production logging; `None` prints a nil error notice.
pub fn debug(e: Option<&(dyn StdError + 'static)>) -> Result<usize> {
    debug_to(io::stdout().lock(), e)
}
