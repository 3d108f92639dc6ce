//! Render configuration
//!
//! [`TrackerrConfig`] bundles the stack trace tokens with an optional limit
//! on the number of rendered elements. It can be built in code, read from JSON, or loaded from
//! environment variables:
//!
//! | Variable                        | Field                        |
//! |---------------------------------|------------------------------|
//! | `{PREFIX}PREFIX`                | `style.prefix`               |
//! | `{PREFIX}DELIMITER`             | `style.delimiter`            |
//! | `{PREFIX}CHECKPOINT_DELIMITER`  | `style.checkpoint_delimiter` |
//! | `{PREFIX}CHECKPOINT_FENCE`      | `style.checkpoint_fence`     |
//! | `{PREFIX}SUFFIX`                | `style.suffix`               |
//! | `{PREFIX}CAUSE_SEPARATOR`       | `style.cause_separator`      |
//! | `{PREFIX}MAX_DEPTH`             | `max_depth`                  |
//!
//! Token values honour `\n`, `\t` and `\\` escapes.
//!
//! # Example
//!
//! ```rust,ignore
//! use trackerr::{ConfigBuilder, TrackerrConfig};
//!
//! let config = TrackerrConfig::from_env_with_defaults("TRACKERR_")?;
//! print!("{}", config.error_stack(Some(&err)));
//! ```

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env, get_env_escaped, get_env_parse};

use crate::chain::linearize_bounded;
use crate::render::StackStyle;
use crate::{Result, TrackerrError};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

/// Stack trace rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerrConfig {
    /// Tokens used to lay out the trace
    pub style: StackStyle,
    /// Maximum number of chain elements rendered, unlimited by default
    pub max_depth: usize,
}

impl Default for TrackerrConfig {
    fn default() -> Self {
        Self {
            style: StackStyle::default(),
            max_depth: usize::MAX,
        }
    }
}

impl TrackerrConfig {
    /// Create a configuration with default tokens and no render limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render tokens
    pub fn with_style(mut self, style: StackStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the maximum rendered chain depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the chain with these tokens, stopping at `max_depth`
    pub fn error_stack(&self, e: Option<&(dyn StdError + 'static)>) -> String {
        match e {
            Some(_) => self
                .style
                .render_stack(&linearize_bounded(e, self.max_depth)),
            None => self.style.render(None),
        }
    }
}

impl ConfigBuilder for TrackerrConfig {
    fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TrackerrError::Config(
                "max_depth must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        let style = &mut config.style;

        let tokens: [(&str, &mut String); 6] = [
            ("prefix", &mut style.prefix),
            ("delimiter", &mut style.delimiter),
            ("checkpoint_delimiter", &mut style.checkpoint_delimiter),
            ("checkpoint_fence", &mut style.checkpoint_fence),
            ("suffix", &mut style.suffix),
            ("cause_separator", &mut style.cause_separator),
        ];

        for (name, field) in tokens {
            if let Some(value) = get_env_escaped(&build_env_key(prefix, name))? {
                *field = value;
            }
        }

        if let Some(max_depth) = get_env_parse(&build_env_key(prefix, "max_depth"))? {
            config.max_depth = max_depth;
        }

        tracing::debug!(prefix, max_depth = config.max_depth, "loaded trackerr config from env");
        Ok(config)
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        let defaults = Self::default();

        let pairs = [
            (&mut self.style.prefix, other.style.prefix, defaults.style.prefix),
            (&mut self.style.delimiter, other.style.delimiter, defaults.style.delimiter),
            (
                &mut self.style.checkpoint_delimiter,
                other.style.checkpoint_delimiter,
                defaults.style.checkpoint_delimiter,
            ),
            (
                &mut self.style.checkpoint_fence,
                other.style.checkpoint_fence,
                defaults.style.checkpoint_fence,
            ),
            (&mut self.style.suffix, other.style.suffix, defaults.style.suffix),
            (
                &mut self.style.cause_separator,
                other.style.cause_separator,
                defaults.style.cause_separator,
            ),
        ];

        for (field, value, default) in pairs {
            if value != default {
                *field = value;
            }
        }

        if other.max_depth != defaults.max_depth {
            self.max_depth = other.max_depth;
        }

        self
    }
}
