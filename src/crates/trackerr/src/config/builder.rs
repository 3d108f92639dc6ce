//! Configuration builder trait
//!
//! Shared shape for configuration structures: defaults, validation, loading
//! from the environment and layering one source over another.

use crate::Result;

/// Trait for configuration structures that support validation and merging
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// The default implementation accepts everything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from environment variables named
    /// `{PREFIX}{FIELD_NAME}`
    ///
    /// Fields without a variable keep their default value.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Layer `other` over this configuration
    ///
    /// Fields of `other` that differ from the default overwrite ours.
    /// Returns self for chaining.
    fn merge(&mut self, other: Self) -> &mut Self;

    /// Create and validate the default configuration
    fn build() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the environment, then validated
    fn from_env_with_defaults(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::from_env(prefix)?);
        config.validate()?;
        Ok(config)
    }
}
