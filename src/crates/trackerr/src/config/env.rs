//! Environment variable loading
//!
//! Helpers for reading render settings from the environment. Missing
//! variables are `Ok(None)`; present but unusable ones are errors.

use crate::{Result, TrackerrError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but has invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(TrackerrError::Config(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let depth: Option<usize> = get_env_parse("TRACKERR_MAX_DEPTH")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env(key)?
        .map(|val| {
            val.trim().parse::<T>().map_err(|e| {
                TrackerrError::Config(format!(
                    "Failed to parse environment variable {}: {}",
                    key, e
                ))
            })
        })
        .transpose()
}

/// Load an environment variable, expanding `\n`, `\t` and `\\` escapes
///
/// Render tokens usually contain line breaks, which are awkward to put in
/// an environment variable directly.
pub fn get_env_escaped(key: &str) -> Result<Option<String>> {
    Ok(get_env(key)?.map(|val| unescape(&val)))
}

fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Build a prefixed environment variable name
///
/// ```rust,ignore
/// let key = build_env_key("TRACKERR_", "max_depth"); // "TRACKERR_MAX_DEPTH"
/// ```
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
