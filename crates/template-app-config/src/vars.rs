use std::str::FromStr;

use crate::error::ConfigError;

/// Key lookup used while building settings.
pub(crate) type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Non-empty value of `var`, or `None` when unset or blank.
pub(crate) fn optional(lookup: Lookup<'_>, var: &str) -> Option<String> {
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn required(lookup: Lookup<'_>, var: &'static str) -> Result<String, ConfigError> {
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

pub(crate) fn parse_or<T>(lookup: Lookup<'_>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, var) {
        Some(raw) => raw.parse().map_err(|e| ConfigError::invalid(var, e)),
        None => Ok(default),
    }
}
