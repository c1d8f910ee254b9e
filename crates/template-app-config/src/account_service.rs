use url::Url;

use crate::error::ConfigError;
use crate::vars::{Lookup, required};

/// Location of the account service that validates bearer tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountServiceConfig {
    pub host: Url,
}

impl AccountServiceConfig {
    pub fn new(host: Url) -> Self {
        Self { host }
    }

    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        const VAR: &str = "ACCOUNT_SERVICE_HOST";

        let raw = required(lookup, VAR)?;
        let host = Url::parse(&raw).map_err(|e| ConfigError::invalid(VAR, e))?;
        if host.cannot_be_a_base() || !matches!(host.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(VAR, "expected an http(s) base URL"));
        }

        Ok(Self { host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::test_support::lookup_from;

    #[test]
    fn test_parses_host() {
        let lookup = lookup_from(&[("ACCOUNT_SERVICE_HOST", "https://accounts.example.com")]);
        let config = AccountServiceConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.host.as_str(), "https://accounts.example.com/");
    }

    #[test]
    fn test_rejects_non_url() {
        let lookup = lookup_from(&[("ACCOUNT_SERVICE_HOST", "mailto:admin@example.com")]);
        assert!(AccountServiceConfig::from_lookup(&lookup).is_err());
    }
}
