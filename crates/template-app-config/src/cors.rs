use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ConfigError;
use crate::vars::Lookup;

/// One entry of `CORS_ORIGINS`: either the wildcard or an http(s) origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Origin(Url),
}

impl CorsOrigin {
    /// Serialized origin as it appears in an `Origin` request header.
    pub fn as_header_value(&self) -> String {
        match self {
            Self::Any => "*".to_string(),
            Self::Origin(url) => url.origin().ascii_serialization(),
        }
    }
}

impl FromStr for CorsOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" {
            return Ok(Self::Any);
        }

        let url = Url::parse(s).map_err(|e| format!("{s:?}: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
            return Err(format!("{s:?} is not an http(s) URL"));
        }

        Ok(Self::Origin(url))
    }
}

impl fmt::Display for CorsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_header_value())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<CorsOrigin>,
}

impl CorsConfig {
    /// Reads `CORS_ORIGINS`, accepting a JSON list (`["http://a", "*"]`)
    /// or a comma-separated list.
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        const VAR: &str = "CORS_ORIGINS";

        let raw = match lookup(VAR) {
            Some(raw) => raw,
            None => return Err(ConfigError::Missing(VAR)),
        };
        let raw = raw.trim();

        let entries: Vec<String> = if raw.starts_with('[') {
            serde_json::from_str(raw).map_err(|e| ConfigError::invalid(VAR, e))?
        } else {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let allowed_origins = entries
            .iter()
            .map(|entry| entry.parse().map_err(|e| ConfigError::invalid(VAR, e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed_origins })
    }

    /// True when `*` was configured.
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.contains(&CorsOrigin::Any)
    }
}
