use axum::http::HeaderValue;

/// Scheme and credential taken from an `Authorization` header.
///
/// The header is split at the first space: `"Bearer abc"` yields scheme
/// `Bearer` and credentials `abc`. A header without a space is all scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BearerCredentials {
    pub scheme: String,
    pub credentials: String,
}

impl BearerCredentials {
    pub fn parse(header: &str) -> Self {
        match header.split_once(' ') {
            Some((scheme, credentials)) => Self {
                scheme: scheme.to_string(),
                credentials: credentials.to_string(),
            },
            None => Self {
                scheme: header.to_string(),
                credentials: String::new(),
            },
        }
    }

    pub fn from_header(value: &HeaderValue) -> Self {
        Self::parse(&String::from_utf8_lossy(value.as_bytes()))
    }
}
