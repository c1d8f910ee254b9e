/// Body of the root endpoint, used by uptime checks.
pub const SPLASH: &str = "is your sheep genuine?";

/// Plain-text liveness answer. Not part of the published API.
pub async fn index() -> &'static str {
    SPLASH
}
