use regex::Regex;
use std::sync::LazyLock;

/// Identifiers that end up inside search queries may only use these characters.
static SAFE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("safe key pattern is valid"));

/// Checks that a cluster name, identifier or external identifier is safe to
/// embed in a search query.
#[tracing::instrument(name = "validation::is_valid_cluster_key", skip_all, fields(
    key = %key
))]
pub fn is_valid_cluster_key(key: &str) -> bool {
    SAFE_KEY.is_match(key)
}

#[tracing::instrument(name = "validation::is_valid_username", skip_all, fields(
    username = %username
))]
pub fn is_valid_username(username: &str) -> bool {
    SAFE_KEY.is_match(username)
}
