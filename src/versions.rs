use std::cmp::Ordering;

use semver::Version;

use crate::api::{ClustersApi, RemoteCallError};

/// Versions the cluster can be upgraded to from `version_id`, newest first.
#[tracing::instrument(name = "versions::get_available_upgrades", skip_all, fields(
    version_id = %version_id
))]
pub async fn get_available_upgrades(
    api: &dyn ClustersApi,
    version_id: &str,
) -> Result<Vec<String>, RemoteCallError> {
    let mut available_upgrades = api.get_version(version_id).await?.available_upgrades;

    sort_newest_first(&mut available_upgrades);

    Ok(available_upgrades)
}

/// Sorts by semantic version, newest first. Entries that aren't semantic
/// versions go last and keep their relative order.
pub fn sort_newest_first(versions: &mut [String]) {
    versions.sort_by(|a, b| match (Version::parse(a), Version::parse(b)) {
        (Ok(a), Ok(b)) => b.cmp(&a),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    });
}
