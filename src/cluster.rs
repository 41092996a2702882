use tracing::debug;

use crate::api::ClustersApi;
use crate::error::CommandError;
use crate::identity::Creator;
use crate::model::ClusterRecord;

/// Cluster property holding the ARN of the identity that created the cluster.
pub const CREATOR_ARN_PROPERTY: &str = "rosa_creator_arn";

/// Builds the search query matching a cluster by identifier, name or external
/// identifier among the clusters created by `creator`.
///
/// `key` must have passed [`crate::validation::is_valid_cluster_key`].
pub fn search_query(key: &str, creator: &Creator) -> String {
    format!(
        "(id = '{key}' or name = '{key}' or external_id = '{key}') and properties.{CREATOR_ARN_PROPERTY} = '{}'",
        creator.arn.replace('\'', "''")
    )
}

/// Finds the single cluster `key` refers to.
#[tracing::instrument(name = "cluster::get_cluster", skip_all, fields(
    key = %key
))]
pub async fn get_cluster(
    api: &dyn ClustersApi,
    key: &str,
    creator: &Creator,
) -> Result<ClusterRecord, CommandError> {
    debug!("Loading cluster '{key}'");

    let clusters = api
        .search_clusters(&search_query(key, creator), 1)
        .await
        .map_err(|error| CommandError::remote(format!("Failed to get cluster '{key}'"), error))?;

    match clusters.total {
        0 => Err(CommandError::ClusterNotFound(key.to_owned())),
        1 => clusters
            .items
            .into_iter()
            .next()
            .ok_or_else(|| CommandError::ClusterNotFound(key.to_owned())),
        count => Err(CommandError::AmbiguousCluster {
            key: key.to_owned(),
            count,
        }),
    }
}
