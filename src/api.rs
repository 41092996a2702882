use async_trait::async_trait;

use crate::model::{ClusterList, ClusterRecord, ClusterUpdate, UpgradePolicy, VersionRecord};

/// Failure of a single call to the management service.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    /// The service answered with an error status.
    #[error("{reason}")]
    Service {
        status: u16,
        code: String,
        reason: String,
    },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteCallError {
    /// The machine readable reason reported by the service, or a description
    /// of the failure when the service never answered.
    pub fn reason(&self) -> String {
        match self {
            RemoteCallError::Service { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            RemoteCallError::Decode(error.to_string())
        } else {
            RemoteCallError::Transport(error)
        }
    }
}

/// The subset of the clusters management API used by the commands.
#[async_trait]
pub trait ClustersApi: Send + Sync {
    /// Searches clusters using the service query language.
    async fn search_clusters(&self, query: &str, size: usize)
        -> Result<ClusterList, RemoteCallError>;

    async fn list_upgrade_policies(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<UpgradePolicy>, RemoteCallError>;

    async fn get_version(&self, version_id: &str) -> Result<VersionRecord, RemoteCallError>;

    async fn create_upgrade_policy(
        &self,
        cluster_id: &str,
        policy: &UpgradePolicy,
    ) -> Result<UpgradePolicy, RemoteCallError>;

    async fn update_cluster(
        &self,
        cluster_id: &str,
        update: &ClusterUpdate,
    ) -> Result<ClusterRecord, RemoteCallError>;

    /// Removes a user from one of the cluster's groups.
    async fn delete_group_user(
        &self,
        cluster_id: &str,
        group: &str,
        username: &str,
    ) -> Result<(), RemoteCallError>;

    /// Releases the connection. Called once per invocation, on every exit path.
    async fn close(&self) -> Result<(), RemoteCallError>;
}
