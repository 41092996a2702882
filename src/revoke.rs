use std::{fmt, str::FromStr};

use tracing::{debug, info};

use crate::api::ClustersApi;
use crate::cluster::get_cluster;
use crate::error::CommandError;
use crate::identity::IdentityProvider;
use crate::interactive::Confirmer;
use crate::validation::{is_valid_cluster_key, is_valid_username};

/// Groups whose membership can be revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ClusterAdmins,
    DedicatedAdmins,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::ClusterAdmins, Role::DedicatedAdmins];

    /// The group name used by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ClusterAdmins => "cluster-admins",
            Role::DedicatedAdmins => "dedicated-admins",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Expected at least one of [{}], got '{0}'", Role::ALL.map(|role| role.as_str()).join(" "))]
pub struct InvalidRoleError(pub String);

impl FromStr for Role {
    type Err = InvalidRoleError;

    /// Accepts the group names and their singular aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster-admins" | "cluster-admin" => Ok(Role::ClusterAdmins),
            "dedicated-admins" | "dedicated-admin" => Ok(Role::DedicatedAdmins),
            other => Err(InvalidRoleError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeUserOptions {
    pub cluster_key: String,
    pub username: String,
    /// As typed by the user, aliases included.
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked {
        cluster_id: String,
        role: Role,
        username: String,
    },
    /// The user didn't confirm. Nothing was changed.
    Declined,
}

/// Removes a user from one of the cluster's admin groups after the caller
/// confirms.
#[tracing::instrument(name = "revoke::revoke_user", skip_all, fields(
    cluster = %options.cluster_key,
    username = %options.username,
    role = %options.role
))]
pub async fn revoke_user(
    api: &dyn ClustersApi,
    identity: &dyn IdentityProvider,
    confirmer: &dyn Confirmer,
    options: &RevokeUserOptions,
) -> Result<RevokeOutcome, CommandError> {
    let cluster_key = options.cluster_key.as_str();
    if !is_valid_cluster_key(cluster_key) {
        return Err(CommandError::InvalidClusterKey(cluster_key.to_owned()));
    }

    let username = options.username.as_str();
    if !is_valid_username(username) {
        return Err(CommandError::InvalidUsername(username.to_owned()));
    }

    let role: Role = options.role.parse()?;

    let creator = identity.creator().await?;
    let cluster = get_cluster(api, cluster_key, &creator).await?;

    if !confirmer.confirm(&format!(
        "revoke role {role} from user {username} in cluster {cluster_key}"
    ))? {
        return Ok(RevokeOutcome::Declined);
    }

    debug!("Removing user '{username}' from group '{role}' in cluster '{cluster_key}'");
    api.delete_group_user(&cluster.id, role.as_str(), username)
        .await
        .map_err(|error| {
            debug!(?error, "delete group user request failed");
            CommandError::remote(
                format!("Failed to revoke '{role}' from user '{username}' in cluster '{cluster_key}'"),
                error,
            )
        })?;

    info!("Revoked role '{role}' from user '{username}' in cluster '{cluster_key}'");

    Ok(RevokeOutcome::Revoked {
        cluster_id: cluster.id,
        role,
        username: username.to_owned(),
    })
}
