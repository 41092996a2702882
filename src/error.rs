use chrono::{DateTime, Utc};

use crate::api::RemoteCallError;
use crate::grace_period::GracePeriodError;
use crate::identity::IdentityError;
use crate::interactive::PromptError;
use crate::revoke::InvalidRoleError;
use crate::schedule::ScheduleError;

/// Everything that can stop a command before it completes.
///
/// Most variants are fatal and end the process with exit code 1. The
/// informational ones (see [`CommandError::is_informational`]) describe a
/// benign early stop and end it with exit code 0.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(
        "Cluster name, identifier or external identifier '{0}' isn't valid: it must contain only letters, digits, dashes and underscores"
    )]
    InvalidClusterKey(String),

    #[error("username '{0}' isn't valid: it must contain only letters, digits, dashes and underscores")]
    InvalidUsername(String),

    #[error("There is no cluster with identifier or name '{0}'")]
    ClusterNotFound(String),

    #[error("There are {count} clusters with identifier or name '{key}'")]
    AmbiguousCluster { key: String, count: usize },

    #[error("Cluster '{0}' is not yet ready")]
    ClusterNotReady(String),

    #[error("Cluster '{0}' does not report its current version")]
    MissingClusterVersion(String),

    #[error("Expected a valid version to upgrade to: '{version}' is not one of [{}]", available.join(", "))]
    InvalidVersion {
        version: String,
        available: Vec<String>,
    },

    #[error("There are no available upgrades")]
    NoUpgradesAvailable,

    #[error(
        "There is already a scheduled upgrade to version {version} on {}",
        next_run.format("%Y-%m-%d %H:%M UTC")
    )]
    AlreadyScheduled {
        version: String,
        next_run: DateTime<Utc>,
    },

    #[error(transparent)]
    InvalidSchedule(#[from] ScheduleError),

    #[error("Expected a valid node drain grace period: {0}")]
    InvalidGracePeriod(#[from] GracePeriodError),

    #[error(transparent)]
    InvalidRole(#[from] InvalidRoleError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("Failed to get AWS creator: {0}")]
    Identity(#[from] IdentityError),

    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: RemoteCallError,
    },
}

impl CommandError {
    pub fn remote(context: impl Into<String>, source: RemoteCallError) -> Self {
        Self::Remote {
            context: context.into(),
            source,
        }
    }

    /// Informational errors are reported as warnings and end the command successfully.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            CommandError::NoUpgradesAvailable | CommandError::AlreadyScheduled { .. }
        )
    }
}
