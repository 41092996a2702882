use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::{ClustersApi, RemoteCallError};
use crate::cluster::get_cluster;
use crate::error::CommandError;
use crate::grace_period::{
    describe_stored, NodeDrainGracePeriod, DEFAULT_NODE_DRAIN_GRACE_PERIOD,
    NODE_DRAIN_GRACE_PERIOD_OPTIONS,
};
use crate::identity::IdentityProvider;
use crate::interactive::{Input, Prompter};
use crate::model::{ClusterState, ClusterUpdate, ScheduledUpgrade, UpgradePolicy, Value};
use crate::schedule::{parse_date, parse_time, Schedule};
use crate::validation::is_valid_cluster_key;
use crate::versions::get_available_upgrades;

pub const VERSION_HELP: &str = "Version of OpenShift that the cluster will be upgraded to";

pub const NODE_DRAIN_GRACE_PERIOD_HELP: &str = "You may set a grace period for how long Pod Disruption Budget-protected workloads will be respected during upgrades.\nAfter this grace period, any workloads protected by Pod Disruption Budgets that have not been successfully drained from a node will be forcibly evicted";

/// What the caller asked for. Everything left out is resolved from defaults,
/// the cluster, or a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeClusterOptions {
    pub cluster_key: String,
    pub version: Option<String>,
    pub schedule_date: Option<String>,
    pub schedule_time: Option<String>,
    /// Only set when given explicitly, so the cluster's current value can win otherwise.
    pub node_drain_grace_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeScheduled {
    pub cluster_id: String,
    pub policy: UpgradePolicy,
    pub node_drain_grace_period: Value,
}

/// Schedules an upgrade of a ready cluster and updates its node drain grace
/// period.
///
/// The upgrade policy is created before the cluster is updated. The two calls
/// aren't transactional: when the update fails the policy stays in place and
/// the error is returned.
#[tracing::instrument(name = "upgrade::upgrade_cluster", skip_all, fields(
    cluster = %options.cluster_key
))]
pub async fn upgrade_cluster(
    api: &dyn ClustersApi,
    identity: &dyn IdentityProvider,
    prompter: &dyn Prompter,
    options: &UpgradeClusterOptions,
    now: DateTime<Utc>,
) -> Result<UpgradeScheduled, CommandError> {
    let cluster_key = options.cluster_key.as_str();
    if !is_valid_cluster_key(cluster_key) {
        return Err(CommandError::InvalidClusterKey(cluster_key.to_owned()));
    }

    let creator = identity.creator().await?;
    let cluster = get_cluster(api, cluster_key, &creator).await?;

    if cluster.state != ClusterState::Ready {
        debug!(state = %cluster.state, "cluster is not ready");
        return Err(CommandError::ClusterNotReady(cluster_key.to_owned()));
    }

    let scheduled_upgrade = get_scheduled_upgrade(api, &cluster.id)
        .await
        .map_err(|error| {
            CommandError::remote(
                format!("Failed to get scheduled upgrades for cluster '{cluster_key}'"),
                error,
            )
        })?;
    if let Some(scheduled_upgrade) = scheduled_upgrade {
        return Err(CommandError::AlreadyScheduled {
            version: scheduled_upgrade.version,
            next_run: scheduled_upgrade.next_run,
        });
    }

    let version_id = cluster
        .version
        .as_ref()
        .map(|version| version.id.as_str())
        .ok_or_else(|| CommandError::MissingClusterVersion(cluster_key.to_owned()))?;

    let available_upgrades = get_available_upgrades(api, version_id)
        .await
        .map_err(|error| CommandError::remote("Failed to find available upgrades", error))?;
    if available_upgrades.is_empty() {
        return Err(CommandError::NoUpgradesAvailable);
    }

    let version = resolve_version(prompter, options.version.as_deref(), &available_upgrades)?;

    let next_run = resolve_next_run(
        prompter,
        options.schedule_date.as_deref(),
        options.schedule_time.as_deref(),
        now,
    )?;

    let node_drain_grace_period = resolve_node_drain_grace_period(
        prompter,
        cluster.node_drain_grace_period.as_ref(),
        options.node_drain_grace_period.as_deref(),
    )?;

    let policy = UpgradePolicy::manual(version, next_run);
    let update = ClusterUpdate::node_drain_grace_period(node_drain_grace_period.to_value());

    api.create_upgrade_policy(&cluster.id, &policy)
        .await
        .map_err(|error| {
            CommandError::remote(
                format!("Failed to schedule upgrade for cluster '{cluster_key}'"),
                error,
            )
        })?;

    api.update_cluster(&cluster.id, &update)
        .await
        .map_err(|error| {
            CommandError::remote(format!("Failed to update cluster '{cluster_key}'"), error)
        })?;

    info!("Upgrade successfully scheduled for cluster '{cluster_key}'");

    Ok(UpgradeScheduled {
        cluster_id: cluster.id,
        policy,
        node_drain_grace_period: update.node_drain_grace_period,
    })
}

/// The cluster upgrade already scheduled on the cluster, if any.
#[tracing::instrument(name = "upgrade::get_scheduled_upgrade", skip_all, fields(
    cluster_id = %cluster_id
))]
pub async fn get_scheduled_upgrade(
    api: &dyn ClustersApi,
    cluster_id: &str,
) -> Result<Option<ScheduledUpgrade>, RemoteCallError> {
    let policies = api.list_upgrade_policies(cluster_id).await?;

    Ok(policies
        .into_iter()
        .find(|policy| policy.upgrades_cluster()))
}

/// Picks the target version. Without a requested version the first, newest,
/// available upgrade is used. A prompt only pre-selects a requested version
/// that is actually available.
pub fn resolve_version(
    prompter: &dyn Prompter,
    requested: Option<&str>,
    available_upgrades: &[String],
) -> Result<String, CommandError> {
    let version = match requested {
        Some(requested) if !prompter.is_interactive() => requested.to_owned(),
        _ => {
            let default = requested
                .filter(|requested| available_upgrades.iter().any(|version| version == requested))
                .or(available_upgrades.first().map(String::as_str));
            prompter.ask(&Input::select(
                "Version",
                VERSION_HELP,
                available_upgrades,
                default,
            ))?
        }
    };

    if !available_upgrades.contains(&version) {
        return Err(CommandError::InvalidVersion {
            version,
            available: available_upgrades.to_vec(),
        });
    }

    Ok(version)
}

/// Works out when the upgrade runs, in UTC. Defaults to ten minutes from `now`.
pub fn resolve_next_run(
    prompter: &dyn Prompter,
    date: Option<&str>,
    time: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, CommandError> {
    let mut schedule = Schedule::with_overrides(date, time, now);

    if prompter.is_interactive() {
        let defaults = schedule.reconciled(now);

        let date = prompter.ask(&Input::text(
            "Please input desired date in format yyyy-mm-dd",
            Some(defaults.date.as_str()),
        ))?;
        parse_date(&date)?;

        let time = prompter.ask(&Input::text(
            "Please input desired UTC time in format HH:mm",
            Some(defaults.time.as_str()),
        ))?;
        parse_time(&time)?;

        schedule = Schedule { date, time };
    }

    Ok(schedule.next_run()?)
}

/// An explicitly requested grace period wins over the one stored on the
/// cluster, which wins over the default.
pub fn resolve_node_drain_grace_period(
    prompter: &dyn Prompter,
    stored: Option<&Value>,
    requested: Option<&str>,
) -> Result<NodeDrainGracePeriod, CommandError> {
    let mut grace_period = match (requested, stored) {
        (Some(requested), _) => requested.to_owned(),
        (None, Some(stored)) => describe_stored(stored),
        (None, None) => DEFAULT_NODE_DRAIN_GRACE_PERIOD.to_owned(),
    };

    if prompter.is_interactive() {
        grace_period = prompter.ask(&Input::select(
            "Node draining",
            NODE_DRAIN_GRACE_PERIOD_HELP,
            &NODE_DRAIN_GRACE_PERIOD_OPTIONS,
            Some(grace_period.as_str()),
        ))?;
    }

    Ok(grace_period.parse()?)
}
