use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterState {
    Error,
    Hibernating,
    Installing,
    Pending,
    PoweringDown,
    Ready,
    Resuming,
    Uninstalling,
    Unknown,
    Validating,
    Waiting,
    /// A state this client doesn't know about yet.
    #[serde(other)]
    Unrecognized,
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ClusterState::Error => "error",
            ClusterState::Hibernating => "hibernating",
            ClusterState::Installing => "installing",
            ClusterState::Pending => "pending",
            ClusterState::PoweringDown => "powering_down",
            ClusterState::Ready => "ready",
            ClusterState::Resuming => "resuming",
            ClusterState::Uninstalling => "uninstalling",
            ClusterState::Unknown => "unknown",
            ClusterState::Validating => "validating",
            ClusterState::Waiting => "waiting",
            ClusterState::Unrecognized => "unrecognized",
        };
        f.write_str(state)
    }
}

/// A numeric value with its unit, e.g. a grace period of 60 minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    /// e.g. `openshift-v4.5.16`.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
}

/// A cluster as returned by the management service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub state: ClusterState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionRef>,
    /// Stored by the service in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_drain_grace_period: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterList {
    #[serde(default)]
    pub items: Vec<ClusterRecord>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Manual,
    Automatic,
}

/// A scheduled instruction to upgrade a cluster to `version` at `next_run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub schedule_type: ScheduleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_type: Option<String>,
    pub version: String,
    pub next_run: DateTime<Utc>,
}

/// An upgrade policy that already exists on the service.
pub type ScheduledUpgrade = UpgradePolicy;

/// Cluster upgrades, as opposed to add-on upgrades.
pub const CLUSTER_UPGRADE_TYPE: &str = "OSD";

impl UpgradePolicy {
    /// A one-off upgrade that runs once at `next_run`.
    pub fn manual(version: impl Into<String>, next_run: DateTime<Utc>) -> Self {
        Self {
            id: None,
            schedule_type: ScheduleType::Manual,
            upgrade_type: None,
            version: version.into(),
            next_run,
        }
    }

    /// Policies without an upgrade type predate add-on upgrades and target the cluster.
    pub fn upgrades_cluster(&self) -> bool {
        self.upgrade_type
            .as_deref()
            .map_or(true, |upgrade_type| upgrade_type == CLUSTER_UPGRADE_TYPE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradePolicyList {
    #[serde(default)]
    pub items: Vec<UpgradePolicy>,
}

/// The fields of a cluster this client updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    pub node_drain_grace_period: Value,
}

impl ClusterUpdate {
    pub fn node_drain_grace_period(grace_period: Value) -> Self {
        Self {
            node_drain_grace_period: grace_period,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
    #[serde(default)]
    pub available_upgrades: Vec<String>,
}

/// Error body returned by the management service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reason: String,
}
