use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ClustersApi, RemoteCallError};
use crate::interactive::{Confirmer, Input, PromptError, Prompter};
use crate::model::{
    ClusterList, ClusterRecord, ClusterState, ClusterUpdate, UpgradePolicy, Value, VersionRef,
    VersionRecord,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SearchClusters { query: String },
    ListUpgradePolicies { cluster_id: String },
    GetVersion { version_id: String },
    CreateUpgradePolicy { cluster_id: String, policy: UpgradePolicy },
    UpdateCluster { cluster_id: String, update: ClusterUpdate },
    DeleteGroupUser { cluster_id: String, group: String, username: String },
    Close,
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateUpgradePolicy { .. } | Call::UpdateCluster { .. } | Call::DeleteGroupUser { .. }
        )
    }
}

/// In-memory clusters management API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub clusters: Vec<ClusterRecord>,
    pub upgrade_policies: HashMap<String, Vec<UpgradePolicy>>,
    pub versions: HashMap<String, VersionRecord>,
    /// Reason returned by calls to the named operation, e.g. "update_cluster".
    pub failures: HashMap<&'static str, String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: ClusterRecord) -> Self {
        self.clusters.push(cluster);
        self
    }

    pub fn with_available_upgrades(mut self, version_id: &str, upgrades: &[&str]) -> Self {
        self.versions.insert(
            version_id.to_owned(),
            VersionRecord {
                id: version_id.to_owned(),
                raw_id: None,
                available_upgrades: upgrades.iter().map(|v| v.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_upgrade_policy(mut self, cluster_id: &str, policy: UpgradePolicy) -> Self {
        self.upgrade_policies
            .entry(cluster_id.to_owned())
            .or_default()
            .push(policy);
        self
    }

    pub fn failing(mut self, operation: &'static str, reason: &str) -> Self {
        self.failures.insert(operation, reason.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), RemoteCallError> {
        self.calls.lock().unwrap().push(call);

        match self.failures.get(operation) {
            None => Ok(()),
            Some(reason) => Err(RemoteCallError::Service {
                status: 400,
                code: "CLUSTERS-MGMT-400".to_owned(),
                reason: reason.clone(),
            }),
        }
    }
}

/// A ready cluster running 4.5.16 named after `name`.
pub fn ready_cluster(name: &str) -> ClusterRecord {
    ClusterRecord {
        id: format!("{name}-id"),
        name: name.to_owned(),
        external_id: None,
        state: ClusterState::Ready,
        version: Some(VersionRef {
            id: "openshift-v4.5.16".to_owned(),
            raw_id: Some("4.5.16".to_owned()),
        }),
        node_drain_grace_period: None,
    }
}

pub fn minutes(value: f64) -> Value {
    Value {
        value,
        unit: "minutes".to_owned(),
    }
}

#[async_trait]
impl ClustersApi for FakeApi {
    async fn search_clusters(
        &self,
        query: &str,
        size: usize,
    ) -> Result<ClusterList, RemoteCallError> {
        self.record(
            "search_clusters",
            Call::SearchClusters {
                query: query.to_owned(),
            },
        )?;

        let matching: Vec<_> = self
            .clusters
            .iter()
            .filter(|cluster| {
                [Some(&cluster.id), Some(&cluster.name), cluster.external_id.as_ref()]
                    .into_iter()
                    .flatten()
                    .any(|key| query.starts_with(&format!("(id = '{key}'")))
            })
            .cloned()
            .collect();

        Ok(ClusterList {
            total: matching.len(),
            items: matching.into_iter().take(size).collect(),
        })
    }

    async fn list_upgrade_policies(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<UpgradePolicy>, RemoteCallError> {
        self.record(
            "list_upgrade_policies",
            Call::ListUpgradePolicies {
                cluster_id: cluster_id.to_owned(),
            },
        )?;

        Ok(self
            .upgrade_policies
            .get(cluster_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_version(&self, version_id: &str) -> Result<VersionRecord, RemoteCallError> {
        self.record(
            "get_version",
            Call::GetVersion {
                version_id: version_id.to_owned(),
            },
        )?;

        self.versions
            .get(version_id)
            .cloned()
            .ok_or_else(|| RemoteCallError::Service {
                status: 404,
                code: "CLUSTERS-MGMT-404".to_owned(),
                reason: format!("Version '{version_id}' not found"),
            })
    }

    async fn create_upgrade_policy(
        &self,
        cluster_id: &str,
        policy: &UpgradePolicy,
    ) -> Result<UpgradePolicy, RemoteCallError> {
        self.record(
            "create_upgrade_policy",
            Call::CreateUpgradePolicy {
                cluster_id: cluster_id.to_owned(),
                policy: policy.clone(),
            },
        )?;

        Ok(UpgradePolicy {
            id: Some("policy-id".to_owned()),
            ..policy.clone()
        })
    }

    async fn update_cluster(
        &self,
        cluster_id: &str,
        update: &ClusterUpdate,
    ) -> Result<ClusterRecord, RemoteCallError> {
        self.record(
            "update_cluster",
            Call::UpdateCluster {
                cluster_id: cluster_id.to_owned(),
                update: update.clone(),
            },
        )?;

        let mut cluster = self
            .clusters
            .iter()
            .find(|cluster| cluster.id == cluster_id)
            .cloned()
            .ok_or_else(|| RemoteCallError::Decode(format!("no cluster {cluster_id}")))?;
        cluster.node_drain_grace_period = Some(update.node_drain_grace_period.clone());

        Ok(cluster)
    }

    async fn delete_group_user(
        &self,
        cluster_id: &str,
        group: &str,
        username: &str,
    ) -> Result<(), RemoteCallError> {
        self.record(
            "delete_group_user",
            Call::DeleteGroupUser {
                cluster_id: cluster_id.to_owned(),
                group: group.to_owned(),
                username: username.to_owned(),
            },
        )
    }

    async fn close(&self) -> Result<(), RemoteCallError> {
        self.record("close", Call::Close)
    }
}

/// Answers prompts from a script. `None` accepts the default.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<Input>>,
    confirmation: bool,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.map(str::to_owned)).collect()),
            ..Default::default()
        }
    }

    pub fn confirming(confirmation: bool) -> Self {
        Self {
            confirmation,
            ..Default::default()
        }
    }

    pub fn asked(&self) -> Vec<Input> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&self, input: &Input) -> Result<String, PromptError> {
        self.asked.lock().unwrap().push(input.clone());

        match self.answers.lock().unwrap().pop_front() {
            Some(Some(answer)) => Ok(answer),
            Some(None) => input
                .default
                .clone()
                .ok_or_else(|| PromptError::Required(input.question.clone())),
            None => Err(PromptError::Cancelled),
        }
    }
}

impl Confirmer for ScriptedPrompter {
    fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        self.asked.lock().unwrap().push(Input::text(question, None));
        Ok(self.confirmation)
    }
}
