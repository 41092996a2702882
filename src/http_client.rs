use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::api::{ClustersApi, RemoteCallError};
use crate::config::{ApiConfig, TOKEN_ENV_VAR};
use crate::model::{
    ApiErrorBody, ClusterList, ClusterRecord, ClusterUpdate, UpgradePolicy, UpgradePolicyList,
    VersionRecord,
};

const API_PREFIX: [&str; 3] = ["api", "clusters_mgmt", "v1"];

const USER_AGENT: &str = concat!("clusterctl/", env!("CARGO_PKG_VERSION"));

/// Talks to the clusters management API over HTTP with JSON bodies.
pub struct HttpClustersApi {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpClustersApi {
    #[tracing::instrument(name = "HttpClustersApi::new", skip_all, fields(
        url = %config.url
    ))]
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.url.cannot_be_a_base() {
            bail!("API URL '{}' can't be used as a base URL", config.url);
        }

        let token = match config.token.as_deref() {
            Some(token) if !token.trim().is_empty() => token.trim().to_owned(),
            _ => bail!("no API token configured: set api.token or {TOKEN_ENV_VAR}"),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            token,
        })
    }

    /// Builds the URL of a resource below the API prefix. Every segment is
    /// percent-encoded on its own.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_PREFIX.iter().chain(segments));
        }
        url
    }

    async fn get<Res>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Res, RemoteCallError>
    where
        Res: DeserializeOwned,
    {
        self.request::<(), _>(Method::GET, segments, query, None)
            .await
    }

    async fn request<Req, Res>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&Req>,
    ) -> Result<Res, RemoteCallError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let response = self.send(method, segments, query, body).await?;

        Ok(response.json().await?)
    }

    async fn send<Req>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&Req>,
    ) -> Result<Response, RemoteCallError>
    where
        Req: Serialize,
    {
        let url = self.url(segments);
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        Err(decode_error(status, &body))
    }
}

/// Turns an error response into a [`RemoteCallError`], keeping the reason
/// reported by the service when the body carries one.
pub fn decode_error(status: StatusCode, body: &[u8]) -> RemoteCallError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(error) if !error.reason.is_empty() => RemoteCallError::Service {
            status: status.as_u16(),
            code: error.code,
            reason: error.reason,
        },
        _ => RemoteCallError::Service {
            status: status.as_u16(),
            code: String::new(),
            reason: status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("status {}", status.as_u16())),
        },
    }
}

#[async_trait]
impl ClustersApi for HttpClustersApi {
    #[tracing::instrument(name = "HttpClustersApi::search_clusters", skip_all, fields(
        query = %query
    ))]
    async fn search_clusters(
        &self,
        query: &str,
        size: usize,
    ) -> Result<ClusterList, RemoteCallError> {
        self.get(
            &["clusters"],
            &[("search", query.to_owned()), ("size", size.to_string())],
        )
        .await
    }

    #[tracing::instrument(name = "HttpClustersApi::list_upgrade_policies", skip_all, fields(
        cluster_id = %cluster_id
    ))]
    async fn list_upgrade_policies(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<UpgradePolicy>, RemoteCallError> {
        let policies: UpgradePolicyList = self
            .get(&["clusters", cluster_id, "upgrade_policies"], &[])
            .await?;

        Ok(policies.items)
    }

    #[tracing::instrument(name = "HttpClustersApi::get_version", skip_all, fields(
        version_id = %version_id
    ))]
    async fn get_version(&self, version_id: &str) -> Result<VersionRecord, RemoteCallError> {
        self.get(&["versions", version_id], &[]).await
    }

    #[tracing::instrument(name = "HttpClustersApi::create_upgrade_policy", skip_all, fields(
        cluster_id = %cluster_id,
        policy = ?policy
    ))]
    async fn create_upgrade_policy(
        &self,
        cluster_id: &str,
        policy: &UpgradePolicy,
    ) -> Result<UpgradePolicy, RemoteCallError> {
        self.request(
            Method::POST,
            &["clusters", cluster_id, "upgrade_policies"],
            &[],
            Some(policy),
        )
        .await
    }

    #[tracing::instrument(name = "HttpClustersApi::update_cluster", skip_all, fields(
        cluster_id = %cluster_id,
        update = ?update
    ))]
    async fn update_cluster(
        &self,
        cluster_id: &str,
        update: &ClusterUpdate,
    ) -> Result<ClusterRecord, RemoteCallError> {
        self.request(Method::PATCH, &["clusters", cluster_id], &[], Some(update))
            .await
    }

    #[tracing::instrument(name = "HttpClustersApi::delete_group_user", skip_all, fields(
        cluster_id = %cluster_id,
        group = %group,
        username = %username
    ))]
    async fn delete_group_user(
        &self,
        cluster_id: &str,
        group: &str,
        username: &str,
    ) -> Result<(), RemoteCallError> {
        self.send::<()>(
            Method::DELETE,
            &["clusters", cluster_id, "groups", group, "users", username],
            &[],
            None,
        )
        .await?;

        Ok(())
    }

    async fn close(&self) -> Result<(), RemoteCallError> {
        // reqwest releases pooled connections when the client is dropped.
        debug!("closing connection to the clusters management API");
        Ok(())
    }
}
