use async_trait::async_trait;

use crate::config::IdentityConfig;

/// The cloud identity of the caller. Cluster lookups are limited to clusters
/// this identity created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub arn: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("no creator ARN configured, set identity.creator_arn")]
    MissingCreatorArn,
    #[error("'{0}' is not an ARN")]
    InvalidArn(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn creator(&self) -> Result<Creator, IdentityError>;
}

/// Reads the caller identity from the configuration file.
#[derive(Debug, Clone)]
pub struct ConfiguredIdentity {
    creator_arn: Option<String>,
}

impl ConfiguredIdentity {
    pub fn new(creator_arn: Option<String>) -> Self {
        Self { creator_arn }
    }
}

impl From<&IdentityConfig> for ConfiguredIdentity {
    fn from(config: &IdentityConfig) -> Self {
        Self::new(config.creator_arn.clone())
    }
}

#[async_trait]
impl IdentityProvider for ConfiguredIdentity {
    async fn creator(&self) -> Result<Creator, IdentityError> {
        let arn = match self.creator_arn.as_deref().map(str::trim) {
            None | Some("") => return Err(IdentityError::MissingCreatorArn),
            Some(arn) => arn,
        };

        // arn:partition:service:region:account-id:resource
        if !arn.starts_with("arn:") || arn.split(':').count() < 6 {
            return Err(IdentityError::InvalidArn(arn.to_owned()));
        }

        Ok(Creator {
            arn: arn.to_owned(),
        })
    }
}
