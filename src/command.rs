use std::process::ExitCode;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::api::ClustersApi;
use crate::error::CommandError;
use crate::identity::IdentityProvider;
use crate::interactive::{Confirmer, Prompter};
use crate::revoke::{revoke_user, RevokeOutcome, RevokeUserOptions};
use crate::upgrade::{upgrade_cluster, UpgradeClusterOptions};

/// A parsed command, ready to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UpgradeCluster(UpgradeClusterOptions),
    RevokeUser(RevokeUserOptions),
}

/// What a command needs from the outside world.
pub struct Session<'a> {
    pub api: &'a dyn ClustersApi,
    pub identity: &'a dyn IdentityProvider,
    pub prompter: &'a dyn Prompter,
    pub confirmer: &'a dyn Confirmer,
}

#[tracing::instrument(name = "command::run", skip_all)]
pub async fn run(
    session: &Session<'_>,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<(), CommandError> {
    match command {
        Command::UpgradeCluster(options) => {
            upgrade_cluster(
                session.api,
                session.identity,
                session.prompter,
                options,
                now,
            )
            .await?;
        }
        Command::RevokeUser(options) => {
            let outcome =
                revoke_user(session.api, session.identity, session.confirmer, options).await?;
            if let RevokeOutcome::Declined = outcome {
                debug!("revocation declined");
            }
        }
    }

    Ok(())
}

/// Runs `command` and then closes the connection, whatever the outcome.
/// A failure to close is logged and doesn't replace the command's result.
pub async fn run_then_close(
    session: &Session<'_>,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<(), CommandError> {
    let result = run(session, command, now).await;

    if let Err(error) = session.api.close().await {
        error!("Failed to close OCM connection: {error}");
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Reports the result of an invocation and decides how the process exits.
/// Informational stops are warnings and still succeed.
pub fn exit_status(result: &anyhow::Result<()>) -> ExitStatus {
    let error = match result {
        Ok(()) => return ExitStatus::Success,
        Err(error) => error,
    };

    match error.downcast_ref::<CommandError>() {
        Some(command_error) if command_error.is_informational() => {
            warn!("{command_error}");
            ExitStatus::Success
        }
        // Command errors already carry their cause in the message.
        Some(command_error) => {
            error!("{command_error}");
            ExitStatus::Failure
        }
        None => {
            error!("{error:#}");
            ExitStatus::Failure
        }
    }
}
