use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::command::Command;
use crate::revoke::RevokeUserOptions;
use crate::upgrade::{UpgradeClusterOptions, NODE_DRAIN_GRACE_PERIOD_HELP, VERSION_HELP};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prompt for values instead of relying on flags and defaults.
    #[arg(short, long, global = true)]
    pub interactive: bool,

    /// Skip confirmation prompts.
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log the requests sent to the API.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to the config file.
    #[arg(
        long,
        global = true,
        env = "CLUSTERCTL_CONFIG",
        default_value = "clusterctl.yml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upgrade a resource.
    Upgrade {
        #[command(subcommand)]
        resource: UpgradeResource,
    },
    /// Revoke a role from a resource.
    Revoke {
        #[command(subcommand)]
        resource: RevokeResource,
    },
}

#[derive(Debug, Subcommand)]
pub enum UpgradeResource {
    /// Upgrade cluster to a new available version.
    #[command(after_help = UPGRADE_CLUSTER_EXAMPLES)]
    Cluster(UpgradeClusterArgs),
}

#[derive(Debug, Subcommand)]
pub enum RevokeResource {
    /// Revoke role from cluster user.
    #[command(visible_alias = "role", after_help = REVOKE_USER_EXAMPLES)]
    User(RevokeUserArgs),
}

const UPGRADE_CLUSTER_EXAMPLES: &str = "Examples:
  # Interactively schedule an upgrade on the cluster named \"mycluster\"
  clusterctl upgrade cluster --cluster=mycluster --interactive

  # Schedule a cluster upgrade within the hour
  clusterctl upgrade cluster -c mycluster --version 4.5.20";

const REVOKE_USER_EXAMPLES: &str = "Examples:
  # Revoke cluster-admin role from a user
  clusterctl revoke user cluster-admins --user=myusername --cluster=mycluster

  # Revoke dedicated-admin role from a user
  clusterctl revoke user dedicated-admins --user=myusername --cluster=mycluster";

#[derive(Debug, Clone, Args)]
pub struct UpgradeClusterArgs {
    /// Name or ID of the cluster to schedule the upgrade for.
    #[arg(short, long, value_name = "CLUSTER")]
    pub cluster: String,

    #[arg(long, help = VERSION_HELP)]
    pub version: Option<String>,

    /// Next date the upgrade should run at the specified time. Format should be 'yyyy-mm-dd'.
    #[arg(long, value_name = "DATE")]
    pub schedule_date: Option<String>,

    /// Next time the upgrade should run on the specified date. Format should be 'HH:mm'.
    #[arg(long, value_name = "TIME")]
    pub schedule_time: Option<String>,

    /// Defaults to the cluster's current grace period, or 1 hour.
    #[arg(long, value_name = "DURATION", long_help = NODE_DRAIN_GRACE_PERIOD_HELP)]
    pub node_drain_grace_period: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RevokeUserArgs {
    /// Group or role to revoke: cluster-admins or dedicated-admins.
    pub role: String,

    /// Name or ID of the cluster to delete the users from.
    #[arg(short, long, value_name = "CLUSTER")]
    pub cluster: String,

    /// Username to revoke the role from.
    #[arg(short, long, value_name = "USER")]
    pub user: String,
}

/// Empty flag values count as not given.
fn given(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<UpgradeClusterArgs> for UpgradeClusterOptions {
    fn from(args: UpgradeClusterArgs) -> Self {
        Self {
            cluster_key: args.cluster,
            version: given(args.version),
            schedule_date: given(args.schedule_date),
            schedule_time: given(args.schedule_time),
            node_drain_grace_period: given(args.node_drain_grace_period),
        }
    }
}

impl From<RevokeUserArgs> for RevokeUserOptions {
    fn from(args: RevokeUserArgs) -> Self {
        Self {
            cluster_key: args.cluster,
            username: args.user,
            role: args.role,
        }
    }
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Upgrade {
                resource: UpgradeResource::Cluster(args),
            } => Command::UpgradeCluster(args.into()),
            Commands::Revoke {
                resource: RevokeResource::User(args),
            } => Command::RevokeUser(args.into()),
        }
    }
}
