//! botsync - provision bot home directories and database accounts
//!
//! Walks the members of the bots group in the directory service and makes
//! sure each one has a home directory with the right ownership, a database
//! account with a stable password, a grant over its own databases, and a
//! stored credential file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use botsync_accounts::AccountStore;
use botsync_config::{DbCredentials, DirectoryConfig};
use botsync_directory::DirectoryClient;
use botsync_provisioning::{OsUsers, Reconciler, ReconcilerSettings};

mod error;

use error::{CliError, CliResult};

/// Directory client config file.
const LDAP_CONFIG_FILE: &str = "/etc/ldap.conf";

/// Database client config file.
const MYSQL_CONFIG_FILE: &str = "/root/.my.cnf";

/// Root under which bot home directories live.
const HOME_ROOT: &str = "/home";

/// Base DN for the group search.
const BASE_DN: &str = "dc=wikimedia,dc=org";

/// Filter matching the bots group.
const GROUP_FILTER: &str = "(&(objectClass=groupofnames)(cn=bots))";

/// Attributes fetched for each matched group.
const GROUP_ATTRS: &[&str] = &["member", "cn"];

/// Group owning freshly created home directories.
const SERVICE_GROUP: &str = "www-data";

/// Account database host.
const DB_HOST: &str = "localhost";

/// Provision bot home directories and database accounts.
#[derive(Parser)]
#[command(name = "botsync", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(short = 'd', long)]
    debug: bool,

    /// Directory client config file.
    #[arg(long, default_value = LDAP_CONFIG_FILE)]
    ldap_config: PathBuf,

    /// Database client config file.
    #[arg(long, default_value = MYSQL_CONFIG_FILE)]
    mysql_config: PathBuf,

    /// Root under which bot home directories are created.
    #[arg(long, default_value = HOME_ROOT)]
    home_root: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "provisioning run failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let directory_config = DirectoryConfig::load(&cli.ldap_config)?;
    let mut directory = DirectoryClient::connect(&directory_config).await?;

    let store = match connect_store(&cli.mysql_config).await {
        Ok(store) => store,
        Err(e) => {
            directory.disconnect().await;
            return Err(e);
        }
    };

    let entries = match directory
        .search_groups(BASE_DN, GROUP_FILTER, GROUP_ATTRS)
        .await
    {
        Ok(entries) if entries.is_empty() => {
            directory.disconnect().await;
            store.disconnect().await;
            return Err(CliError::NoGroupEntries);
        }
        Ok(entries) => entries,
        Err(e) => {
            directory.disconnect().await;
            store.disconnect().await;
            return Err(e.into());
        }
    };

    info!(entries = entries.len(), "matched group entries");

    let settings = ReconcilerSettings {
        home_root: cli.home_root,
        service_group: SERVICE_GROUP.to_string(),
    };
    let summary = Reconciler::new(store.clone(), OsUsers, settings)
        .run(&entries)
        .await;

    info!(
        processed = summary.processed,
        provisioned = summary.provisioned,
        already_provisioned = summary.already_provisioned,
        skipped = summary.skipped,
        "reconciliation finished"
    );

    directory.disconnect().await;
    store.disconnect().await;

    Ok(())
}

async fn connect_store(path: &Path) -> CliResult<AccountStore> {
    let credentials = DbCredentials::load(path)?;
    Ok(AccountStore::connect(&credentials, DB_HOST).await?)
}
