//! MySQL account store implementation.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use tracing::{debug, info};

use botsync_config::DbCredentials;

use crate::error::{AccountError, AccountResult};
use crate::quote::{escape_pattern, quote_identifier, quote_literal};

/// Database every connection starts in; account rows live in its `user`
/// table.
const DEFAULT_DATABASE: &str = "mysql";

/// Connection acquire timeout.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Operations the provisioner needs against the account database.
#[async_trait]
pub trait AccountOps: Send + Sync {
    /// Check whether an account with this username already exists.
    async fn user_exists(&self, username: &str) -> AccountResult<bool>;

    /// Create an account authenticating with `password` from any host.
    async fn create_user(&self, username: &str, password: &str) -> AccountResult<()>;

    /// Grant the account full privileges, with grant option, on every
    /// database named `<username>_<anything>`.
    async fn grant_bot_databases(&self, username: &str) -> AccountResult<()>;

    /// Reload the grant tables. Best-effort; failures are swallowed.
    async fn flush_privileges(&self);
}

/// Account store backed by the MySQL system schema.
#[derive(Clone)]
pub struct AccountStore {
    pool: MySqlPool,
}

impl AccountStore {
    /// Connect to the account database on `host` with the given client
    /// credentials.
    pub async fn connect(credentials: &DbCredentials, host: &str) -> AccountResult<Self> {
        debug!(host = %host, username = %credentials.username, "connecting to account database");

        let options = MySqlConnectOptions::new()
            .host(host)
            .username(&credentials.username)
            .password(&credentials.password)
            .database(DEFAULT_DATABASE);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .connect_with(options)
            .await
            .map_err(|e| {
                AccountError::connection_failed_with_source(
                    format!("failed to connect to {host}"),
                    e,
                )
            })?;

        info!(host = %host, "connected to account database");

        Ok(Self { pool })
    }

    /// Close the connection pool unconditionally.
    pub async fn disconnect(&self) {
        self.pool.close().await;
        debug!("disconnected from account database");
    }
}

#[async_trait]
impl AccountOps for AccountStore {
    async fn user_exists(&self, username: &str) -> AccountResult<bool> {
        let row = sqlx::query("SELECT User FROM mysql.user WHERE User = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::lookup_failed(username, e))?;

        Ok(row.is_some())
    }

    async fn create_user(&self, username: &str, password: &str) -> AccountResult<()> {
        sqlx::query(&create_statement(username, password))
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::create_failed(username, e))?;

        Ok(())
    }

    async fn grant_bot_databases(&self, username: &str) -> AccountResult<()> {
        sqlx::query(&grant_statement(username))
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::grant_failed(username, e))?;

        Ok(())
    }

    async fn flush_privileges(&self) {
        if let Err(e) = sqlx::query("FLUSH PRIVILEGES").execute(&self.pool).await {
            debug!(error = %e, "privilege flush failed");
        }
    }
}

fn create_statement(username: &str, password: &str) -> String {
    format!(
        "CREATE USER {}@'%' IDENTIFIED BY {}",
        quote_literal(username),
        quote_literal(password)
    )
}

fn grant_statement(username: &str) -> String {
    // `<username>\_%` scopes the grant to the bot's own databases; the
    // underscore separator is escaped so it cannot match a single
    // arbitrary character.
    let pattern = format!("{}\\_%", escape_pattern(username));
    format!(
        "GRANT ALL PRIVILEGES ON {}.* TO {}@'%' WITH GRANT OPTION",
        quote_identifier(&pattern),
        quote_literal(username)
    )
}
