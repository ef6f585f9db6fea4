//! Directory client implementation.

use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use tracing::{debug, info, warn};

use botsync_config::DirectoryConfig;

use crate::error::{DirectoryError, DirectoryResult};

/// Connection timeout for the directory server.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// LDAP result code for invalidCredentials.
const RC_INVALID_CREDENTIALS: u32 = 49;

/// One group entry matched by the membership search.
#[derive(Debug, Clone)]
pub struct GroupEntry {
    /// Distinguished name of the group.
    pub dn: String,

    /// Common-name values of the group.
    pub cn: Vec<String>,

    /// Member DNs, in directory order.
    pub members: Vec<String>,
}

impl GroupEntry {
    fn from_search_entry(mut entry: SearchEntry) -> Self {
        Self {
            dn: entry.dn,
            cn: entry.attrs.remove("cn").unwrap_or_default(),
            members: entry.attrs.remove("member").unwrap_or_default(),
        }
    }
}

/// Authenticated connection to the directory service.
pub struct DirectoryClient {
    ldap: Ldap,
}

impl DirectoryClient {
    /// Connect to the directory server and authenticate.
    ///
    /// Transport security is negotiated via STARTTLS before the bind. A
    /// rejected bind surfaces as a failure; there is no anonymous fallback.
    pub async fn connect(config: &DirectoryConfig) -> DirectoryResult<Self> {
        debug!(uri = %config.uri, "connecting to directory server");

        let settings = LdapConnSettings::new()
            .set_conn_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .set_starttls(true);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &config.uri)
            .await
            .map_err(|e| {
                DirectoryError::connection_failed_with_source(
                    format!("failed to connect to {}", config.uri),
                    e,
                )
            })?;

        // Drive the connection until the handle is dropped.
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "directory connection driver error");
            }
        });

        debug!(bind_dn = %config.bind_dn, "performing simple bind");

        let result = ldap
            .simple_bind(&config.bind_dn, &config.bind_password)
            .await
            .map_err(|e| {
                DirectoryError::connection_failed_with_source(
                    format!("bind failed for {}", config.bind_dn),
                    e,
                )
            })?;

        if result.rc == RC_INVALID_CREDENTIALS {
            return Err(DirectoryError::AuthenticationFailed);
        }
        if result.rc != 0 {
            return Err(DirectoryError::connection_failed(format!(
                "bind failed with code {}: {}",
                result.rc, result.text
            )));
        }

        info!(uri = %config.uri, "connected to directory");

        Ok(Self { ldap })
    }

    /// Run one subtree search for group entries under `base_dn`.
    pub async fn search_groups(
        &mut self,
        base_dn: &str,
        filter: &str,
        attrs: &[&str],
    ) -> DirectoryResult<Vec<GroupEntry>> {
        debug!(base_dn = %base_dn, filter = %filter, "searching directory for groups");

        let result = self
            .ldap
            .search(base_dn, Scope::Subtree, filter, attrs.to_vec())
            .await
            .map_err(|e| {
                DirectoryError::search_failed_with_source(
                    format!("search under {base_dn} failed"),
                    e,
                )
            })?;

        let (entries, _res) = result.success().map_err(|e| {
            DirectoryError::search_failed(format!("search under {base_dn} failed: {e}"))
        })?;

        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(GroupEntry::from_search_entry)
            .collect())
    }

    /// Unbind from the directory. Failure to unbind is logged, not raised.
    pub async fn disconnect(mut self) {
        if let Err(e) = self.ldap.unbind().await {
            warn!(error = %e, "could not cleanly disconnect from directory");
        } else {
            debug!("disconnected from directory");
        }
    }
}
