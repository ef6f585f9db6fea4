//! Directory client configuration.

use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::flat::{parse_file, Dialect};

/// Connection settings for the directory service, read from the flat
/// ldap.conf-style client config.
#[derive(Clone)]
pub struct DirectoryConfig {
    /// Directory server URI (e.g. `ldap://ldap.example.org`).
    pub uri: String,

    /// DN used to authenticate.
    pub bind_dn: String,

    /// Password for the bind DN.
    pub bind_password: String,
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("uri", &self.uri)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"***REDACTED***")
            .finish()
    }
}

impl DirectoryConfig {
    /// Load the directory client config from `path`.
    ///
    /// Requires the `uri`, `binddn` and `bindpw` keys.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut values = parse_file(path, Dialect::Directory)?;
        let mut take =
            |key: &'static str| values.remove(key).ok_or_else(|| ConfigError::missing_key(key, path));

        let uri = take("uri")?;
        let bind_dn = take("binddn")?;
        let bind_password = take("bindpw")?;

        Ok(Self {
            uri,
            bind_dn,
            bind_password,
        })
    }
}
