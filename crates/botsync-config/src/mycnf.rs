//! MySQL client credential files.
//!
//! Covers both the administrative client config the provisioner
//! authenticates with and the per-bot `.my.cnf` files it writes into home
//! directories.

use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::flat::{parse_file, Dialect};

/// Credentials for a database account, read from a my.cnf-style file.
#[derive(Clone)]
pub struct DbCredentials {
    /// Account username.
    pub username: String,

    /// Account password.
    pub password: String,
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

impl DbCredentials {
    /// Load credentials from `path`.
    ///
    /// Requires a username (`user` or `username`) and a password (`pass` or
    /// `password`).
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut values = parse_file(path, Dialect::Database)?;
        let mut take =
            |key: &'static str| values.remove(key).ok_or_else(|| ConfigError::missing_key(key, path));

        let username = take("username")?;
        let password = take("password")?;

        Ok(Self { username, password })
    }
}

/// Read the password stored in a per-bot credential file.
///
/// Returns `None` when the file is missing, unreadable or has no parsable
/// `password` key; the caller generates a fresh password in that case.
#[must_use]
pub fn stored_password(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let mut values = parse_file(path, Dialect::Database).ok()?;
    values.remove("password")
}

/// Write a per-bot credential file, overwriting any existing one.
pub fn write_credential_file(path: &Path, username: &str, password: &str) -> ConfigResult<()> {
    std::fs::write(path, render(username, password)).map_err(|e| ConfigError::io(path, e))
}

// No separators between the fragments; this matches the layout of the
// credential files existing bots already have on disk.
fn render(username: &str, password: &str) -> String {
    format!("[mysql]user={username}password={password}")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_aliased_keys() {
        let file = write_config("[client]\nuser = root\npass = secret\n");

        let credentials = DbCredentials::load(file.path()).unwrap();
        assert_eq!(credentials.username, "root");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_load_missing_password() {
        let file = write_config("user = root\n");

        let err = DbCredentials::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "password", .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = DbCredentials {
            username: "root".to_string(),
            password: "secret".to_string(),
        };

        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_stored_password() {
        let file = write_config("user=alicebot\npassword=P1\n");

        assert_eq!(stored_password(file.path()), Some("P1".to_string()));
    }

    #[test]
    fn test_stored_password_missing_file() {
        let dir = TempDir::new().unwrap();

        assert_eq!(stored_password(&dir.path().join(".my.cnf")), None);
    }

    #[test]
    fn test_stored_password_unparsable_file() {
        let file = write_config("nothing useful here\n");

        assert_eq!(stored_password(file.path()), None);
    }

    #[test]
    fn test_credential_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".my.cnf");

        write_credential_file(&path, "alicebot", "PW").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[mysql]user=alicebotpassword=PW");
    }

    #[test]
    fn test_credential_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".my.cnf");

        write_credential_file(&path, "alicebot", "OLD").unwrap();
        write_credential_file(&path, "alicebot", "NEW").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[mysql]user=alicebotpassword=NEW");
    }
}
