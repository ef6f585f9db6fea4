//! Flat key/value config parsing.
//!
//! Two dialects are understood: the directory client config separates key
//! and value with a space (`uri ldap://ldap.example.org`), the database
//! client config with an equals sign (`user = root`). Lines that do not
//! split into a key and a value are skipped.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// The flat config dialects understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Space-separated `key value` lines (ldap.conf style).
    Directory,
    /// `key=value` lines (my.cnf style). `user` and `pass` are aliased to
    /// `username` and `password`.
    Database,
}

impl Dialect {
    fn separator(self) -> char {
        match self {
            Dialect::Directory => ' ',
            Dialect::Database => '=',
        }
    }

    fn canonical_key(self, key: &str) -> &str {
        match self {
            Dialect::Directory => key,
            Dialect::Database => match key {
                "user" => "username",
                "pass" => "password",
                other => other,
            },
        }
    }
}

/// Parse a flat config file into key/value pairs.
///
/// Splits each line on the first occurrence of the dialect separator and
/// trims both sides; later occurrences of a key overwrite earlier ones.
pub fn parse_file(path: &Path, dialect: Dialect) -> ConfigResult<HashMap<String, String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    Ok(parse_str(&contents, dialect))
}

fn parse_str(contents: &str, dialect: Dialect) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in contents.lines() {
        let Some((key, value)) = line.split_once(dialect.separator()) else {
            continue;
        };
        values.insert(
            dialect.canonical_key(key.trim()).to_string(),
            value.trim().to_string(),
        );
    }

    values
}
