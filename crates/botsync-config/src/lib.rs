//! # botsync configuration
//!
//! Parsing for the two flat client config dialects botsync reads, typed
//! config structs with required-field validation, and the per-bot
//! credential files the provisioner maintains.
//!
//! ## Example
//!
//! ```ignore
//! use botsync_config::DirectoryConfig;
//!
//! let config = DirectoryConfig::load(Path::new("/etc/ldap.conf"))?;
//! ```

pub mod directory;
pub mod error;
pub mod flat;
pub mod mycnf;

// Re-exports
pub use directory::DirectoryConfig;
pub use error::{ConfigError, ConfigResult};
pub use flat::{parse_file, Dialect};
pub use mycnf::{stored_password, write_credential_file, DbCredentials};
