//! # botsync directory client
//!
//! LDAP client for the bot-group membership search.
//!
//! This crate opens an encrypted, authenticated connection to the directory
//! service, runs the one subtree search the provisioner needs, and maps
//! member DNs to bot usernames.
//!
//! ## Example
//!
//! ```ignore
//! use botsync_directory::DirectoryClient;
//!
//! let mut client = DirectoryClient::connect(&config).await?;
//! let entries = client
//!     .search_groups("dc=example,dc=org", "(cn=bots)", &["member", "cn"])
//!     .await?;
//! client.disconnect().await;
//! ```

pub mod client;
pub mod error;
pub mod member;

// Re-exports
pub use client::{DirectoryClient, GroupEntry};
pub use error::{DirectoryError, DirectoryResult};
pub use member::username_from_member_dn;
