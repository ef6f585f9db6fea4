//! # botsync provisioning engine
//!
//! The reconciliation core: derives bot usernames from directory group
//! membership and applies the idempotent filesystem and database changes
//! each bot needs — a home directory with the right ownership, a database
//! account with a stable password, a grant over the bot's own databases,
//! and a stored credential file.
//!
//! ## Example
//!
//! ```ignore
//! use botsync_provisioning::{OsUsers, Reconciler, ReconcilerSettings};
//!
//! let reconciler = Reconciler::new(store, OsUsers, settings);
//! let summary = reconciler.run(&entries).await;
//! ```

pub mod engine;
pub mod home;
pub mod password;

// Re-exports
pub use engine::{MemberOutcome, Reconciler, ReconcilerSettings, RunSummary};
pub use home::{OsUsers, SystemUsers};
