//! Reconciliation engine.
//!
//! Walks the bot group membership and brings the system in line with it.
//! Each member is an independent reconciliation unit: failures are logged
//! and counted, never propagated, and every step is safe to re-run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use botsync_accounts::AccountOps;
use botsync_config::{stored_password, write_credential_file};
use botsync_directory::{username_from_member_dn, GroupEntry};

use crate::home::SystemUsers;
use crate::password;

/// Name of the per-bot credential file inside a home directory.
const CREDENTIAL_FILE: &str = ".my.cnf";

/// Settings for a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    /// Directory under which per-bot home directories are created.
    pub home_root: PathBuf,

    /// Group owning freshly created home directories.
    pub service_group: String,
}

/// What happened to a single group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberOutcome {
    /// Account, grant and credential file were put in place by this run.
    Provisioned,
    /// The account already existed; nothing was rewritten.
    AlreadyProvisioned,
    /// A per-member failure was logged and the member skipped.
    Skipped,
}

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Members seen across all group entries.
    pub processed: usize,
    /// Accounts newly provisioned.
    pub provisioned: usize,
    /// Members whose account already existed.
    pub already_provisioned: usize,
    /// Members skipped after a failure.
    pub skipped: usize,
}

impl RunSummary {
    fn add(&mut self, outcome: MemberOutcome) {
        self.processed += 1;
        match outcome {
            MemberOutcome::Provisioned => self.provisioned += 1,
            MemberOutcome::AlreadyProvisioned => self.already_provisioned += 1,
            MemberOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Maps directory group membership onto filesystem and database state.
pub struct Reconciler<A, S> {
    accounts: A,
    system: S,
    settings: ReconcilerSettings,
}

impl<A: AccountOps, S: SystemUsers> Reconciler<A, S> {
    /// Create a new reconciler over the given account store and system
    /// user database.
    pub fn new(accounts: A, system: S, settings: ReconcilerSettings) -> Self {
        Self {
            accounts,
            system,
            settings,
        }
    }

    /// Process every member of every matched group entry.
    ///
    /// The two live connections are shared across the whole run; members
    /// are processed strictly in sequence.
    pub async fn run(&self, entries: &[GroupEntry]) -> RunSummary {
        let mut summary = RunSummary::default();

        for entry in entries {
            debug!(dn = %entry.dn, cn = ?entry.cn, "processing group entry");
            for member in &entry.members {
                summary.add(self.reconcile_member(member).await);
            }
        }

        summary
    }

    async fn reconcile_member(&self, member: &str) -> MemberOutcome {
        let Some(username) = username_from_member_dn(member) else {
            error!(member = %member, "could not understand member DN");
            return MemberOutcome::Skipped;
        };

        let home = self.settings.home_root.join(username);
        if !self.ensure_home(username, &home) {
            return MemberOutcome::Skipped;
        }

        let credential_path = home.join(CREDENTIAL_FILE);
        let password = match stored_password(&credential_path) {
            Some(password) => password,
            None => password::generate(),
        };

        match self.accounts.user_exists(username).await {
            Ok(true) => {
                info!(username = %username, "skipping, account already exists");
                return MemberOutcome::AlreadyProvisioned;
            }
            Ok(false) => {}
            Err(e) => {
                error!(username = %username, error = %e, "account lookup failed");
                return MemberOutcome::Skipped;
            }
        }

        info!(username = %username, "creating account");
        if let Err(e) = self.accounts.create_user(username, &password).await {
            error!(username = %username, error = %e, "account creation failed");
            return MemberOutcome::Skipped;
        }

        debug!(username = %username, "granting access to bot databases");
        if let Err(e) = self.accounts.grant_bot_databases(username).await {
            error!(username = %username, error = %e, "privilege grant failed");
            return MemberOutcome::Skipped;
        }

        debug!("flushing privileges");
        self.accounts.flush_privileges().await;

        if let Err(e) = write_credential_file(&credential_path, username, &password) {
            error!(username = %username, error = %e, "failed to write credential file");
            return MemberOutcome::Skipped;
        }

        info!(username = %username, "provisioned");
        MemberOutcome::Provisioned
    }

    /// Make sure the member's home directory exists.
    ///
    /// Ownership is applied only when the directory is created by this
    /// run; pre-existing directories keep whatever ownership they have.
    fn ensure_home(&self, username: &str, home: &Path) -> bool {
        if home.exists() {
            return true;
        }

        info!(path = %home.display(), "home directory does not exist, creating");
        if let Err(e) = std::fs::create_dir_all(home) {
            error!(path = %home.display(), error = %e, "failed to create home directory");
            return false;
        }
        if !home.exists() {
            error!(path = %home.display(), "home directory missing after creation");
            return false;
        }

        let Some(uid) = self.system.resolve_uid(username) else {
            error!(username = %username, "could not resolve uid");
            return false;
        };
        let Some(gid) = self.system.resolve_gid(&self.settings.service_group) else {
            error!(group = %self.settings.service_group, "could not resolve gid");
            return false;
        };

        info!(path = %home.display(), uid, gid, "changing home directory ownership");
        if let Err(e) = self.system.chown(home, uid, gid) {
            error!(path = %home.display(), error = %e, "failed to change ownership");
            return false;
        }

        true
    }
}
