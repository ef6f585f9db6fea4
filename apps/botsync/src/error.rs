//! CLI error type and exit codes.

use thiserror::Error;

/// Exit codes:
/// - 0: success, even when individual members were skipped
/// - 1: fatal failure (config load, directory connect, database connect,
///   empty search)
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] botsync_config::ConfigError),

    #[error(transparent)]
    Directory(#[from] botsync_directory::DirectoryError),

    #[error(transparent)]
    Accounts(#[from] botsync_accounts::AccountError),

    #[error("directory search returned no group entries")]
    NoGroupEntries,
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
