use crate::db::log::ttlog_soft;
use crate::store::StoreError;
use crate::ui::messages::warning;
use rusqlite::Connection;
use thiserror::Error;

/// Why a sheet operation did not happen. Never fatal.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("sheet is offline")]
    Offline,

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("row '{0}' not found in sheet")]
    NotFound(String),

    #[error("background writer stopped before confirming the write")]
    WorkerGone,
}

/// Result of a sheet operation: always a usable value (empty/false on
/// failure) plus the diagnostic of what went wrong, if anything.
#[must_use]
#[derive(Debug)]
pub struct SyncOutcome<T> {
    pub value: T,
    pub issue: Option<SyncError>,
}

impl<T> SyncOutcome<T> {
    pub fn done(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn is_ok(&self) -> bool {
        self.issue.is_none()
    }

    pub fn is_offline(&self) -> bool {
        matches!(self.issue, Some(SyncError::Offline))
    }

    /// Print a warning and record the failure in the internal log, then
    /// hand back the value. Offline mode is not reported: it is a choice.
    pub fn report(self, conn: &Connection, operation: &str, target: &str) -> T {
        if let Some(issue) = &self.issue
            && !matches!(issue, SyncError::Offline)
        {
            warning(format!("Sheet {} failed ({}), continuing locally.", operation, issue));
            ttlog_soft(conn, "sync_failed", target, &format!("{}: {}", operation, issue));
        }
        self.value
    }
}

impl<T: Default> SyncOutcome<T> {
    pub fn failed(issue: SyncError) -> Self {
        Self {
            value: T::default(),
            issue: Some(issue),
        }
    }
}

impl<T: Default> From<Result<T, SyncError>> for SyncOutcome<T> {
    fn from(r: Result<T, SyncError>) -> Self {
        match r {
            Ok(v) => SyncOutcome::done(v),
            Err(e) => SyncOutcome::failed(e),
        }
    }
}
