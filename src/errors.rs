//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent. Failures of the shared row store are NOT raised
//! through this type: they travel as `sync::SyncError` inside a
//! `SyncOutcome` and are only reported.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid guest entry: {0}")]
    Validation(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid capacity: {0} (must be a positive number)")]
    InvalidCapacity(i64),

    // ---------------------------
    // Session / ledger errors
    // ---------------------------
    #[error("No active event: start or join one first")]
    NoActiveEvent,

    #[error("Event '{0}' is already active: end it before starting another one")]
    EventAlreadyActive(String),

    #[error("Guest not found: {0}")]
    GuestNotFound(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Undo window expired ({0} seconds)")]
    UndoExpired(i64),

    #[error("Admin password rejected")]
    AdminDenied,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
