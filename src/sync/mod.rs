//! Mirroring of the local ledger onto the shared sheet.

pub mod adapter;
pub mod outcome;
pub mod worker;

pub use adapter::SyncAdapter;
pub use outcome::{SyncError, SyncOutcome};
pub use worker::{BackgroundWriter, WriteHandle, WriteStatus};
