//! Shared guest sheet.
//!
//! The sheet is an opaque, row-oriented store shared by every desk at the
//! entrance. It only supports appending a row, reading every row, finding
//! a row by its `id` column and deleting a row. Two backends exist: a shared
//! SQLite file and a shared CSV file.

mod csv_sheet;
mod sqlite_sheet;

pub use csv_sheet::CsvRowStore;
pub use sqlite_sheet::SqliteRowStore;

use crate::config::Config;
use crate::models::sheet_row::SheetRow;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sheet unavailable: {0}")]
    Unavailable(String),

    #[error("sheet I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sheet database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("sheet CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Position of a row inside the sheet, as returned by `find_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef(pub i64);

pub trait RowStore: Send {
    fn append_row(&mut self, row: &SheetRow) -> StoreResult<()>;

    /// Every row, in sheet order (oldest first).
    fn all_rows(&mut self) -> StoreResult<Vec<SheetRow>>;

    /// First row whose `id` column equals `id`.
    fn find_row(&mut self, id: &str) -> StoreResult<Option<RowRef>>;

    fn delete_row(&mut self, row: RowRef) -> StoreResult<()>;
}

/// Where the sheet lives. Cheap to clone so background workers can open
/// their own handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Sqlite(PathBuf),
    Csv(PathBuf),
    Off,
}

impl StoreTarget {
    pub fn from_config(cfg: &Config) -> Self {
        match cfg.store_kind.trim().to_lowercase().as_str() {
            "sqlite" => StoreTarget::Sqlite(expand_tilde(&cfg.store_path)),
            "csv" => StoreTarget::Csv(expand_tilde(&cfg.store_path)),
            _ => StoreTarget::Off,
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, StoreTarget::Off)
    }

    pub fn describe(&self) -> String {
        match self {
            StoreTarget::Sqlite(p) => format!("sqlite sheet {}", p.display()),
            StoreTarget::Csv(p) => format!("csv sheet {}", p.display()),
            StoreTarget::Off => "offline (no sheet)".to_string(),
        }
    }

    pub fn open(&self) -> StoreResult<Box<dyn RowStore>> {
        match self {
            StoreTarget::Sqlite(p) => Ok(Box::new(SqliteRowStore::open(p)?)),
            StoreTarget::Csv(p) => Ok(Box::new(CsvRowStore::open(p)?)),
            StoreTarget::Off => Err(StoreError::Unavailable("no sheet configured".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_follows_config() {
        let mut cfg = Config::with_database("/tmp/x.sqlite".into());
        cfg.store_path = "/tmp/sheet.csv".into();
        cfg.store_kind = "CSV".into();
        assert_eq!(
            StoreTarget::from_config(&cfg),
            StoreTarget::Csv(PathBuf::from("/tmp/sheet.csv"))
        );
        cfg.store_kind = "off".into();
        assert!(StoreTarget::from_config(&cfg).is_off());
        assert!(StoreTarget::Off.open().is_err());
    }
}
