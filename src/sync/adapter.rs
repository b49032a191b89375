use super::outcome::{SyncError, SyncOutcome};
use crate::models::guest::GuestRecord;
use crate::models::sheet_row::SheetRow;
use crate::store::{RowStore, StoreTarget};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashSet};

/// Best-effort mirror of the local ledger onto the shared sheet.
///
/// Each call opens its own handle on the sheet, so a broken sheet on one
/// call does not poison the next one. No method ever returns an error:
/// failures come back inside the `SyncOutcome`.
#[derive(Debug, Clone)]
pub struct SyncAdapter {
    target: StoreTarget,
}

impl SyncAdapter {
    pub fn new(target: StoreTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &StoreTarget {
        &self.target
    }

    pub fn is_online(&self) -> bool {
        !self.target.is_off()
    }

    fn with_store<T, F>(&self, op: F) -> Result<T, SyncError>
    where
        F: FnOnce(&mut dyn RowStore) -> Result<T, SyncError>,
    {
        if self.target.is_off() {
            return Err(SyncError::Offline);
        }
        let mut store = self.target.open()?;
        op(store.as_mut())
    }

    pub fn save(&self, guest: &GuestRecord) -> SyncOutcome<bool> {
        self.save_row(&SheetRow::from_guest(guest))
    }

    pub fn save_row(&self, row: &SheetRow) -> SyncOutcome<bool> {
        self.with_store(|s| {
            s.append_row(row)?;
            Ok(true)
        })
        .into()
    }

    /// Write the row announcing `event` and its capacity.
    pub fn announce(&self, event: &str, capacity: u32, now: NaiveDateTime) -> SyncOutcome<bool> {
        self.save_row(&SheetRow::sentinel(event, capacity, now))
    }

    pub fn delete(&self, id: &str) -> SyncOutcome<bool> {
        self.with_store(|s| match s.find_row(id)? {
            Some(r) => {
                s.delete_row(r)?;
                Ok(true)
            }
            None => Err(SyncError::NotFound(id.to_string())),
        })
        .into()
    }

    /// Guests of `event` registered on `today`, newest first, sentinel rows excluded.
    ///
    /// Rows without an id cannot be deleted or merged later and are skipped;
    /// when an id appears twice the newest row wins.
    pub fn load(&self, event: &str, today: NaiveDate) -> SyncOutcome<Vec<GuestRecord>> {
        self.with_store(|s| {
            let rows = s.all_rows()?;
            let mut seen = HashSet::new();
            Ok(rows
                .into_iter()
                .rev()
                .filter(|r| r.event.trim() == event.trim())
                .filter(|r| r.is_dated(today))
                .filter(|r| !r.is_sentinel())
                .filter(|r| {
                    let id = r.id.trim();
                    !id.is_empty() && seen.insert(id.to_string())
                })
                .map(|r| r.into_guest(today))
                .collect())
        })
        .into()
    }

    /// Distinct event names having at least one row dated `today`.
    pub fn list_active_events(&self, today: NaiveDate) -> SyncOutcome<Vec<String>> {
        self.with_store(|s| {
            let names: BTreeSet<String> = s
                .all_rows()?
                .into_iter()
                .filter(|r| r.is_dated(today))
                .map(|r| r.event.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            Ok(names.into_iter().collect())
        })
        .into()
    }

    /// Capacity announced by the newest sentinel row of `event` today.
    pub fn capacity_of(&self, event: &str, today: NaiveDate) -> SyncOutcome<Option<u32>> {
        self.with_store(|s| {
            Ok(s.all_rows()?
                .iter()
                .rev()
                .filter(|r| r.event.trim() == event.trim() && r.is_dated(today))
                .find_map(SheetRow::sentinel_capacity))
        })
        .into()
    }
}
