//! In-memory guest list of the active event, newest first.

use crate::models::category::SyncState;
use crate::models::guest::GuestRecord;
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(GuestRecord),
    /// Same name as the previous guest, inside the duplicate window: dropped.
    Duplicate(String),
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    guests: Vec<GuestRecord>,
    last_added_at: Option<NaiveDateTime>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted state; `guests` must be newest first.
    pub fn from_parts(guests: Vec<GuestRecord>, last_added_at: Option<NaiveDateTime>) -> Self {
        Self {
            guests,
            last_added_at,
        }
    }

    pub fn guests(&self) -> &[GuestRecord] {
        &self.guests
    }

    pub fn head(&self) -> Option<&GuestRecord> {
        self.guests.first()
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn last_added_at(&self) -> Option<NaiveDateTime> {
        self.last_added_at
    }

    pub fn find(&self, id: &str) -> Option<&GuestRecord> {
        self.guests.iter().find(|g| g.id == id)
    }

    fn is_duplicate(&self, record: &GuestRecord, now: NaiveDateTime, window: Duration) -> bool {
        let (Some(head), Some(last)) = (self.head(), self.last_added_at) else {
            return false;
        };
        same_name(&head.name, &record.name) && now - last < window
    }

    /// Prepend `record` unless it repeats the previous guest within `window`.
    pub fn add(&mut self, mut record: GuestRecord, now: NaiveDateTime, window: Duration) -> AddOutcome {
        if self.is_duplicate(&record, now, window) {
            return AddOutcome::Duplicate(record.name);
        }

        if self.find(&record.id).is_some() {
            record.id = self.unique_id(&record.id);
        }

        self.guests.insert(0, record.clone());
        self.last_added_at = Some(now);
        AddOutcome::Added(record)
    }

    fn unique_id(&self, base: &str) -> String {
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.find(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Remove the most recent guest. Undo is then unavailable until the next add.
    pub fn undo_last(&mut self) -> Option<GuestRecord> {
        if self.guests.is_empty() {
            return None;
        }
        self.last_added_at = None;
        Some(self.guests.remove(0))
    }

    /// Whether the UI should still offer undo at `now`.
    pub fn undo_available(&self, now: NaiveDateTime, window: Duration) -> bool {
        match self.last_added_at {
            Some(last) if !self.guests.is_empty() => now - last <= window,
            _ => false,
        }
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<GuestRecord> {
        let idx = self.guests.iter().position(|g| g.id == id)?;
        Some(self.guests.remove(idx))
    }

    pub fn set_sync_state(&mut self, id: &str, state: SyncState) {
        if let Some(g) = self.guests.iter_mut().find(|g| g.id == id) {
            g.sync_state = state;
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::models::guest::GuestEntry;
    use chrono::NaiveDate;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 20)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn at(secs: i64) -> NaiveDateTime {
        t0() + Duration::seconds(secs)
    }

    fn record(name: &str, when: NaiveDateTime) -> GuestRecord {
        classify(&GuestEntry::adult(name), when, "Party").unwrap()
    }

    fn window() -> Duration {
        Duration::seconds(5)
    }

    #[test]
    fn repeated_name_inside_window_is_dropped() {
        let mut l = Ledger::new();
        assert!(matches!(l.add(record("Ana", at(0)), at(0), window()), AddOutcome::Added(_)));
        assert_eq!(
            l.add(record("ana ", at(2)), at(2), window()),
            AddOutcome::Duplicate("ana".into())
        );
        assert_eq!(l.len(), 1);

        assert!(matches!(l.add(record("Ana", at(10)), at(10), window()), AddOutcome::Added(_)));
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn other_names_are_never_suppressed() {
        let mut l = Ledger::new();
        let _ = l.add(record("Ana", at(0)), at(0), window());
        assert!(matches!(l.add(record("Bia", at(1)), at(1), window()), AddOutcome::Added(_)));
    }

    #[test]
    fn newest_first_and_undo_takes_the_head() {
        let mut l = Ledger::new();
        for (i, n) in ["Ana", "Bia", "Caio"].iter().enumerate() {
            let when = at(i as i64 * 10);
            let _ = l.add(record(n, when), when, window());
        }
        let names: Vec<_> = l.guests().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Caio", "Bia", "Ana"]);

        let removed = l.undo_last().unwrap();
        assert_eq!(removed.name, "Caio");
        let names: Vec<_> = l.guests().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Bia", "Ana"]);
        assert!(l.last_added_at().is_none());
    }

    #[test]
    fn undo_window_is_advisory() {
        let mut l = Ledger::new();
        let _ = l.add(record("Ana", at(0)), at(0), window());
        let undo = Duration::seconds(15);
        assert!(l.undo_available(at(15), undo));
        assert!(!l.undo_available(at(16), undo));
        // the ledger itself still undoes
        assert!(l.undo_last().is_some());
        assert!(!l.undo_available(at(1), undo));
        assert!(l.undo_last().is_none());
    }

    #[test]
    fn colliding_ids_get_a_suffix() {
        let mut l = Ledger::new();
        let a = record("Ana", at(0));
        let b = record("Bia", at(0));
        assert_eq!(a.id, b.id);
        let _ = l.add(a, at(0), window());
        let AddOutcome::Added(b) = l.add(b, at(0), window()) else {
            panic!("Bia should be added");
        };
        assert_eq!(b.id, format!("{}-1", l.guests()[1].id));
    }

    #[test]
    fn remove_by_id_keeps_the_rest() {
        let mut l = Ledger::new();
        for (i, n) in ["Ana", "Bia", "Caio"].iter().enumerate() {
            let when = at(i as i64 * 10);
            let _ = l.add(record(n, when), when, window());
        }
        let bia = l.guests()[1].id.clone();
        assert_eq!(l.remove_by_id(&bia).unwrap().name, "Bia");
        assert!(l.remove_by_id(&bia).is_none());
        let names: Vec<_> = l.guests().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Caio", "Ana"]);
    }
}
