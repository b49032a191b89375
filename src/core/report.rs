//! Head counts, always recomputed from the full guest list.

use crate::models::category::Category;
use crate::models::guest::GuestRecord;
use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub paying: usize,
    /// Non-paying children.
    pub exempt: usize,
    pub courtesy: usize,
}

impl Summary {
    pub fn from_guests(guests: &[GuestRecord]) -> Self {
        let total = guests.len();
        let paying = guests.iter().filter(|g| g.is_paying).count();
        let courtesy = guests
            .iter()
            .filter(|g| g.category == Category::Courtesy)
            .count();
        let not_paying = total - paying;

        Self {
            total,
            paying,
            exempt: not_paying.saturating_sub(courtesy),
            courtesy,
        }
    }
}

/// Arrivals per hour of the day ("HH" → count), ascending.
pub fn arrivals_by_hour(guests: &[GuestRecord]) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for g in guests {
        *out.entry(format!("{:02}", g.arrival_time.hour()))
            .or_insert(0) += 1;
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityStatus {
    pub total: usize,
    pub capacity: u32,
    /// Fill ratio capped at 1.0 for the progress bar.
    pub ratio: f64,
    pub reached: bool,
}

/// Compare the head count with the contract limit. Display only: guests
/// past the limit are still let in.
pub fn capacity_status(total: usize, capacity: u32) -> CapacityStatus {
    let cap = capacity.max(1) as f64;
    CapacityStatus {
        total,
        capacity,
        ratio: (total as f64 / cap).min(1.0),
        reached: total as u64 >= capacity as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::models::guest::GuestEntry;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn guests() -> Vec<GuestRecord> {
        [
            (GuestEntry::adult("Ana"), at(19, 10)),
            (GuestEntry::child("Leo", 5), at(19, 40)),
            (GuestEntry::child("Bia", 11), at(20, 5)),
            (GuestEntry::courtesy("Staff1"), at(21, 0)),
        ]
        .iter()
        .map(|(e, t)| classify(e, *t, "Party").unwrap())
        .collect()
    }

    #[test]
    fn counts_are_consistent() {
        let s = Summary::from_guests(&guests());
        assert_eq!(
            s,
            Summary {
                total: 4,
                paying: 2,
                exempt: 1,
                courtesy: 1
            }
        );
        assert_eq!(s.paying + s.exempt + s.courtesy, s.total);
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(Summary::from_guests(&[]), Summary::default());
    }

    #[test]
    fn hourly_histogram() {
        let h = arrivals_by_hour(&guests());
        let v: Vec<_> = h.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(v, vec![("19", 2), ("20", 1), ("21", 1)]);
    }

    #[test]
    fn capacity_is_advisory() {
        let c = capacity_status(5, 10);
        assert!(!c.reached);
        assert!((c.ratio - 0.5).abs() < f64::EPSILON);

        let c = capacity_status(12, 10);
        assert!(c.reached);
        assert_eq!(c.ratio, 1.0);
    }
}
