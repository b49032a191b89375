//! Guest classification: category, payment status and age column.

use crate::errors::{AppError, AppResult};
use crate::models::category::{Category, PaymentStatus, SyncState};
use crate::models::guest::{AGE_PLACEHOLDER, GuestEntry, GuestRecord};
use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Children up to this age (inclusive) enter for free.
pub const CHILD_EXEMPT_MAX_AGE: u32 = 7;

/// Category-dependent fields of a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: PaymentStatus,
    pub is_paying: bool,
    pub age_display: String,
}

pub fn classify_fields(category: Category, age: Option<u32>) -> AppResult<Classification> {
    match category {
        Category::Adult => Ok(Classification {
            status: PaymentStatus::Paying,
            is_paying: true,
            age_display: AGE_PLACEHOLDER.to_string(),
        }),
        Category::Child => {
            let age = age
                .filter(|a| *a > 0)
                .ok_or_else(|| AppError::Validation("age is required for a child".into()))?;
            let is_paying = age > CHILD_EXEMPT_MAX_AGE;
            Ok(Classification {
                status: if is_paying {
                    PaymentStatus::Paying
                } else {
                    PaymentStatus::Exempt
                },
                is_paying,
                age_display: format!("{} years", age),
            })
        }
        Category::Courtesy => Ok(Classification {
            status: PaymentStatus::Courtesy,
            is_paying: false,
            age_display: AGE_PLACEHOLDER.to_string(),
        }),
    }
}

/// Turn a raw entry into a guest record of `event_name`, arrived at `now`.
pub fn classify(entry: &GuestEntry, now: NaiveDateTime, event_name: &str) -> AppResult<GuestRecord> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("guest name is empty".into()));
    }

    let fields = classify_fields(entry.category, entry.age)?;

    Ok(GuestRecord {
        id: GuestRecord::make_id(now),
        name: name.to_string(),
        category: entry.category,
        age_display: fields.age_display,
        status: fields.status,
        is_paying: fields.is_paying,
        arrival_time: minute_of(now),
        arrival_date: now.date(),
        event_name: event_name.to_string(),
        sync_state: SyncState::Local,
    })
}

/// Arrival times are kept at minute precision, like the sheet.
fn minute_of(now: NaiveDateTime) -> NaiveTime {
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 20)
            .unwrap()
            .and_hms_micro_opt(20, 41, 17, 123_456)
            .unwrap()
    }

    #[test]
    fn adult_pays() {
        let g = classify(&GuestEntry::adult("Ana"), now(), "Party").unwrap();
        assert!(g.is_paying);
        assert_eq!(g.status, PaymentStatus::Paying);
        assert_eq!(g.age_display, "-");
        assert_eq!(g.id, "20250920204117123456");
        assert_eq!(g.time_str(), "20:41");
    }

    #[test]
    fn child_threshold_is_inclusive() {
        for age in 1..=CHILD_EXEMPT_MAX_AGE {
            let g = classify(&GuestEntry::child("Leo", age), now(), "Party").unwrap();
            assert!(!g.is_paying, "age {age}");
            assert_eq!(g.status, PaymentStatus::Exempt);
        }
        for age in (CHILD_EXEMPT_MAX_AGE + 1)..=17 {
            let g = classify(&GuestEntry::child("Leo", age), now(), "Party").unwrap();
            assert!(g.is_paying, "age {age}");
            assert_eq!(g.status, PaymentStatus::Paying);
        }
        let g = classify(&GuestEntry::child("Leo", 5), now(), "Party").unwrap();
        assert_eq!(g.age_display, "5 years");
    }

    #[test]
    fn courtesy_never_pays() {
        for age in [None, Some(3), Some(40)] {
            let entry = GuestEntry {
                name: "Staff1".into(),
                category: Category::Courtesy,
                age,
            };
            let g = classify(&entry, now(), "Party").unwrap();
            assert!(!g.is_paying);
            assert_eq!(g.status, PaymentStatus::Courtesy);
            assert_eq!(g.age_display, "-");
        }
    }

    #[test]
    fn invalid_entries_are_rejected() {
        assert!(matches!(
            classify(&GuestEntry::adult("   "), now(), "Party"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            classify(&GuestEntry::child("Leo", 0), now(), "Party"),
            Err(AppError::Validation(_))
        ));
        let no_age = GuestEntry {
            name: "Leo".into(),
            category: Category::Child,
            age: None,
        };
        assert!(classify(&no_age, now(), "Party").is_err());
    }
}
