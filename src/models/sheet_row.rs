//! Flat row stored in the shared sheet.
//! Column order is the wire format: id, Nome, Tipo, Idade, Status, Hora, Data, Evento.

use super::category::{Category, PaymentStatus, SyncState};
use crate::core::classify::CHILD_EXEMPT_MAX_AGE;
use super::guest::{AGE_PLACEHOLDER, GuestRecord};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Status marker of the row announcing a new event.
pub const SENTINEL_STATUS: &str = "SYSTEM_START";

pub const SHEET_DATE_FMT: &str = "%d/%m/%Y";
pub const SHEET_TIME_FMT: &str = "%H:%M";

pub const SHEET_HEADERS: [&str; 8] = [
    "id", "Nome", "Tipo", "Idade", "Status", "Hora", "Data", "Evento",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "id", default)]
    pub id: String,
    #[serde(rename = "Nome", default)]
    pub name: String,
    #[serde(rename = "Tipo", default)]
    pub kind: String,
    #[serde(rename = "Idade", default)]
    pub age: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Hora", default)]
    pub time: String,
    #[serde(rename = "Data", default)]
    pub date: String,
    #[serde(rename = "Evento", default)]
    pub event: String,
}

impl SheetRow {
    pub fn from_guest(g: &GuestRecord) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            kind: g.category.label().to_string(),
            age: g.age_display.clone(),
            status: g.status.label().to_string(),
            time: g.arrival_time.format(SHEET_TIME_FMT).to_string(),
            date: g.arrival_date.format(SHEET_DATE_FMT).to_string(),
            event: g.event_name.clone(),
        }
    }

    /// Row announcing an event; the capacity travels in the age column.
    pub fn sentinel(event: &str, capacity: u32, now: NaiveDateTime) -> Self {
        Self {
            id: GuestRecord::make_id(now),
            name: "SYSTEM".to_string(),
            kind: AGE_PLACEHOLDER.to_string(),
            age: capacity.to_string(),
            status: SENTINEL_STATUS.to_string(),
            time: now.format(SHEET_TIME_FMT).to_string(),
            date: now.format(SHEET_DATE_FMT).to_string(),
            event: event.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.status.trim() == SENTINEL_STATUS
    }

    pub fn sentinel_capacity(&self) -> Option<u32> {
        if !self.is_sentinel() {
            return None;
        }
        self.age.trim().parse::<u32>().ok().filter(|c| *c > 0)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), SHEET_DATE_FMT).ok()
    }

    pub fn is_dated(&self, day: NaiveDate) -> bool {
        self.parsed_date() == Some(day)
    }

    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.clone(),
            self.age.clone(),
            self.status.clone(),
            self.time.clone(),
            self.date.clone(),
            self.event.clone(),
        ]
    }

    /// Build a row from positional cells; missing trailing cells become "".
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            id: cell(0),
            name: cell(1),
            kind: cell(2),
            age: cell(3),
            status: cell(4),
            time: cell(5),
            date: cell(6),
            event: cell(7),
        }
    }

    /// Normalise a sheet row into a guest record.
    ///
    /// Missing or unreadable fields fall back to defaults: status derived
    /// from the category, category inferred from the status (Adult when both
    /// are missing), age "-", time 00:00, date `today`.
    /// A stored status wins over the category, as other clients may have
    /// written rows with a different child threshold.
    pub fn into_guest(self, fallback_date: NaiveDate) -> GuestRecord {
        let stored_status = PaymentStatus::from_label(&self.status);
        let category = Category::from_label(&self.kind).unwrap_or(match stored_status {
            Some(PaymentStatus::Courtesy) => Category::Courtesy,
            Some(PaymentStatus::Exempt) => Category::Child,
            Some(PaymentStatus::Paying) | None => Category::Adult,
        });
        let status = stored_status.unwrap_or_else(|| status_for(category, &self.age));
        let age_display = if self.age.trim().is_empty() {
            AGE_PLACEHOLDER.to_string()
        } else {
            self.age.trim().to_string()
        };
        let arrival_time =
            NaiveTime::parse_from_str(self.time.trim(), SHEET_TIME_FMT).unwrap_or(NaiveTime::MIN);
        let arrival_date = self.parsed_date().unwrap_or(fallback_date);

        GuestRecord {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            category,
            age_display,
            status,
            is_paying: status.is_paying(),
            arrival_time,
            arrival_date,
            event_name: self.event.trim().to_string(),
            sync_state: SyncState::Synced,
        }
    }
}

/// Status of a row whose own status cell is missing. A child whose age
/// cannot be read is taken as exempt.
fn status_for(category: Category, age: &str) -> PaymentStatus {
    match category {
        Category::Adult => PaymentStatus::Paying,
        Category::Courtesy => PaymentStatus::Courtesy,
        Category::Child => match leading_number(age) {
            Some(n) if n > CHILD_EXEMPT_MAX_AGE => PaymentStatus::Paying,
            _ => PaymentStatus::Exempt,
        },
    }
}

/// "6 anos" -> 6
fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    }

    #[test]
    fn sentinel_carries_capacity() {
        let now = day().and_hms_opt(18, 30, 0).unwrap();
        let row = SheetRow::sentinel("Test Party", 120, now);
        assert!(row.is_sentinel());
        assert_eq!(row.sentinel_capacity(), Some(120));
        assert_eq!(row.date, "20/09/2025");
        assert!(row.is_dated(day()));
    }

    #[test]
    fn sparse_row_is_normalised() {
        let row = SheetRow::from_cells(&["42".into(), " Bia ".into()]);
        let g = row.into_guest(day());
        assert_eq!(g.name, "Bia");
        assert_eq!(g.category, Category::Adult);
        assert_eq!(g.status, PaymentStatus::Paying);
        assert!(g.is_paying);
        assert_eq!(g.age_display, "-");
        assert_eq!(g.arrival_date, day());
        assert_eq!(g.arrival_time, NaiveTime::MIN);
    }

    #[test]
    fn legacy_status_decides_payment() {
        let row = SheetRow {
            id: "1".into(),
            name: "Leo".into(),
            kind: "Criança".into(),
            age: "6 anos".into(),
            status: "Isento".into(),
            time: "19:05".into(),
            date: "20/09/2025".into(),
            event: "Aniversário".into(),
        };
        let g = row.into_guest(day());
        assert_eq!(g.category, Category::Child);
        assert!(!g.is_paying);
        assert_eq!(g.time_str(), "19:05");
    }

    #[test]
    fn missing_status_follows_the_category() {
        let row = |kind: &str, age: &str| SheetRow {
            id: "7".into(),
            name: "Rui".into(),
            kind: kind.into(),
            age: age.into(),
            date: "20/09/2025".into(),
            event: "Party".into(),
            ..SheetRow::default()
        };

        let g = row("Cortesia", "-").into_guest(day());
        assert_eq!(g.category, Category::Courtesy);
        assert_eq!(g.status, PaymentStatus::Courtesy);
        assert!(!g.is_paying);

        let g = row("Criança", "5 anos").into_guest(day());
        assert_eq!(g.status, PaymentStatus::Exempt);
        assert!(!g.is_paying);

        let g = row("Criança", "9").into_guest(day());
        assert_eq!(g.status, PaymentStatus::Paying);
        assert!(g.is_paying);

        let g = row("Adulto", "-").into_guest(day());
        assert_eq!(g.status, PaymentStatus::Paying);
    }
}
