use super::category::{Category, PaymentStatus, SyncState};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Placeholder shown in the age column for adults and courtesy guests.
pub const AGE_PLACEHOLDER: &str = "-";

/// Raw input collected at the entrance, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestEntry {
    pub name: String,
    pub category: Category,
    pub age: Option<u32>,
}

impl GuestEntry {
    pub fn adult(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Adult,
            age: None,
        }
    }

    pub fn child(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            category: Category::Child,
            age: Some(age),
        }
    }

    pub fn courtesy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Courtesy,
            age: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestRecord {
    pub id: String,                // ⇔ sheet "id" (time-derived)
    pub name: String,              // ⇔ sheet "Nome"
    pub category: Category,        // ⇔ sheet "Tipo"
    pub age_display: String,       // ⇔ sheet "Idade"
    pub status: PaymentStatus,     // ⇔ sheet "Status"
    pub is_paying: bool,           // derived from category/age, never stored in the sheet
    pub arrival_time: NaiveTime,   // ⇔ sheet "Hora" (HH:MM)
    pub arrival_date: NaiveDate,   // ⇔ sheet "Data" (dd/mm/YYYY)
    pub event_name: String,        // ⇔ sheet "Evento"
    pub sync_state: SyncState,     // local only
}

impl GuestRecord {
    /// Build the time-derived identifier used as the sheet key.
    pub fn make_id(now: NaiveDateTime) -> String {
        now.format("%Y%m%d%H%M%S%6f").to_string()
    }

    pub fn time_str(&self) -> String {
        self.arrival_time.format("%H:%M").to_string()
    }

    pub fn date_str(&self) -> String {
        self.arrival_date.format("%Y-%m-%d").to_string()
    }

    /// Label used by the admin delete picker: "Name (HH:MM)".
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.name, self.time_str())
    }
}
