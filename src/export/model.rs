// src/export/model.rs

use crate::models::guest::GuestRecord;
use serde::Serialize;

/// Flat guest row for CSV / JSON / XLSX.
#[derive(Serialize, Clone, Debug)]
pub struct GuestExport {
    pub id: String,
    pub date: String,
    pub time: String,
    pub name: String,
    pub category: String,
    pub age: String,
    pub status: String,
    pub paying: bool,
    pub event: String,
}

impl From<&GuestRecord> for GuestExport {
    fn from(g: &GuestRecord) -> Self {
        Self {
            id: g.id.clone(),
            date: g.date_str(),
            time: g.time_str(),
            name: g.name.clone(),
            category: g.category.label().to_string(),
            age: g.age_display.clone(),
            status: g.status.label().to_string(),
            paying: g.is_paying,
            event: g.event_name.clone(),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id", "date", "time", "name", "category", "age", "status", "paying", "event",
    ]
}

pub(crate) fn guest_to_row(g: &GuestExport) -> Vec<String> {
    vec![
        g.id.clone(),
        g.date.clone(),
        g.time.clone(),
        g.name.clone(),
        g.category.clone(),
        g.age.clone(),
        g.status.clone(),
        if g.paying { "yes" } else { "no" }.to_string(),
        g.event.clone(),
    ]
}

/// Columns of the PDF report table.
pub(crate) fn report_headers() -> Vec<&'static str> {
    vec!["Name", "Category", "Age", "Status", "Time"]
}

pub(crate) fn guests_to_report_table(guests: &[GuestRecord]) -> Vec<Vec<String>> {
    guests
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                g.category.label().to_string(),
                g.age_display.clone(),
                g.status.label().to_string(),
                g.time_str(),
            ]
        })
        .collect()
}
