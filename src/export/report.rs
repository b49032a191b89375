// src/export/report.rs

use crate::core::classify::CHILD_EXEMPT_MAX_AGE;
use crate::core::session::EventSession;
use crate::errors::{AppError, AppResult};
use crate::export::model::{guests_to_report_table, report_headers};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use chrono::NaiveDateTime;
use std::path::Path;

/// Summary lines printed above the guest table.
pub(crate) fn report_preamble(session: &EventSession, generated_at: NaiveDateTime) -> Vec<String> {
    let s = session.summary();
    vec![
        format!("Generated: {}", generated_at.format("%d/%m/%Y %H:%M")),
        format!("Capacity: {}", session.capacity),
        format!("Total present: {}", s.total),
        format!("Paying: {}", s.paying),
        format!("Exempt children (<= {}): {}", CHILD_EXEMPT_MAX_AGE, s.exempt),
        format!("Courtesy: {}", s.courtesy),
    ]
}

pub(crate) fn build_report(session: &EventSession, generated_at: NaiveDateTime) -> PdfManager {
    let mut pdf = PdfManager::new();
    pdf.write_table(
        &format!("Report: {}", session.event_name),
        &report_preamble(session, generated_at),
        &report_headers(),
        &guests_to_report_table(session.ledger.guests()),
    );
    pdf
}

pub(crate) fn export_report(session: &EventSession, path: &Path, generated_at: NaiveDateTime) -> AppResult<()> {
    info(format!("Writing PDF report: {}", path.display()));

    build_report(session, generated_at)
        .save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::models::guest::GuestEntry;
    use chrono::NaiveDate;

    #[test]
    fn preamble_carries_the_summary() {
        let now = NaiveDate::from_ymd_opt(2025, 9, 20)
            .unwrap()
            .and_hms_opt(22, 30, 0)
            .unwrap();
        let mut session = EventSession::new("Test Party", 10, now);
        for e in [GuestEntry::adult("Ana"), GuestEntry::child("Leo", 5)] {
            let g = classify(&e, now, "Test Party").unwrap();
            session.ledger.add(g, now, chrono::Duration::zero());
        }

        let lines = report_preamble(&session, now);
        assert_eq!(lines[0], "Generated: 20/09/2025 22:30");
        assert!(lines.contains(&"Total present: 2".to_string()));
        assert!(lines.contains(&"Exempt children (<= 7): 1".to_string()));

        assert_eq!(build_report(&session, now).page_count(), 1);
    }
}
