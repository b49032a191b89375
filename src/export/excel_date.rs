// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret an export cell as a date (`YYYY-MM-DD`) or a time (`HH:MM`),
/// returning the Excel number format and serial value.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("dd/mm/yyyy", date_to_excel_serial(d)?));
    }

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm", seconds / 86400.0));
    }

    None
}

fn date_to_excel_serial(d: NaiveDate) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - excel_epoch).num_days() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_times() {
        assert_eq!(
            parse_to_excel_date("2025-09-20"),
            Some(("dd/mm/yyyy", 45920.0))
        );
        assert_eq!(parse_to_excel_date("18:00"), Some(("hh:mm", 0.75)));
        assert_eq!(parse_to_excel_date("Ana"), None);
        // ids are digits only, never dates
        assert_eq!(parse_to_excel_date("20250920180000000000"), None);
    }
}
