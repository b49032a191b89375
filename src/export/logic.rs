// src/export/logic.rs

use crate::core::session::EventSession;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::GuestExport;
use crate::export::report::export_report;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::NaiveDateTime;
use std::path::Path;

/// High-level entry points used by the `export` and `report` commands.
pub struct ExportLogic;

impl ExportLogic {
    /// Flat export of the session guest list, newest first.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path; an existing file needs `force` or
    ///   confirmation
    pub fn export(session: &EventSession, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows: Vec<GuestExport> = session.ledger.guests().iter().map(GuestExport::from).collect();
        if rows.is_empty() {
            warning("No guests registered yet, nothing to export.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path),
            ExportFormat::Json => export_json(&rows, path),
            ExportFormat::Xlsx => export_xlsx(&rows, &session.event_name, path),
        }
    }

    /// PDF report: summary block plus the guest table. Written even for
    /// an empty guest list.
    pub fn report(session: &EventSession, file: &str, force: bool, now: NaiveDateTime) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;
        export_report(session, path, now)
    }
}
