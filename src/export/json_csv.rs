// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{GuestExport, notify_export_success};
use crate::ui::messages::info;
use std::fs;
use std::path::Path;

pub(crate) fn export_json(guests: &[GuestExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(guests)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
    fs::write(path, json_data)?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with a header row taken from the serde field names.
pub(crate) fn export_csv(guests: &[GuestExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr =
        csv::Writer::from_path(path).map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for g in guests {
        wtr.serialize(g)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
