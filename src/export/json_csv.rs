// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{ExchangeRecord, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed interchange document.
pub fn export_json(records: &[ExchangeRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Serialize(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Interchange CSV with a named header row.
pub fn export_csv(records: &[ExchangeRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    if records.is_empty() {
        // serde writes the header with the first row only
        wtr.write_record(crate::export::get_headers())?;
    }
    for item in records {
        wtr.serialize(item)
            .map_err(|e| AppError::Serialize(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
