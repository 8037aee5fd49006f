//! Bulk import of interchange documents into the ledger.
//!
//! The whole document is parsed and validated before the store is touched;
//! a single bad record rejects the batch.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::{ExchangeRecord, ImportFormat};
use crate::models::record::{DATE_FORMAT, parse_time};
use crate::models::{Markers, PresenceRecord};
use crate::store::RecordStore;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct ImportLogic;

impl ImportLogic {
    /// Import the document at `path`. Returns the number of records
    /// actually inserted; records already in the ledger are skipped.
    pub fn import(
        store: &mut dyn RecordStore,
        cfg: &Config,
        path: &Path,
        format: ImportFormat,
    ) -> AppResult<usize> {
        let content = fs::read_to_string(path)?;
        let parsed = parse(&content, format)?;
        debug!(count = parsed.len(), path = %path.display(), "interchange document parsed");

        let records = validate_all(&parsed, &cfg.markers())?;
        let inserted = store.import_batch(&records)?;

        info!(
            inserted,
            skipped = records.len() - inserted,
            "import finished"
        );
        Ok(inserted)
    }
}

/// Decode an interchange document. Structural problems are `Parse` errors;
/// missing fields come back empty and are caught by validation.
pub fn parse(content: &str, format: ImportFormat) -> AppResult<Vec<ExchangeRecord>> {
    match format {
        ImportFormat::Json => serde_json::from_str(content)
            .map_err(|e| AppError::Parse(format!("invalid JSON document: {e}"))),
        ImportFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_reader(content.as_bytes());
            rdr.deserialize()
                .enumerate()
                .map(|(i, row)| {
                    row.map_err(|e| AppError::Parse(format!("CSV row {}: {e}", i + 1)))
                })
                .collect()
        }
    }
}

/// Validate every record, stopping at the first failure.
pub fn validate_all(items: &[ExchangeRecord], markers: &Markers) -> AppResult<Vec<PresenceRecord>> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            validate(item, markers).map_err(|reason| AppError::Validation { position, reason })
        })
        .collect()
}

fn validate(item: &ExchangeRecord, markers: &Markers) -> Result<PresenceRecord, String> {
    for (name, value) in [
        ("date", &item.date),
        ("time", &item.time),
        ("response", &item.response),
    ] {
        if value.trim().is_empty() {
            return Err(format!("missing {name}"));
        }
    }

    let date = NaiveDate::parse_from_str(item.date.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}'", item.date))?;
    let time = parse_time(item.time.trim()).ok_or_else(|| format!("invalid time '{}'", item.time))?;

    let record = PresenceRecord {
        date,
        time,
        response: item.response.trim().to_string(),
        observation: item.observation.clone(),
        area: item.area.trim().to_string(),
    };
    record.check_area(markers)?;
    Ok(record)
}
