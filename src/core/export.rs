use crate::errors::AppResult;
use crate::export::{self, ExchangeRecord, ExportFormat, ensure_writable};
use crate::store::RecordStore;
use crate::utils::date::same_month;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the ledger to `path`, newest record first.
    ///
    /// `headers` label the spreadsheet columns; JSON and CSV keep the
    /// interchange field names so the output can be imported back.
    /// `month` narrows the output to one calendar month; `None` exports
    /// every record, which is what a later `import` expects for a full copy.
    pub fn export(
        store: &dyn RecordStore,
        headers: &[String],
        format: ExportFormat,
        path: &Path,
        month: Option<NaiveDate>,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(path, force)?;

        let records: Vec<ExchangeRecord> = store
            .list_all()?
            .iter()
            .filter(|r| month.is_none_or(|m| same_month(r.date, m)))
            .map(ExchangeRecord::from)
            .collect();

        Self::write(format, &records, headers, path)?;

        info!(format = format.as_str(), count = records.len(), path = %path.display(), "ledger exported");
        Ok(records.len())
    }

    fn write(
        format: ExportFormat,
        records: &[ExchangeRecord],
        headers: &[String],
        path: &Path,
    ) -> AppResult<()> {
        match format {
            ExportFormat::Json => export::export_json(records, path),
            ExportFormat::Csv => export::export_csv(records, path),
            ExportFormat::Xlsx => export::export_xlsx(records, headers, path),
        }
    }
}
