use crate::config::Config;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::info;
use crate::utils::table::Table;

/// Print every record, newest first, under the configured headers.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = store::open(cfg)?;
    let records = store.list_all()?;

    if records.is_empty() {
        info("The ledger is empty.");
        return Ok(());
    }

    let mut table = Table::new(cfg.headers.iter().cloned());
    for r in &records {
        table.add_row(vec![
            r.display_date(),
            r.time_str(),
            r.response.clone(),
            r.observation.clone(),
            r.area.clone(),
        ]);
    }

    print!("{}", table.render());
    println!("\n{} record(s) in {}", records.len(), store.location().display());
    Ok(())
}
