use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::core::report;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{error, info, success};
use crate::utils::date;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Import { file, format } = cmd else {
        return Ok(());
    };

    let path = expand_tilde(file);
    info(format!("Importing {}", path.display()));

    let mut store = store::open(cfg)?;
    let inserted = match ImportLogic::import(store.as_mut(), cfg, &path, *format) {
        Ok(n) => n,
        Err(e) => {
            if e.is_storage() {
                error("Import rolled back, the ledger was not changed.");
            }
            return Err(e);
        }
    };

    success(format!("{inserted} record(s) imported."));

    println!();
    println!(
        "{}",
        report::report_or_fallback(store.as_ref(), cfg, date::today()).trim_end()
    );
    Ok(())
}
