use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// Creates (or reuses) the data directory, the configuration file and the
/// ledger. An existing configuration keeps its backend and ledger location;
/// a new one records `ledger` as its storage location.
pub fn handle(cmd: &Commands, data_dir: &Path, ledger: Option<&str>) -> AppResult<()> {
    let Commands::Init { backend } = cmd else {
        return Ok(());
    };

    let (mut cfg, existed) = Config::load_or_create_in(data_dir, *backend)?;
    if existed && cfg.backend != *backend {
        warning(format!(
            "Configuration already uses the {} backend; keeping it.",
            cfg.backend.as_str()
        ));
    }

    if let Some(path) = ledger {
        cfg.storage_location = path.to_string();
        if existed {
            warning("Ledger location is fixed after the first run; --ledger applies to this run only.");
        } else {
            cfg.save()?;
        }
    }

    println!("⚙️  Initializing presencial…");
    println!("📄 Config file : {}", cfg.config_file().display());
    println!("🗄️  Ledger      : {} ({})", cfg.ledger_path().display(), cfg.backend.as_str());

    let mut store = store::open(&cfg)?;
    let message = format!("Ledger initialized at {}", store.location().display());
    if let Err(e) = store.record_event("init", "ledger", &message) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("presencial initialization completed!");
    Ok(())
}
