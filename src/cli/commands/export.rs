use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::{AppError, AppResult};
use crate::store;
use crate::utils::date;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        month,
        force,
    } = cmd
    {
        let month = month
            .as_deref()
            .map(|m| date::parse_month(m).ok_or_else(|| AppError::InvalidDate(m.to_string())))
            .transpose()?;

        let store = store::open(cfg)?;
        ExportLogic::export(
            store.as_ref(),
            &cfg.headers,
            *format, &expand_tilde(file), month, *force)?;
    }
    Ok(())
}
