use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::{ConfigChanges, ConfigLogic};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
        goal,
        areas,
        headers,
        extra_label,
        markers,
    } = cmd
    else {
        return Ok(());
    };

    let changes = ConfigChanges {
        goal: *goal,
        areas: areas.clone(),
        headers: headers.clone(),
        extra_label: extra_label.clone(),
        markers: markers.as_deref().map(split_markers).transpose()?,
    };

    if !changes.is_empty() {
        let mut cfg = cfg.clone();
        ConfigLogic::apply(&mut cfg, changes)?;
        success(format!(
            "Configuration updated (revision {}): {}",
            cfg.revision,
            cfg.config_file().display()
        ));
    }

    if *check {
        let missing = ConfigLogic::check(cfg)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing fields: {}", missing.join(", ")));
            info("Run `presencial config --migrate` to add them.");
        }
    }

    if *migrate {
        let added = ConfigLogic::migrate(cfg)?;
        if added.is_empty() {
            info("Nothing to migrate.");
        } else {
            success(format!("Added fields: {}", added.join(", ")));
        }
    }

    if *print_config {
        println!("📄 Current configuration:\n");
        ConfigLogic::print(cfg)?;
    }

    if *edit_config {
        ConfigLogic::edit(cfg, editor)?;
        success("Configuration file edited.");
    }

    Ok(())
}

fn split_markers(raw: &str) -> AppResult<(String, String)> {
    match raw.split_once(',') {
        Some((yes, no)) if !no.contains(',') => Ok((yes.to_string(), no.to_string())),
        _ => Err(AppError::Config(format!(
            "--markers expects YES,NO (got '{raw}')"
        ))),
    }
}
