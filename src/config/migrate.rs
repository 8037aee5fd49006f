//! Carry settings over from older installations and detect configuration
//! files written by previous versions.

use super::{CONFIG_FILE_NAME, Config, MAX_GOAL, MIN_GOAL};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// JSON settings file written by the desktop releases.
pub const LEGACY_JSON_FILE: &str = "config.json";
/// Plain text file holding only the monthly goal.
pub const LEGACY_GOAL_FILE: &str = "config.txt";

/// Keys every current configuration file carries.
pub const FIELDS: [&str; 11] = [
    "folder_name",
    "storage_location",
    "backend",
    "default_goal",
    "extra_label",
    "area_options",
    "headers",
    "yes_marker",
    "no_marker",
    "goal_policy",
    "revision",
];

#[derive(Debug, Deserialize)]
struct LegacyJsonConfig {
    #[serde(rename = "folderName")]
    folder_name: Option<String>,
    #[serde(rename = "extraLabel")]
    extra_label: Option<String>,
    #[serde(rename = "areaOptions")]
    area_options: Option<Vec<String>>,
    headers: Option<Vec<String>>,
    #[serde(rename = "meta")]
    goal: Option<i64>,
    #[serde(rename = "respostaSim")]
    yes: Option<String>,
    #[serde(rename = "respostaNao")]
    no: Option<String>,
}

/// Apply values from a legacy settings file found in `dir` onto `cfg`.
/// Returns true if anything was carried over. Individual values that fail
/// validation are skipped with a warning, the defaults stay in place.
pub fn apply_legacy(dir: &Path, cfg: &mut Config) -> AppResult<bool> {
    let json_path = dir.join(LEGACY_JSON_FILE);
    if json_path.exists() {
        let content = fs::read_to_string(&json_path)?;
        let legacy: LegacyJsonConfig = serde_json::from_str(&content)
            .map_err(|e| AppError::Decode(format!("{}: {e}", json_path.display())))?;
        apply_json(legacy, cfg);
        return Ok(true);
    }

    let goal_path = dir.join(LEGACY_GOAL_FILE);
    if goal_path.exists() {
        let content = fs::read_to_string(&goal_path)?;
        return Ok(apply_goal(content.trim().parse::<i64>().ok(), cfg));
    }

    Ok(false)
}

fn apply_json(legacy: LegacyJsonConfig, cfg: &mut Config) {
    if let Some(name) = legacy.folder_name.filter(|n| !n.trim().is_empty()) {
        cfg.folder_name = name;
    }
    if let Some(label) = legacy.extra_label {
        let _ = cfg.set_extra_label(&label);
    }
    if let Some(areas) = legacy.area_options
        && let Err(e) = cfg.replace_areas(areas)
    {
        warn!("legacy area list ignored: {e}");
    }
    if let Some(headers) = legacy.headers
        && let Err(e) = cfg.replace_headers(headers)
    {
        warn!("legacy headers ignored: {e}");
    }
    if let (Some(yes), Some(no)) = (legacy.yes, legacy.no)
        && let Err(e) = cfg.set_markers(&yes, &no)
    {
        warn!("legacy markers ignored: {e}");
    }
    apply_goal(legacy.goal, cfg);
}

fn apply_goal(goal: Option<i64>, cfg: &mut Config) -> bool {
    match goal {
        Some(g) if (MIN_GOAL as i64..=MAX_GOAL as i64).contains(&g) => {
            cfg.default_goal = g as u32;
            true
        }
        Some(g) => {
            warn!("legacy goal {g} out of range, keeping {}", cfg.default_goal);
            false
        }
        None => false,
    }
}

/// List the keys missing from the configuration file in `dir`.
pub fn missing_fields(dir: &Path) -> AppResult<Vec<&'static str>> {
    let path = dir.join(CONFIG_FILE_NAME);
    let content = fs::read_to_string(&path)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Decode(format!("{}: {e}", path.display())))?;

    let Some(map) = yaml.as_mapping() else {
        return Err(AppError::Decode(format!(
            "{}: expected a mapping at top level",
            path.display()
        )));
    };

    Ok(FIELDS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite the configuration file in `dir` with every key present.
/// Returns the keys that were added.
pub fn upgrade(dir: &Path) -> AppResult<Vec<&'static str>> {
    let missing = missing_fields(dir)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let (cfg, _) = Config::load_in(dir)?;
    cfg.save()?;
    Ok(missing)
}
