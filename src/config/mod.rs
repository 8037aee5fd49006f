use crate::errors::{AppError, AppResult};
use crate::models::Markers;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod migrate;

/// Default installation identity (name of the per-user data folder).
pub const APP_IDENTITY: &str = "Presencial";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const MIN_GOAL: u32 = 1;
pub const MAX_GOAL: u32 = 24;
/// The tabular ledger always has date, time, response, observation, area.
pub const HEADER_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Csv,
}

impl Backend {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Backend::Sqlite => "registros.sqlite",
            Backend::Csv => "registros.csv",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Csv => "csv",
        }
    }
}

/// What happens to an in-person submission once the monthly goal is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPolicy {
    /// Show a notice and record anyway.
    #[default]
    Notice,
    /// Require explicit confirmation.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub folder_name: String,
    pub storage_location: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_goal")]
    pub default_goal: u32,
    #[serde(default = "default_extra_label")]
    pub extra_label: String,
    #[serde(default = "default_area_options")]
    pub area_options: Vec<String>,
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
    #[serde(default = "default_yes_marker")]
    pub yes_marker: String,
    #[serde(default = "default_no_marker")]
    pub no_marker: String,
    #[serde(default)]
    pub goal_policy: GoalPolicy,
    #[serde(default)]
    pub revision: u32,

    #[serde(skip)]
    config_path: PathBuf,
}

fn default_goal() -> u32 {
    8
}
fn default_extra_label() -> String {
    "adicional".to_string()
}
fn default_area_options() -> Vec<String> {
    ["CT", "CEIC", "AG", "OUTRO"].map(String::from).to_vec()
}
fn default_headers() -> Vec<String> {
    ["data", "hora", "resposta", "observacao", "area"]
        .map(String::from)
        .to_vec()
}
fn default_yes_marker() -> String {
    "S".to_string()
}
fn default_no_marker() -> String {
    "N".to_string()
}

impl Config {
    /// Platform data directory (falls back to the home directory).
    pub fn base_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Per-user, per-installation directory for the given identity.
    pub fn data_dir(identity: &str) -> PathBuf {
        Self::base_dir().join(identity)
    }

    /// Fresh configuration rooted at `dir`, not yet persisted.
    pub fn defaults_in(dir: &Path, backend: Backend) -> Self {
        let folder_name = dir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| APP_IDENTITY.to_string());

        Self {
            folder_name,
            storage_location: dir
                .join(backend.default_file_name())
                .to_string_lossy()
                .to_string(),
            backend,
            default_goal: default_goal(),
            extra_label: default_extra_label(),
            area_options: default_area_options(),
            headers: default_headers(),
            yes_marker: default_yes_marker(),
            no_marker: default_no_marker(),
            goal_policy: GoalPolicy::default(),
            revision: 0,
            config_path: dir.join(CONFIG_FILE_NAME),
        }
    }

    /// Load the configuration of `identity`, creating and persisting the
    /// defaults on first use. The flag tells whether it already existed.
    pub fn load(identity: &str) -> AppResult<(Self, bool)> {
        Self::load_in(&Self::data_dir(identity))
    }

    pub fn load_in(dir: &Path) -> AppResult<(Self, bool)> {
        Self::load_or_create_in(dir, Backend::default())
    }

    /// Like [`Config::load_in`], but a configuration created here uses
    /// `backend`. An existing configuration keeps its own backend.
    pub fn load_or_create_in(dir: &Path, backend: Backend) -> AppResult<(Self, bool)> {
        fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut cfg: Config = serde_yaml::from_str(&content)
                .map_err(|e| AppError::Decode(format!("{}: {e}", path.display())))?;
            cfg.config_path = path;
            cfg.validate()?;
            debug!(path = %cfg.config_path.display(), "configuration loaded");
            return Ok((cfg, true));
        }

        let mut cfg = Self::defaults_in(dir, backend);
        if migrate::apply_legacy(dir, &mut cfg)? {
            info!(dir = %dir.display(), "legacy configuration carried over");
        }
        cfg.validate()?;
        cfg.save()?;
        info!(path = %cfg.config_path.display(), "default configuration created");
        Ok((cfg, false))
    }

    /// Persist the configuration. The YAML goes to a temporary sibling that
    /// is renamed over the target, so readers never see a partial file.
    pub fn save(&self) -> AppResult<()> {
        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| AppError::Config("configuration path has no parent".into()))?;
        fs::create_dir_all(dir)?;

        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Serialize(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(yaml.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.config_path).map_err(|e| e.error)?;

        debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }

    pub fn config_file(&self) -> &Path {
        &self.config_path
    }

    /// Ledger location with `~/` expanded.
    pub fn ledger_path(&self) -> PathBuf {
        expand_tilde(&self.storage_location)
    }

    pub fn markers(&self) -> Markers {
        Markers::new(self.yes_marker.clone(), self.no_marker.clone())
    }

    pub fn has_area(&self, area: &str) -> bool {
        self.area_options.iter().any(|a| a == area)
    }

    pub fn validate(&self) -> AppResult<()> {
        check_goal(self.default_goal)?;
        check_headers(&self.headers)?;
        check_markers(&self.yes_marker, &self.no_marker)?;
        if self.storage_location.trim().is_empty() {
            return Err(AppError::Config("storage_location is empty".into()));
        }
        Ok(())
    }

    // ---------------------------
    // Whole-value replacements
    // ---------------------------

    pub fn set_goal(&mut self, goal: u32) -> AppResult<()> {
        check_goal(goal)?;
        self.default_goal = goal;
        Ok(())
    }

    pub fn replace_areas(&mut self, areas: Vec<String>) -> AppResult<()> {
        let mut cleaned: Vec<String> = Vec::with_capacity(areas.len());
        for a in areas {
            let a = a.trim().to_string();
            if !a.is_empty() && !cleaned.contains(&a) {
                cleaned.push(a);
            }
        }
        if cleaned.is_empty() {
            return Err(AppError::Config("area list cannot be empty".into()));
        }
        self.area_options = cleaned;
        self.revision += 1;
        Ok(())
    }

    pub fn replace_headers(&mut self, headers: Vec<String>) -> AppResult<()> {
        let cleaned: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        check_headers(&cleaned)?;
        self.headers = cleaned;
        self.revision += 1;
        Ok(())
    }

    pub fn set_extra_label(&mut self, label: &str) -> AppResult<()> {
        self.extra_label = label.trim().to_string();
        Ok(())
    }

    pub fn set_markers(&mut self, yes: &str, no: &str) -> AppResult<()> {
        let (yes, no) = (yes.trim(), no.trim());
        check_markers(yes, no)?;
        self.yes_marker = yes.to_string();
        self.no_marker = no.to_string();
        Ok(())
    }
}

fn check_goal(goal: u32) -> AppResult<()> {
    if !(MIN_GOAL..=MAX_GOAL).contains(&goal) {
        return Err(AppError::Config(format!(
            "goal must be between {MIN_GOAL} and {MAX_GOAL}, got {goal}"
        )));
    }
    Ok(())
}

fn check_headers(headers: &[String]) -> AppResult<()> {
    if headers.len() != HEADER_COUNT || headers.iter().any(|h| h.trim().is_empty()) {
        return Err(AppError::Config(format!(
            "exactly {HEADER_COUNT} non-empty column headers are required"
        )));
    }
    Ok(())
}

fn check_markers(yes: &str, no: &str) -> AppResult<()> {
    if yes.is_empty() || no.is_empty() {
        return Err(AppError::Config("response markers cannot be empty".into()));
    }
    if yes == no {
        return Err(AppError::Config(format!(
            "in-person and remote markers must differ (both '{yes}')"
        )));
    }
    Ok(())
}
