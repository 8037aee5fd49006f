use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Settings changes requested in one `config` invocation. Lists replace
/// the stored value as a whole.
#[derive(Debug, Default, Clone)]
pub struct ConfigChanges {
    pub goal: Option<u32>,
    pub areas: Option<Vec<String>>,
    pub headers: Option<Vec<String>>,
    pub extra_label: Option<String>,
    pub markers: Option<(String, String)>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.goal.is_none()
            && self.areas.is_none()
            && self.headers.is_none()
            && self.extra_label.is_none()
            && self.markers.is_none()
    }
}

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let content = fs::read_to_string(cfg.config_file())?;
        println!("{}", content.trim_end());
        Ok(())
    }

    /// Keys missing from the stored file.
    pub fn check(cfg: &Config) -> AppResult<Vec<&'static str>> {
        migrate::missing_fields(config_dir(cfg)?)
    }

    /// Rewrite the stored file with every key present.
    pub fn migrate(cfg: &Config) -> AppResult<Vec<&'static str>> {
        migrate::upgrade(config_dir(cfg)?)
    }

    /// Open the file in `editor`, then `$EDITOR`, then a platform default.
    pub fn edit(cfg: &Config, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| default_editor().into());

        let status = Command::new(&ed)
            .arg(cfg.config_file())
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch editor '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        Ok(())
    }

    /// Validate and apply every change, then persist once. Nothing is saved
    /// if any change is rejected.
    pub fn apply(cfg: &mut Config, changes: ConfigChanges) -> AppResult<()> {
        let mut next = cfg.clone();

        if let Some(goal) = changes.goal {
            next.set_goal(goal)?;
        }
        if let Some(areas) = changes.areas {
            next.replace_areas(areas)?;
        }
        if let Some(headers) = changes.headers {
            next.replace_headers(headers)?;
        }
        if let Some(label) = changes.extra_label {
            next.set_extra_label(&label)?;
        }
        if let Some((yes, no)) = changes.markers {
            next.set_markers(&yes, &no)?;
        }

        next.save()?;
        info!(revision = next.revision, "configuration updated");
        *cfg = next;
        Ok(())
    }
}

fn config_dir(cfg: &Config) -> AppResult<&Path> {
    cfg.config_file()
        .parent()
        .ok_or_else(|| AppError::Config("configuration path has no parent".into()))
}

fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "nano" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejected_change_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let (mut cfg, _) = Config::load_in(dir.path()).unwrap();
        let before = fs::read_to_string(cfg.config_file()).unwrap();

        let changes = ConfigChanges {
            goal: Some(12),
            headers: Some(vec!["only".into(), "three".into(), "cols".into()]),
            ..Default::default()
        };
        assert!(ConfigLogic::apply(&mut cfg, changes).is_err());
        assert_eq!(cfg.default_goal, 8);
        assert_eq!(fs::read_to_string(cfg.config_file()).unwrap(), before);
    }

    #[test]
    fn accepted_changes_are_persisted() {
        let dir = TempDir::new().unwrap();
        let (mut cfg, _) = Config::load_in(dir.path()).unwrap();

        let changes = ConfigChanges {
            goal: Some(10),
            areas: Some(vec!["CT".into(), " AG ".into(), "CT".into()]),
            ..Default::default()
        };
        ConfigLogic::apply(&mut cfg, changes).unwrap();

        let (reloaded, existed) = Config::load_in(dir.path()).unwrap();
        assert!(existed);
        assert_eq!(reloaded.default_goal, 10);
        assert_eq!(reloaded.area_options, vec!["CT", "AG"]);
        assert_eq!(reloaded.revision, 1);
    }
}
