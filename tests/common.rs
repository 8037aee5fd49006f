#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use presencial::config::{Backend, Config};
use presencial::models::PresenceRecord;
use presencial::models::record::{parse_date, parse_time};
use presencial::store::{self, RecordStore};
use std::path::Path;
use tempfile::TempDir;

pub const BACKENDS: [Backend; 2] = [Backend::Sqlite, Backend::Csv];

pub fn prs() -> Command {
    cargo_bin_cmd!("presencial")
}

/// Command bound to an isolated data directory.
pub fn prs_in(dir: &Path) -> Command {
    let mut cmd = prs();
    cmd.arg("--data-dir").arg(dir);
    cmd
}

/// Fresh data directory with a configuration for `backend`.
pub fn workspace(backend: Backend) -> (TempDir, Config) {
    let dir = TempDir::new().expect("tempdir");
    let (cfg, existed) = Config::load_or_create_in(dir.path(), backend).expect("config");
    assert!(!existed);
    (dir, cfg)
}

pub fn open(cfg: &Config) -> Box<dyn RecordStore> {
    store::open(cfg).expect("open store")
}

pub fn rec(date: &str, time: &str, response: &str, area: &str) -> PresenceRecord {
    PresenceRecord {
        date: parse_date(date).expect("date"),
        time: parse_time(time).expect("time"),
        response: response.to_string(),
        observation: String::new(),
        area: area.to_string(),
    }
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("date")
        .and_time(parse_time(time).expect("time"))
}
