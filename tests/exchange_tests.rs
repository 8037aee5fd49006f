mod common;

use common::{BACKENDS, open, rec, workspace};
use presencial::core::export::ExportLogic;
use presencial::core::import::ImportLogic;
use presencial::errors::AppError;
use presencial::export::{ExportFormat, ImportFormat};
use serde_json::Value;
use std::fs;

#[test]
fn export_then_import_inserts_nothing() {
    for backend in BACKENDS {
        let (dir, cfg) = workspace(backend);
        let mut store = open(&cfg);
        store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
        store.append(&rec("2025-10-02", "09:00:00", "N", "")).unwrap();

        let before = store.list_all().unwrap();
        let out = dir.path().join("backup.json");
        let n = ExportLogic::export(
            store.as_ref(),
            &cfg.headers,
            ExportFormat::Json,
            &out,
            None,
            false,
        )
        .unwrap();
        assert_eq!(n, 2);

        let imported = ImportLogic::import(store.as_mut(), &cfg, &out, ImportFormat::Json).unwrap();
        assert_eq!(imported, 0, "{backend:?}");
        assert_eq!(store.list_all().unwrap(), before);
    }
}

#[test]
fn exported_json_has_named_fields() {
    let (dir, cfg) = workspace(presencial::config::Backend::Sqlite);
    let mut store = open(&cfg);
    let mut r = rec("2025-10-01", "09:05:00", "S", "CT");
    r.observation = "manhã".into();
    store.append(&r).unwrap();

    let out = dir.path().join("out.json");
    ExportLogic::export(
        store.as_ref(),
        &cfg.headers,
        ExportFormat::Json,
        &out,
        None,
        false,
    )
    .unwrap();

    let doc: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc[0]["date"], "2025-10-01");
    assert_eq!(doc[0]["time"], "09:05:00");
    assert_eq!(doc[0]["response"], "S");
    assert_eq!(doc[0]["observation"], "manhã");
    assert_eq!(doc[0]["area"], "CT");
}

#[test]
fn two_duplicates_and_one_new() {
    for backend in BACKENDS {
        let (dir, cfg) = workspace(backend);
        let mut store = open(&cfg);
        store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
        store.append(&rec("2025-10-02", "09:00:00", "S", "AG")).unwrap();

        let doc = dir.path().join("in.json");
        fs::write(
            &doc,
            r#"[
              {"date": "2025-10-01", "time": "09:00:00", "response": "S", "observation": "", "area": "CT"},
              {"date": "2025-10-02", "time": "09:00:00", "response": "S", "observation": "", "area": "AG"},
              {"date": "2025-10-03", "time": "11:30", "response": "N", "observation": "casa", "area": ""}
            ]"#,
        )
        .unwrap();

        let n = ImportLogic::import(store.as_mut(), &cfg, &doc, ImportFormat::Json).unwrap();
        assert_eq!(n, 1, "{backend:?}");

        let newest = &store.list_all().unwrap()[0];
        assert_eq!(newest.time_str(), "11:30:00");
        assert_eq!(newest.observation, "casa");
    }
}

#[test]
fn invalid_record_rejects_whole_document() {
    for backend in BACKENDS {
        let (dir, cfg) = workspace(backend);
        let mut store = open(&cfg);
        store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
        let before = fs::read(store.location()).unwrap();

        let doc = dir.path().join("bad.json");
        fs::write(
            &doc,
            r#"[
              {"date": "2025-10-05", "time": "09:00:00", "response": "S", "area": "CT"},
              {"date": "2025-10-06", "time": "09:00:00", "response": "S", "area": ""}
            ]"#,
        )
        .unwrap();

        match ImportLogic::import(store.as_mut(), &cfg, &doc, ImportFormat::Json) {
            Err(AppError::Validation { position, .. }) => assert_eq!(position, 1, "{backend:?}"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(store.list_all().unwrap().len(), 1);
        assert_eq!(fs::read(store.location()).unwrap(), before, "{backend:?}");
    }
}

#[test]
fn malformed_document_is_a_parse_error() {
    let (dir, cfg) = workspace(presencial::config::Backend::Csv);
    let mut store = open(&cfg);
    let doc = dir.path().join("broken.json");
    fs::write(&doc, "{ not json").unwrap();

    let err = ImportLogic::import(store.as_mut(), &cfg, &doc, ImportFormat::Json).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "{err:?}");
}

#[test]
fn csv_export_feeds_csv_import_across_backends() {
    let (dir, sqlite_cfg) = workspace(presencial::config::Backend::Sqlite);
    let mut source = open(&sqlite_cfg);
    source.append(&rec("2025-09-30", "18:00:00", "N", "")).unwrap();
    source.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();

    let out = dir.path().join("ledger.csv");
    ExportLogic::export(
        source.as_ref(),
        &sqlite_cfg.headers,
        ExportFormat::Csv,
        &out,
        None,
        false,
    )
    .unwrap();

    let (_dir2, csv_cfg) = workspace(presencial::config::Backend::Csv);
    let mut target = open(&csv_cfg);
    let n = ImportLogic::import(target.as_mut(), &csv_cfg, &out, ImportFormat::Csv).unwrap();
    assert_eq!(n, 2);
    assert_eq!(target.list_all().unwrap(), source.list_all().unwrap());
}

#[test]
fn month_filter_narrows_export() {
    let (dir, cfg) = workspace(presencial::config::Backend::Sqlite);
    let mut store = open(&cfg);
    store.append(&rec("2025-09-30", "18:00:00", "N", "")).unwrap();
    store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();

    let out = dir.path().join("oct.json");
    let month = presencial::utils::date::parse_month("2025-10");
    let n = ExportLogic::export(
        store.as_ref(),
        &cfg.headers,
        ExportFormat::Json,
        &out,
        month,
        false,
    )
    .unwrap();
    assert_eq!(n, 1);
}

#[test]
fn xlsx_export_writes_a_workbook() {
    let (dir, cfg) = workspace(presencial::config::Backend::Sqlite);
    let mut store = open(&cfg);
    store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();

    let out = dir.path().join("ledger.xlsx");
    ExportLogic::export(
        store.as_ref(),
        &cfg.headers,
        ExportFormat::Xlsx,
        &out,
        None,
        false,
    )
    .unwrap();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
