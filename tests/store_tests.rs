mod common;

use common::{BACKENDS, open, rec, workspace};
use presencial::config::Backend;
use presencial::core::report;
use presencial::errors::AppError;
use presencial::store::{self, RecordStore};

#[test]
fn new_store_lists_nothing() {
    for backend in BACKENDS {
        let (_dir, cfg) = workspace(backend);
        let store = open(&cfg);
        assert!(store.list_all().unwrap().is_empty(), "{backend:?}");
        assert!(store.location().exists(), "{backend:?}");
    }
}

#[test]
fn list_is_newest_first_with_insertion_tiebreak() {
    for backend in BACKENDS {
        let (_dir, cfg) = workspace(backend);
        let mut store = open(&cfg);

        store.append(&rec("2025-10-02", "09:00:00", "S", "CT")).unwrap();
        store.append(&rec("2025-10-05", "08:00:00", "N", "")).unwrap();
        store.append(&rec("2025-10-05", "10:00:00", "S", "AG")).unwrap();

        let mut first = rec("2025-10-01", "09:00:00", "S", "CT");
        first.observation = "first".into();
        let mut second = first.clone();
        second.observation = "second".into();
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let all = store.list_all().unwrap();
        let keys: Vec<String> = all
            .iter()
            .map(|r| format!("{} {}", r.date_str(), r.time_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                "2025-10-05 10:00:00",
                "2025-10-05 08:00:00",
                "2025-10-02 09:00:00",
                "2025-10-01 09:00:00",
                "2025-10-01 09:00:00",
            ],
            "{backend:?}"
        );
        assert_eq!(all[3].observation, "second", "{backend:?}");
        assert_eq!(all[4].observation, "first", "{backend:?}");
    }
}

#[test]
fn appended_record_reads_back_unchanged() {
    for backend in BACKENDS {
        let (_dir, cfg) = workspace(backend);
        let mut store = open(&cfg);

        let mut r = rec("2025-10-07", "14:05:09", "S", "CEIC");
        r.observation = "reunião, com vírgula".into();
        store.append(&r).unwrap();

        assert_eq!(store.list_all().unwrap(), vec![r.clone()], "{backend:?}");
        assert!(store.exists(r.date, r.time).unwrap());
        assert!(!store.exists(r.date, presencial::models::record::parse_time("14:05").unwrap()).unwrap());
    }
}

#[test]
fn import_skips_known_keys_and_repeats_within_batch() {
    for backend in BACKENDS {
        let (_dir, cfg) = workspace(backend);
        let mut store = open(&cfg);

        store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
        store.append(&rec("2025-10-02", "09:00:00", "N", "")).unwrap();

        let batch = vec![
            rec("2025-10-01", "09:00:00", "S", "CT"),
            rec("2025-10-02", "09:00:00", "N", ""),
            rec("2025-10-03", "09:00:00", "S", "AG"),
            rec("2025-10-03", "09:00:00", "S", "AG"),
        ];
        assert_eq!(store.import_batch(&batch).unwrap(), 1, "{backend:?}");
        assert_eq!(store.list_all().unwrap().len(), 3);

        // same batch again is a no-op
        assert_eq!(store.import_batch(&batch).unwrap(), 0, "{backend:?}");
        assert_eq!(store.list_all().unwrap().len(), 3);
    }
}

#[test]
fn sqlite_import_failure_rolls_back_everything() {
    let (_dir, cfg) = workspace(Backend::Sqlite);
    let mut store = open(&cfg);
    store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
    let before = store.list_all().unwrap();
    let log_before = store.audit_log().unwrap().unwrap().len();

    let conn = rusqlite::Connection::open(store.location()).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER refuse_boom BEFORE INSERT ON presence_records
         WHEN NEW.area = 'BOOM'
         BEGIN SELECT RAISE(ABORT, 'boom'); END;",
    )
    .unwrap();

    let batch = vec![
        rec("2025-10-02", "09:00:00", "S", "CT"),
        rec("2025-10-03", "09:00:00", "S", "BOOM"),
    ];
    let err = store.import_batch(&batch).unwrap_err();
    assert!(err.is_storage(), "{err:?}");

    assert_eq!(store.list_all().unwrap(), before);
    assert_eq!(store.audit_log().unwrap().unwrap().len(), log_before);
}

#[test]
fn sqlite_writes_audit_rows() {
    let (_dir, cfg) = workspace(Backend::Sqlite);
    let mut store = open(&cfg);
    store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
    store
        .import_batch(&[rec("2025-10-02", "09:00:00", "N", "")])
        .unwrap();

    let ops: Vec<String> = store
        .audit_log()
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert!(ops.contains(&"add".to_string()));
    assert!(ops.contains(&"import".to_string()));
}

#[test]
fn csv_ledger_uses_configured_headers() {
    let (_dir, cfg) = workspace(Backend::Csv);
    let mut store = open(&cfg);
    store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();

    let content = std::fs::read_to_string(store.location()).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("data,hora,resposta,observacao,area"));
    assert_eq!(lines.next(), Some("2025-10-01,09:00:00,S,,CT"));
    assert!(store.audit_log().unwrap().is_none());
}

#[test]
fn corrupt_csv_row_is_a_decode_error() {
    let (_dir, cfg) = workspace(Backend::Csv);
    std::fs::write(
        cfg.ledger_path(),
        "data,hora,resposta,observacao,area\nontem,09:00:00,S,,CT\n",
    )
    .unwrap();

    let store = store::open(&cfg).unwrap();
    match store.list_all() {
        Err(AppError::Decode(msg)) => assert!(msg.contains("line 2"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }

    let today = presencial::utils::date::today();
    assert_eq!(
        report::report_or_fallback(store.as_ref(), &cfg, today),
        report::REPORT_UNAVAILABLE
    );
}

#[test]
fn csv_header_row_follows_configuration() {
    let (_dir, mut cfg) = workspace(Backend::Csv);
    let mut store = open(&cfg);
    let mut first = rec("2025-10-01", "09:00:00", "S", "CT");
    first.observation = "sala 2, bloco b".into();
    store.append(&first).unwrap();
    drop(store);

    cfg.replace_headers(["dia", "hora", "resp", "obs", "setor"].map(String::from).to_vec())
        .unwrap();
    cfg.save().unwrap();

    let mut store = open(&cfg);
    store.append(&rec("2025-10-02", "09:00:00", "N", "")).unwrap();

    let content = std::fs::read_to_string(store.location()).unwrap();
    assert_eq!(content.lines().next(), Some("dia,hora,resp,obs,setor"));
    assert_eq!(content.lines().count(), 3);

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1], first);
}

#[test]
fn csv_append_waits_for_the_writer_lock() {
    use fs4::fs_std::FileExt;
    use std::time::Duration;

    let (_dir, cfg) = workspace(Backend::Csv);
    let mut store = store::CsvStore::open(&cfg.ledger_path(), &cfg.headers).unwrap();

    let mut lock_path = store.location().as_os_str().to_owned();
    lock_path.push(".lock");
    let holder = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&lock_path)
        .unwrap();
    FileExt::lock_exclusive(&holder).unwrap();

    let writer = std::thread::spawn(move || {
        store.append(&rec("2025-10-01", "09:00:00", "S", "CT")).unwrap();
        store
    });

    std::thread::sleep(Duration::from_millis(300));
    assert!(!writer.is_finished(), "append ran while another handle held the lock");
    let untouched = std::fs::read_to_string(cfg.ledger_path()).unwrap();
    assert_eq!(untouched.lines().count(), 1);

    drop(holder);
    let store = writer.join().unwrap();
    assert_eq!(store.list_all().unwrap().len(), 1);
}
