#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use hwcontrol::db::JsonFileStore;
use hwcontrol::models::{Movement, Note, Record};
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The binary, with HOME pointed at a scratch directory so the user's
/// real configuration is never read.
pub fn hw() -> Command {
    let home = env::temp_dir().join("hwcontrol_test_home");
    fs::create_dir_all(&home).ok();
    let mut cmd = cargo_bin_cmd!("hwcontrol");
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Unique record file path inside the system temp dir; any previous file is removed.
pub fn setup_data(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hwcontrol.json", name));
    let data_path = path.to_string_lossy().to_string();
    fs::remove_file(&data_path).ok();
    data_path
}

/// Temporary output file path; any previous file is removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init the record file and add an entry, an overdue loan and an exit.
pub fn init_with_data(data_path: &str) {
    hw().args(["--data", data_path, "--test", "init"])
        .assert()
        .success();

    hw().args([
        "--data", data_path, "add", "entry", "--responsible", "Fulano", "--asset", "1234567",
        "--workflow", "P-1", "--date", "01/09/2025 09:00", "--reason", "repair", "--hardware",
        "notebook", "--brand", "Dell",
    ])
    .assert()
    .success();

    hw().args([
        "--data", data_path, "add", "loan", "--responsible", "Ciclano", "--asset", "7654321",
        "--date", "15/09/2025 10:00", "--reason", "maintenance", "--hardware", "monitor",
        "--borrower", "Maria", "--due", "20/09/2025 18:00",
    ])
    .assert()
    .success();

    hw().args([
        "--data", data_path, "add", "exit", "--responsible", "Beltrano", "--asset", "1111111",
        "--date", "02/10/2025 08:30", "--reason", "formatting", "--hardware", "desktop",
    ])
    .assert()
    .success();
}

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M").expect("test timestamp")
}

pub fn entry(id: u64, started_at: &str) -> Record {
    let mut r = Record::new(id, Movement::Entry { in_stock: false });
    r.started_at = started_at.to_string();
    r.reason = "maintenance".to_string();
    r
}

pub fn exit(id: u64, workflow: &str) -> Record {
    let mut r = Record::new(id, Movement::Exit);
    r.workflow = workflow.to_string();
    r
}

pub fn loan(id: u64, due_at: &str) -> Record {
    Record::new(
        id,
        Movement::Loan {
            borrower: "Maria".to_string(),
            due_at: due_at.to_string(),
        },
    )
}

pub fn note(text: &str, at: &str) -> Note {
    Note::new(text, at)
}

/// A JSON store in a fresh temp dir, pre-filled with `records`.
pub fn store_with(records: Vec<Record>) -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("records.json");
    fs::write(&path, serde_json::to_string(&records).expect("serialize")).expect("write seed");
    let store = JsonFileStore::open(&path).expect("open store");
    (dir, store)
}
