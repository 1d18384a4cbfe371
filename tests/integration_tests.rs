use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{hw, init_with_data, setup_data, temp_out};

#[test]
fn test_init_creates_empty_record_file() {
    let data = setup_data("init_creates_file");

    hw().args(["--data", &data, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Record file ready (0 records)"));

    assert_eq!(fs::read_to_string(&data).unwrap().trim(), "[]");
}

#[test]
fn test_list_shows_status_labels() {
    let data = setup_data("list_status_labels");
    init_with_data(&data);

    hw().args(["--data", &data, "list"])
        .assert()
        .success()
        .stdout(contains("Records (3)"))
        .stdout(contains("Overdue (20/09/2025 18:00)"))
        .stdout(contains("7654321"));
}

#[test]
fn test_list_overdue_only() {
    let data = setup_data("list_overdue_only");
    init_with_data(&data);

    hw().args(["--data", &data, "list", "--overdue"])
        .assert()
        .success()
        .stdout(contains("Records (1)"))
        .stdout(contains("7654321").and(contains("1111111").not()));
}

#[test]
fn test_list_pending_entry() {
    let data = setup_data("list_pending_entry");
    init_with_data(&data);

    hw().args(["--data", &data, "list", "--pending"])
        .assert()
        .success()
        .stdout(contains("Pending"))
        .stdout(contains("1234567"));
}

#[test]
fn test_add_rejects_short_asset_tag() {
    let data = setup_data("add_short_asset");
    hw().args(["--data", &data, "--test", "init"]).assert().success();

    hw().args([
        "--data", &data, "add", "entry", "--responsible", "Fulano", "--asset", "123",
        "--reason", "repair", "--hardware", "desktop",
    ])
    .assert()
    .failure()
    .stderr(contains("Error: Asset tag must contain only digits"));
}

#[test]
fn test_add_loan_requires_due_date() {
    let data = setup_data("add_loan_no_due");
    hw().args(["--data", &data, "--test", "init"]).assert().success();

    hw().args([
        "--data", &data, "add", "loan", "--responsible", "Fulano", "--asset", "1234567",
        "--reason", "repair", "--hardware", "desktop", "--borrower", "Maria",
    ])
    .assert()
    .failure()
    .stderr(contains("due_at"));
}

#[test]
fn test_exit_closes_matching_entry() {
    let data = setup_data("exit_closes_entry");
    init_with_data(&data);

    hw().args([
        "--data", &data, "add", "exit", "--responsible", "Fulano", "--asset", "1234567",
        "--workflow", "P-1", "--reason", "repair", "--hardware", "notebook",
    ])
    .assert()
    .success()
    .stdout(contains("Exit registered with ID 4"));

    hw().args(["--data", &data, "show", "1"])
        .assert()
        .success()
        .stdout(contains("Returned (ID: 4)"));
}

#[test]
fn test_return_then_return_again_fails() {
    let data = setup_data("return_twice");
    init_with_data(&data);

    hw().args(["--data", &data, "return", "2"])
        .assert()
        .success()
        .stdout(contains("Record 2 marked as returned."));

    hw().args(["--data", &data, "return", "2"])
        .assert()
        .failure()
        .stderr(contains("already returned"));
}

#[test]
fn test_hide_removes_from_default_list() {
    let data = setup_data("hide_from_list");
    init_with_data(&data);

    hw().args(["--data", &data, "hide", "3"]).assert().success();

    hw().args(["--data", &data, "list"])
        .assert()
        .success()
        .stdout(contains("Records (2)").and(contains("1111111").not()));

    hw().args(["--data", &data, "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Records (3)").and(contains("Deleted")));
}

#[test]
fn test_extend_note_and_stock() {
    let data = setup_data("extend_note_stock");
    init_with_data(&data);

    hw().args(["--data", &data, "extend", "2", "31/12/2999 18:00"])
        .assert()
        .success()
        .stdout(contains("Loan 2 now due 31/12/2999 18:00."));

    hw().args(["--data", &data, "note", "1", "waiting for parts"])
        .assert()
        .success()
        .stdout(contains("1 notes"));

    hw().args(["--data", &data, "stock", "1"])
        .assert()
        .success()
        .stdout(contains("now in stock"));

    hw().args(["--data", &data, "show", "1"])
        .assert()
        .success()
        .stdout(contains("In stock").and(contains("waiting for parts")));

    hw().args(["--data", &data, "stock", "2"])
        .assert()
        .failure()
        .stderr(contains("only entries can be stocked"));
}

#[test]
fn test_show_unknown_id() {
    let data = setup_data("show_unknown");
    init_with_data(&data);

    hw().args(["--data", &data, "show", "99"])
        .assert()
        .failure()
        .stderr(contains("Record 99 not found"));
}

#[test]
fn test_backup_copies_record_file() {
    let data = setup_data("backup_copy");
    init_with_data(&data);
    let out = temp_out("backup_copy", "json");

    hw().args(["--data", &data, "backup", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert_eq!(fs::read_to_string(&out).unwrap(), fs::read_to_string(&data).unwrap());
}

#[test]
fn test_config_print() {
    let data = setup_data("config_print");

    hw().args(["--data", &data, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("responsibles").and(contains("max_note_len: 200")));
}

#[cfg(not(windows))]
#[test]
fn test_backup_compress_writes_tar_gz() {
    let data = setup_data("backup_compress");
    init_with_data(&data);
    let out = temp_out("backup_compress", "json");
    fs::remove_file(format!("{out}.tar.gz")).ok();

    hw().args(["--data", &data, "backup", "--file", &out, "--compress", "--force"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(fs::metadata(format!("{out}.tar.gz")).is_ok());
    assert!(fs::metadata(&out).is_err());
}
