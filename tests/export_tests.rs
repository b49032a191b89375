use predicates::str::contains;
use std::fs;

mod common;
use common::{TestDesk, temp_out};

fn desk_with_guests(name: &str) -> TestDesk {
    let desk = TestDesk::new(name);
    desk.init_offline();
    desk.start("Test Party", "10");
    desk.add(&["Ana"]);
    desk.add(&["João", "--child", "5"]);
    desk.add(&["Staff1", "--courtesy"]);
    desk
}

#[test]
fn test_pdf_report() {
    let desk = desk_with_guests("pdf_report");
    let out = temp_out("pdf_report", "pdf");

    desk.cmd()
        .args(["report", "--file", &out])
        .assert()
        .success()
        .stdout(contains("PDF export completed"));

    let bytes = fs::read(&out).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_csv_export() {
    let desk = desk_with_guests("csv_export");
    let out = temp_out("csv_export", "csv");

    desk.cmd()
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("csv written");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,time,name,category,age,status,paying,event")
    );
    // newest first
    assert!(lines.next().unwrap_or_default().contains("Staff1"));
    assert!(content.contains("João"));
    assert!(content.contains("5 years"));
}

#[test]
fn test_json_export() {
    let desk = desk_with_guests("json_export");
    let out = temp_out("json_export", "json");

    desk.cmd()
        .args(["export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("json written")).expect("valid json");
    let rows = value.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["name"], "Ana");
    assert_eq!(rows[2]["paying"], true);
    assert_eq!(rows[1]["status"], "Exempt");
}

#[test]
fn test_xlsx_export() {
    let desk = desk_with_guests("xlsx_export");
    let out = temp_out("xlsx_export", "xlsx");

    desk.cmd()
        .args(["export", "--format", "xlsx", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("xlsx written");
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_existing_file_needs_force() {
    let desk = desk_with_guests("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "keep me").expect("seed file");

    desk.cmd()
        .args(["export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("file kept"), "keep me");

    desk.cmd()
        .args(["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("file replaced").contains("Ana"));
}

#[test]
fn test_relative_path_is_rejected() {
    let desk = desk_with_guests("export_relative");

    desk.cmd()
        .args(["report", "--file", "report.pdf"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
