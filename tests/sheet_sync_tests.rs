use predicates::str::contains;
use std::env;
use std::fs;
use std::path::PathBuf;

mod common;
use common::TestDesk;

fn shared_sheet(name: &str, ext: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_rguestdesk_sheet.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

#[test]
fn test_second_desk_joins_the_event() {
    let sheet = shared_sheet("join_event", "sqlite");
    let front = TestDesk::new("join_event_front");
    let side = TestDesk::new("join_event_side");
    front.init_shared("sqlite", &sheet);
    side.init_shared("sqlite", &sheet);

    front
        .cmd()
        .args(["start", "Wedding", "--capacity", "42"])
        .assert()
        .success()
        .stdout(contains("Announced on the sheet"));
    front.add(&["Ana"]);
    front.add(&["Leo", "--child", "5"]);

    side.cmd()
        .arg("events")
        .assert()
        .success()
        .stdout(contains("Wedding"));

    side.cmd()
        .args(["join", "Wedding"])
        .assert()
        .success()
        .stdout(contains("2 guests loaded, capacity 42"));

    // guests added on the second desk reach the first one through `sync`
    side.add(&["Bia"]);
    front
        .cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("Guest list reloaded: 3 guests."));

    front
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Paying    : 2"))
        .stdout(contains("Exempt    : 1"));
}

#[test]
fn test_csv_sheet_gets_sentinel_and_rows() {
    let sheet = shared_sheet("csv_sheet", "csv");
    let desk = TestDesk::new("csv_sheet");
    desk.init_shared("csv", &sheet);

    desk.start("Test Party", "10");
    desk.add(&["Ana"]);
    desk.add(&["Staff1", "--courtesy"]);

    let content = fs::read_to_string(&sheet).expect("sheet written");
    assert!(content.starts_with("id,Nome,Tipo,Idade,Status,Hora,Data,Evento"));
    assert!(content.contains("SYSTEM_START"));
    assert!(content.contains("Ana"));
    assert!(content.contains("Staff1"));

    desk.cmd().arg("undo").assert().success();
    let content = fs::read_to_string(&sheet).expect("sheet written");
    assert!(content.contains("Ana"));
    assert!(!content.contains("Staff1"));
}

#[test]
fn test_unreachable_sheet_does_not_block_check_in() {
    // a directory where the sheet file should be: every sheet call fails
    let sheet = shared_sheet("broken_sheet", "csv");
    fs::create_dir_all(&sheet).expect("create blocking dir");

    let desk = TestDesk::new("broken_sheet");
    desk.init_shared("csv", &sheet);

    desk.cmd()
        .args(["start", "Party", "--capacity", "10"])
        .assert()
        .success()
        .stdout(contains("continuing locally"));

    desk.cmd()
        .args(["add", "Ana"])
        .assert()
        .success()
        .stdout(contains("Registered"))
        .stdout(contains("continuing locally"));

    desk.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Total     : 1"));

    desk.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("sync_failed"));

    fs::remove_dir_all(&sheet).ok();
}

#[test]
fn test_offline_mode_stays_quiet() {
    let desk = TestDesk::new("offline_mode");
    desk.init_offline();

    desk.cmd()
        .args(["start", "Party"])
        .assert()
        .success()
        .stdout(contains("Offline mode"));

    desk.cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("nothing to sync"));

    desk.cmd()
        .arg("events")
        .assert()
        .success()
        .stdout(contains("No events on the sheet today."));
}
