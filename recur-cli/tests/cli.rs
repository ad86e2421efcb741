use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn recur() -> Command {
    Command::cargo_bin("recur").unwrap()
}

// ============================================================
// Listing
// ============================================================

#[test]
fn test_daily_list() {
    recur()
        .args(["--rule", "daily/2", "--start", "2024-01-01", "--end", "2024-01-07"])
        .assert()
        .success()
        .stdout("2024-01-01\n2024-01-03\n2024-01-05\n2024-01-07\n");
}

#[test]
fn test_weekly_list() {
    recur()
        .args(["-r", "weekly:mon,wed", "--start", "2024-01-01", "--end", "2024-01-14"])
        .assert()
        .success()
        .stdout("2024-01-01\n2024-01-03\n2024-01-08\n2024-01-10\n");
}

#[test]
fn test_exclude_and_count() {
    recur()
        .args([
            "--rule",
            "daily",
            "--start",
            "2024-01-01",
            "--exclude",
            "2024-01-02",
            "--count",
            "3",
        ])
        .assert()
        .success()
        .stdout("2024-01-01\n2024-01-03\n2024-01-04\n");
}

#[test]
fn test_format_and_locale() {
    recur()
        .args([
            "--rule",
            "monthly:last-fri",
            "--start",
            "2024-01-01",
            "--end",
            "2024-02-29",
            "--format",
            "d MMM yyyy",
            "--locale",
            "fr",
        ])
        .assert()
        .success()
        .stdout("26 janv. 2024\n23 févr. 2024\n");
}

#[test]
fn test_show_rules() {
    recur()
        .args([
            "--rule",
            "daily/2",
            "--rule",
            "weekly:wed",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-03",
            "--show-rules",
        ])
        .assert()
        .success()
        .stdout("2024-01-01\t0\n2024-01-03\t0,1\n");
}

// ============================================================
// Output modes
// ============================================================

#[test]
fn test_json_output() {
    recur()
        .args([
            "--rule",
            "yearly",
            "--start",
            "2020-01-01",
            "--end",
            "2021-01-01",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"[{"date":"2020-01-01","rules":[0]},{"date":"2021-01-01","rules":[0]}]"#,
        ));
}

#[test]
fn test_ics_all_day() {
    recur()
        .args(["--rule", "daily", "--start", "2024-01-31", "--count", "1", "--ics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BEGIN:VCALENDAR\r\n"))
        .stdout(predicate::str::contains("DTSTART;VALUE=DATE:20240131\r\n"))
        .stdout(predicate::str::contains("DTEND;VALUE=DATE:20240201\r\n"));
}

#[test]
fn test_ics_timed() {
    recur()
        .args([
            "--rule",
            "daily",
            "--start",
            "2024-01-31",
            "--count",
            "1",
            "--ics",
            "--start-time",
            "09:30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DTSTART:20240131T093000Z"))
        .stdout(predicate::str::contains("DTEND:20240131T093000Z"));
}

#[test]
fn test_calendar_grid() {
    recur()
        .args(["--rule", "weekly:mon", "--start", "2024-01-01", "--calendar"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("January 2024\nSu  Mo  Tu  We  Th  Fr  Sa\n"))
        .stdout(predicate::str::contains(" 8*"));
}

#[test]
fn test_check() {
    recur()
        .args(["--rule", "monthly/2:first-mon", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

// ============================================================
// Sessions
// ============================================================

fn session_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_session_file_with_overrides() {
    let file = session_file(
        r#"{"rules": [{"frequency": "weekly", "weekdays": [2]}], "start_date": "2024-01-01", "end_date": "2024-01-31"}"#,
    );

    recur()
        .arg("--session")
        .arg(file.path())
        .args(["--count", "2", "--format", "MM/dd/yyyy"])
        .assert()
        .success()
        .stdout("01/02/2024\n01/09/2024\n");
}

#[test]
fn test_separate_session_files() {
    let monthly = session_file(
        r#"{"rules": [{"frequency": "monthly", "pattern": "first-mon"}], "start_date": "2024-01-01", "end_after_occurrences": 2}"#,
    );
    let yearly = session_file(
        r#"{"rules": [{"frequency": "yearly"}], "start_date": "2024-02-29", "end_after_occurrences": 2}"#,
    );
    assert_ne!(monthly.path(), yearly.path());

    recur()
        .arg("--session")
        .arg(monthly.path())
        .assert()
        .success()
        .stdout("2024-01-01\n2024-02-05\n");
    recur()
        .arg("--session")
        .arg(yearly.path())
        .assert()
        .success()
        .stdout("2024-02-29\n2025-02-28\n");
}

#[test]
fn test_invalid_session_json() {
    let file = session_file(r#"{"rules": [{"frequency": "weekly", "interval": 0}]}"#);

    recur()
        .arg("--session")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid session"));
}

#[test]
fn test_missing_session_file() {
    recur()
        .args(["--session", "/nonexistent/session.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read session"));
}

// ============================================================
// Advisories and errors
// ============================================================

#[test]
fn test_no_rules() {
    recur()
        .args(["--start", "2024-01-01"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("At least one recurrence rule is required."));
}

#[test]
fn test_missing_start_warns() {
    recur()
        .args(["--rule", "daily"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("warning: Start date is required."));
}

#[test]
fn test_no_matches_warns() {
    recur()
        .args([
            "--rule",
            "monthly:first-mon",
            "--start",
            "2024-01-02",
            "--end",
            "2024-01-31",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "warning: No dates match the current recurrence settings.",
        ));
}

#[test]
fn test_invalid_rule() {
    recur()
        .args(["--rule", "wekly:mon", "--start", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown frequency"));
}

#[test]
fn test_zero_interval_rejected() {
    recur()
        .args(["--rule", "daily/0", "--start", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval must be a positive integer"));
}

#[test]
fn test_invalid_date() {
    recur()
        .args(["--rule", "daily", "--start", "2024-02-30"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid date '2024-02-30'"));
}

#[test]
fn test_ics_conflicts_with_json() {
    recur()
        .args(["--rule", "daily", "--start", "2024-01-01", "--ics", "--json"])
        .assert()
        .failure()
        .code(2);
}
