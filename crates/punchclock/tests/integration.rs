//! Integration tests for punchclock
//!
//! These tests drive the engine against a real log file on disk.

use chrono::{NaiveDate, NaiveDateTime};
use punchclock_api::{EventPayload, RecordingOutcome, LATE_ARRIVAL_MESSAGE};
use punchclock_config::{parse_config, Policy};
use punchclock_core::AttendanceEngine;
use std::fs;
use std::path::Path;

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn make_engine(log: &Path) -> AttendanceEngine {
    AttendanceEngine::with_text_log(Policy::default().with_log_path(log))
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_rejection_never_creates_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let engine = make_engine(&log);

    for _ in 0..3 {
        for time in [at(3, 6, 0), at(3, 8, 59), at(3, 18, 0), at(3, 22, 15)] {
            let outcome = engine.record(time).unwrap();
            assert!(matches!(outcome, RecordingOutcome::Rejected { .. }));
        }
    }

    assert!(!log.exists());
}

#[test]
fn test_rejection_leaves_existing_log_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let engine = make_engine(&log);

    engine.record(at(3, 9, 0)).unwrap();
    let before = fs::read(&log).unwrap();

    engine.record(at(3, 19, 0)).unwrap();
    engine.record(at(3, 7, 0)).unwrap();

    assert_eq!(fs::read(&log).unwrap(), before);
}

#[test]
fn test_first_record_writes_header_and_entry() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let engine = make_engine(&log);

    let outcome = engine.record(at(3, 9, 15)).unwrap();

    assert_eq!(outcome, RecordingOutcome::RecordedOnTime);
    assert_eq!(read_lines(&log), vec!["Date,Time", "2025-03-03,09:15"]);
}

#[test]
fn test_lateness_threshold() {
    let dir = tempfile::tempdir().unwrap();

    let late_log = dir.path().join("late.txt");
    let engine = make_engine(&late_log);
    engine.record(at(3, 9, 0)).unwrap();
    let outcome = engine.record(at(3, 10, 30)).unwrap();
    assert!(outcome.is_late());
    assert_eq!(outcome.message(), LATE_ARRIVAL_MESSAGE);

    let on_time_log = dir.path().join("on_time.txt");
    let engine = make_engine(&on_time_log);
    engine.record(at(3, 9, 0)).unwrap();
    let outcome = engine.record(at(3, 9, 30)).unwrap();
    assert_eq!(outcome, RecordingOutcome::RecordedOnTime);
}

#[test]
fn test_append_only() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let engine = make_engine(&log);

    let times = [
        at(3, 9, 0),
        at(3, 9, 20),
        at(3, 17, 59),
        at(4, 9, 5),
        at(4, 20, 0), // rejected
        at(5, 12, 0),
    ];

    let mut accepted = 0;
    let mut previous: Vec<String> = Vec::new();
    for time in times {
        if engine.record(time).unwrap().is_recorded() {
            accepted += 1;
        }

        let lines = read_lines(&log);
        assert_eq!(lines.len(), 1 + accepted);
        assert_eq!(&lines[..previous.len()], &previous[..]);
        previous = lines;
    }

    assert_eq!(accepted, 5);
}

#[test]
fn test_malformed_line_fails_next_record() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    fs::write(&log, "Date,Time\n2025-03-03,09:00\n2025-03-03,half past nine\n").unwrap();
    let before = fs::read(&log).unwrap();

    let engine = make_engine(&log);
    let err = engine.record(at(3, 10, 30)).unwrap_err();

    assert!(err.is_parse_error());
    assert_eq!(fs::read(&log).unwrap(), before);
}

#[test]
fn test_invalid_utf8_fails_next_record() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    fs::write(&log, b"Date,Time\n2025-03-03,09:00\n\xff\xfe\n").unwrap();
    let before = fs::read(&log).unwrap();

    let engine = make_engine(&log);
    let err = engine.record(at(3, 10, 30)).unwrap_err();

    assert!(err.is_parse_error());
    assert_eq!(fs::read(&log).unwrap(), before);
}

#[test]
fn test_unterminated_last_line_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    fs::write(&log, "Date,Time\n2025-03-03,09:00").unwrap();

    let engine = make_engine(&log);
    assert_eq!(engine.record(at(3, 9, 30)).unwrap(), RecordingOutcome::RecordedOnTime);
    assert_eq!(engine.record(at(3, 9, 45)).unwrap(), RecordingOutcome::RecordedOnTime);

    assert_eq!(
        read_lines(&log),
        vec!["Date,Time", "2025-03-03,09:00", "2025-03-03,09:30", "2025-03-03,09:45"]
    );
    assert_eq!(engine.history().unwrap().len(), 3);
}

#[test]
fn test_data_directory_created_only_on_accept() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let log = data.join("attendance_log.txt");
    let engine = make_engine(&log);

    assert!(!engine.record(at(3, 20, 0)).unwrap().is_recorded());
    assert!(!data.exists());

    assert!(engine.record(at(3, 9, 0)).unwrap().is_recorded());
    assert_eq!(read_lines(&log), vec!["Date,Time", "2025-03-03,09:00"]);
}

#[test]
fn test_unusable_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "").unwrap();
    let engine = make_engine(&blocker.join("attendance_log.txt"));

    let err = engine.record(at(3, 10, 0)).unwrap_err();
    assert!(!err.is_parse_error());
}

#[test]
fn test_late_notification_reaches_subscribers() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let engine = make_engine(&log);
    let mut audit = engine.subscribe();
    let mut ui = engine.subscribe();

    engine.record(at(3, 9, 0)).unwrap();
    engine.record(at(3, 11, 0)).unwrap();

    for rx in [&mut audit, &mut ui] {
        let _first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        match second.payload {
            EventPayload::LateArrival { details, .. } => {
                assert_eq!(details.message, LATE_ARRIVAL_MESSAGE);
                assert_eq!(details.gap_minutes, 120);
            }
            other => panic!("Expected LateArrival, got {:?}", other),
        }
    }
}

#[test]
fn test_configured_working_hours() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("attendance_log.txt");
    let policy = parse_config(
        r#"
        config_version = 1

        [attendance]
        working_hours_start = 7
        working_hours_end = 15
        "#,
    )
    .unwrap()
    .with_log_path(&log);
    let engine = AttendanceEngine::with_text_log(policy);

    assert!(engine.record(at(3, 7, 30)).unwrap().is_recorded());
    assert!(!engine.record(at(3, 15, 0)).unwrap().is_recorded());
    assert_eq!(engine.history().unwrap().len(), 1);
}
