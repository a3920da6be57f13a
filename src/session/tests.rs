//! Tests for a recorder driven through the host's extension points.

use std::fs;

use tempfile::TempDir;

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::history::HistoryFile;
use crate::session::{Recorder, SessionHost};

const PID: Option<u32> = Some(4242);

fn config_in(dir: &TempDir, max_size: usize) -> HistoryConfig {
    HistoryConfig {
        history_file: dir.path().join("history"),
        max_size,
        ..Default::default()
    }
}

fn active_recorder(dir: &TempDir, max_size: usize) -> (Recorder, SessionHost) {
    let mut host = SessionHost::new();
    let mut recorder = Recorder::new(&config_in(dir, max_size)).unwrap();
    recorder.activate(&mut host).unwrap();
    (recorder, host)
}

#[test]
fn test_submissions_are_recorded() {
    let dir = TempDir::new().unwrap();
    let (recorder, mut host) = active_recorder(&dir, 10);

    host.submit(PID, "  ls -la\n").unwrap();
    host.submit(PID, "   ").unwrap();
    host.submit(PID, "pwd").unwrap();

    assert_eq!(recorder.search(), vec!["pwd", "ls -la"]);
}

#[test]
fn test_eviction_scenario() {
    let dir = TempDir::new().unwrap();
    let (recorder, mut host) = active_recorder(&dir, 3);

    for cmd in ["a", "b", "c", "d"] {
        host.submit(PID, cmd).unwrap();
    }

    assert_eq!(recorder.search(), vec!["d", "c", "b"]);
}

#[test]
fn test_reorder_scenario() {
    let dir = TempDir::new().unwrap();
    let (recorder, mut host) = active_recorder(&dir, 3);

    for cmd in ["c", "b", "a", "b"] {
        host.submit(PID, cmd).unwrap();
    }

    assert_eq!(recorder.search(), vec!["b", "a", "c"]);
}

#[test]
fn test_submit_without_process_fails() {
    let dir = TempDir::new().unwrap();
    let (recorder, mut host) = active_recorder(&dir, 10);

    let err = host.submit(None, "ls").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HistoryError>(),
        Some(HistoryError::NoProcess)
    ));
    assert!(recorder.search().is_empty());
}

#[test]
fn test_activate_loads_persisted_history() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("history"), "git status\ncargo test\n").unwrap();

    let (recorder, mut host) = active_recorder(&dir, 10);
    assert_eq!(recorder.search(), vec!["git status", "cargo test"]);

    host.submit(PID, "cargo test").unwrap();
    assert_eq!(recorder.search(), vec!["cargo test", "git status"]);
}

#[test]
fn test_activate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history");
    fs::write(&history, "first\n").unwrap();

    let (mut recorder, mut host) = active_recorder(&dir, 10);
    assert_eq!(host.hook_count(), 2);

    // A second activation neither reloads nor registers more hooks
    fs::write(&history, "other\n").unwrap();
    recorder.activate(&mut host).unwrap();

    assert_eq!(host.hook_count(), 2);
    assert_eq!(recorder.search(), vec!["first"]);

    host.submit(PID, "ls").unwrap();
    assert_eq!(recorder.search(), vec!["ls", "first"]);
}

#[test]
fn test_reactivation_does_not_reload() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history");
    fs::write(&history, "first\n").unwrap();

    let (mut recorder, mut host) = active_recorder(&dir, 10);
    recorder.deactivate(&mut host);
    fs::write(&history, "other\n").unwrap();
    recorder.activate(&mut host).unwrap();

    assert!(recorder.is_active());
    assert_eq!(recorder.search(), vec!["first"]);
}

#[test]
fn test_entries_submitted_before_activation_keep_priority() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("history"), "x\ny\n").unwrap();

    let mut host = SessionHost::new();
    let mut recorder = Recorder::new(&config_in(&dir, 10)).unwrap();
    recorder.on_submit("y");
    recorder.on_submit("z");
    recorder.activate(&mut host).unwrap();

    assert_eq!(recorder.search(), vec!["z", "y", "x"]);
}

#[test]
fn test_shutdown_saves_history() {
    let dir = TempDir::new().unwrap();
    let (_recorder, mut host) = active_recorder(&dir, 10);

    host.submit(PID, "make").unwrap();
    host.submit(PID, "make install").unwrap();
    host.shutdown().unwrap();

    let saved = HistoryFile::new(dir.path().join("history"), 10).load();
    assert_eq!(saved, vec!["make install", "make"]);
}

#[test]
fn test_shutdown_merges_other_sessions() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history");
    let (_recorder, mut host) = active_recorder(&dir, 10);

    // Another session saved after this one started
    fs::write(&history, "x\ny\n").unwrap();

    host.submit(PID, "y").unwrap();
    host.submit(PID, "z").unwrap();
    host.shutdown().unwrap();

    assert_eq!(fs::read_to_string(&history).unwrap(), "z\ny\nx\n");
}

#[test]
fn test_save_round_trip_is_capped() {
    let dir = TempDir::new().unwrap();
    let (recorder, mut host) = active_recorder(&dir, 3);

    for cmd in ["a", "b", "c", "d", "e"] {
        host.submit(PID, cmd).unwrap();
    }
    let before = recorder.search();
    host.shutdown().unwrap();

    let (reloaded, _host) = active_recorder(&dir, 3);
    assert_eq!(reloaded.search(), before);
    assert_eq!(reloaded.search(), vec!["e", "d", "c"]);
}

#[test]
fn test_deactivate_stops_recording_and_saving() {
    let dir = TempDir::new().unwrap();
    let (mut recorder, mut host) = active_recorder(&dir, 10);

    host.submit(PID, "kept").unwrap();
    recorder.deactivate(&mut host);
    assert!(!recorder.is_active());
    assert_eq!(host.hook_count(), 0);

    host.submit(PID, "ignored").unwrap();
    host.shutdown().unwrap();

    // Memory is retained, nothing was written
    assert_eq!(recorder.search(), vec!["kept"]);
    assert!(!dir.path().join("history").exists());
}

#[test]
fn test_failed_save_leaves_memory_intact() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let mut host = SessionHost::new();
    let config = HistoryConfig {
        history_file: blocker.join("history"),
        ..Default::default()
    };
    let mut recorder = Recorder::new(&config).unwrap();
    recorder.activate(&mut host).unwrap();

    host.submit(PID, "important").unwrap();
    let err = host.shutdown().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HistoryError>(),
        Some(HistoryError::Save { .. })
    ));
    assert_eq!(recorder.search(), vec!["important"]);
}

#[test]
fn test_independent_recorders() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let (a, mut host_a) = active_recorder(&dir_a, 10);
    let (b, mut host_b) = active_recorder(&dir_b, 10);

    host_a.submit(PID, "only in a").unwrap();
    host_b.submit(PID, "only in b").unwrap();

    assert_eq!(a.search(), vec!["only in a"]);
    assert_eq!(b.search(), vec!["only in b"]);
}

#[test]
fn test_blank_input_never_stored_without_blank_rule() {
    let dir = TempDir::new().unwrap();
    let config = HistoryConfig {
        reject_patterns: vec!["^secret".to_string()],
        ..config_in(&dir, 10)
    };
    let recorder = Recorder::new(&config).unwrap();

    assert!(recorder.on_submit("ls"));
    assert!(!recorder.on_submit("   \n"));
    assert!(!recorder.on_submit(""));

    let before = recorder.search();
    assert_eq!(before, vec!["ls"]);

    recorder.save().unwrap();
    assert_eq!(recorder.file().load(), before);
}

#[test]
fn test_direct_calls_ignored_after_deactivate() {
    let dir = TempDir::new().unwrap();
    let (mut recorder, mut host) = active_recorder(&dir, 10);

    assert!(recorder.on_submit("kept"));
    recorder.deactivate(&mut host);

    assert!(!recorder.on_submit("dropped"));
    assert_eq!(recorder.save().unwrap(), 0);
    assert_eq!(recorder.search(), vec!["kept"]);
    assert!(!dir.path().join("history").exists());

    // Reactivating resumes recording and saving
    recorder.activate(&mut host).unwrap();
    assert!(recorder.on_submit("resumed"));
    assert_eq!(recorder.save().unwrap(), 2);
    assert_eq!(recorder.file().load(), vec!["resumed", "kept"]);
}
