//! Driver tests - tokio timer, command channel and event log

use std::time::Duration;

use tokio::time::Instant;

use wahoo::core::rng::SequenceRandom;
use wahoo::core::GameConfig;
use wahoo::driver::{self, DriverOptions, SnapshotSink};
use wahoo::types::{GameCommand, ShapeKind};

fn small_config(rows: usize, columns: usize, tick_interval_ms: u32) -> GameConfig {
    GameConfig {
        rows,
        columns,
        tick_interval_ms,
        ..GameConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn driver_ticks_on_interval_until_game_over() {
    let rng = SequenceRandom::of_kinds(&[ShapeKind::Box]);
    let (driver, command_tx) =
        driver::build(small_config(4, 4, 500), rng, (), DriverOptions::default()).unwrap();
    drop(command_tx);

    let start = Instant::now();
    let report = driver.run().await.unwrap();
    let elapsed = start.elapsed();

    // Two falls and a lock for the first box, then the second is blocked
    assert_eq!(report.ticks, 4);
    assert!(report.game_over);
    assert_eq!(report.lines_removed, 0);
    assert!(elapsed >= Duration::from_millis(2000), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(2500), "{:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn pause_holds_the_piece_until_resume() {
    let (sink, snapshots) = SnapshotSink::channel();
    let rng = SequenceRandom::of_kinds(&[ShapeKind::Box]);
    let (driver, command_tx) =
        driver::build(small_config(6, 4, 500), rng, sink, DriverOptions::default()).unwrap();
    let handle = tokio::spawn(driver.run());

    command_tx.send(GameCommand::Pause).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(snapshots.borrow().active.unwrap().row, 0);

    command_tx.send(GameCommand::Resume).await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(snapshots.borrow().active.unwrap().row, 1);

    drop(command_tx);
    let report = tokio_test::assert_ok!(handle.await).unwrap();
    assert!(report.game_over);
    assert!(snapshots.borrow().is_over);
}

#[tokio::test(start_paused = true)]
async fn commands_move_the_piece_between_ticks() {
    let (sink, snapshots) = SnapshotSink::channel();
    let rng = SequenceRandom::of_kinds(&[ShapeKind::T]);
    let (driver, command_tx) =
        driver::build(small_config(20, 10, 500), rng, sink, DriverOptions::default()).unwrap();
    let handle = tokio::spawn(driver.run());

    command_tx.send(GameCommand::Left).await.unwrap();
    command_tx.send(GameCommand::Left).await.unwrap();
    command_tx.send(GameCommand::RotateRight).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let active = snapshots.borrow().active.unwrap();
    assert_eq!(active.column, 1);
    assert_eq!(active.rotation, 1);
    assert_eq!(active.row, 0);

    command_tx.send(GameCommand::Drop).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let active = snapshots.borrow().active.unwrap();
    assert_eq!(active.row, 17);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn idle_driver_returns_when_commands_close() {
    let options = DriverOptions {
        autostart: false,
        exit_on_game_over: false,
        ..DriverOptions::default()
    };
    let rng = SequenceRandom::of_kinds(&[ShapeKind::T]);
    let (driver, command_tx) = driver::build(GameConfig::default(), rng, (), options).unwrap();
    drop(command_tx);

    let report = driver.run().await.unwrap();
    assert_eq!(report.ticks, 0);
    assert!(!report.game_over);
    assert_eq!(report.final_interval_ms, 500);
}

#[tokio::test(start_paused = true)]
async fn new_command_starts_a_game() {
    let options = DriverOptions {
        autostart: false,
        ..DriverOptions::default()
    };
    let rng = SequenceRandom::of_kinds(&[ShapeKind::Box]);
    let (driver, command_tx) = driver::build(small_config(4, 4, 100), rng, (), options).unwrap();
    let handle = tokio::spawn(driver.run());

    command_tx.send(GameCommand::New).await.unwrap();
    let report = tokio_test::assert_ok!(handle.await).unwrap();
    assert_eq!(report.ticks, 4);
    assert!(report.game_over);
}

#[tokio::test]
async fn event_log_records_lifecycle_as_json_lines() {
    let path = std::env::temp_dir().join(format!("wahoo-events-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let options = DriverOptions {
        log_path: Some(path.to_string_lossy().into_owned()),
        ..DriverOptions::default()
    };
    let rng = SequenceRandom::of_kinds(&[ShapeKind::Box]);
    let (driver, command_tx) = driver::build(small_config(4, 4, 10), rng, (), options).unwrap();
    drop(command_tx);
    let report = driver.run().await.unwrap();
    assert!(report.game_over);

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let _ = std::fs::remove_file(&path);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["record"], "new_game");
    assert_eq!(records[0]["rows"], 4);
    assert_eq!(records[0]["interval_ms"], 10);
    assert_eq!(records[1]["record"], "event");
    assert_eq!(records[1]["tick"], 4);
    assert_eq!(records[1]["event"]["type"], "game_over");
}
