//! Headless Wahoo runner (default binary).
//!
//! Plays one game on the tokio driver with an autoplayer sending random
//! commands, then prints a summary and the final board. Configuration comes
//! from the environment (`WAHOO_ROWS`, `WAHOO_TICK_MS`, `WAHOO_SEED`, ...);
//! `WAHOO_LOG` picks the log level and `WAHOO_LOG_PATH` enables the JSON-lines
//! event log.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use tokio::sync::mpsc;

use wahoo::core::{BoardSnapshot, GameConfig, SimpleRng, ThreadRandom};
use wahoo::driver::{self, DriverOptions, SnapshotSink};
use wahoo::types::GameCommand;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[Wahoo] {} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() -> Result<()> {
    let level = std::env::var("WAHOO_LOG")
        .ok()
        .and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("logger already installed: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

/// Sends random movement commands until the driver hangs up
async fn autoplay(tx: mpsc::Sender<GameCommand>, seed: u32, pace: Duration) {
    const MOVES: [GameCommand; 5] = [
        GameCommand::Left,
        GameCommand::Right,
        GameCommand::RotateLeft,
        GameCommand::RotateRight,
        GameCommand::Drop,
    ];

    let mut rng = SimpleRng::new(seed);
    loop {
        tokio::time::sleep(pace).await;
        let command = MOVES[rng.next_range(MOVES.len() as u32) as usize];
        if tx.send(command).await.is_err() {
            break;
        }
    }
}

fn render(snapshot: &BoardSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.columns + 3) * snapshot.rows);
    for row in 0..snapshot.rows as i32 {
        out.push('|');
        for col in 0..snapshot.columns as i32 {
            let ch = match snapshot.color_at(row, col) {
                Some(color) => color.as_str().chars().next().unwrap_or('#'),
                None => '.',
            };
            out.push(ch);
        }
        out.push_str("|\n");
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    config.validate().context("invalid WAHOO_* configuration")?;
    let options = DriverOptions::from_env();

    let pace = std::env::var("WAHOO_AUTOPLAY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(120));

    let rng = match config.seed {
        Some(seed) => ThreadRandom::seeded(seed),
        None => ThreadRandom::new(),
    };

    println!(
        "[Wahoo] {}x{} board, tick {}ms, seed {}",
        config.rows,
        config.columns,
        config.tick_interval_ms,
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string())
    );

    let (sink, snapshots) = SnapshotSink::channel();
    let (driver, command_tx) = driver::build(config, rng, sink, options)?;

    let autoplay_seed = config.seed.unwrap_or(1) as u32;
    let player = tokio::spawn(autoplay(command_tx, autoplay_seed, pace));

    let report = driver.run().await?;
    player.abort();

    println!(
        "[Wahoo] game over after {} ticks: {} lines, final interval {}ms",
        report.ticks, report.lines_removed, report.final_interval_ms
    );
    if log::log_enabled!(Level::Info) {
        print!("{}", render(&snapshots.borrow()));
    }

    Ok(())
}
