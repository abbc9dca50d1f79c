//! Tokio tick driver
//!
//! Runs a [`GameLoop`] inside one task. The loop's [`TickScheduler`] is a
//! [`TimerHandle`] that publishes the requested interval on a `watch`
//! channel; the driver `select!`s over that channel, the pending tick
//! deadline and an `mpsc` channel of player commands. Re-arming replaces the
//! pending deadline, so two schedules never run side by side.
//!
//! # Environment
//!
//! | Variable              | Meaning                               | Default |
//! |-----------------------|---------------------------------------|---------|
//! | `WAHOO_LOG_PATH`      | JSON-lines event log, appended to     | none    |
//! | `WAHOO_COMMAND_QUEUE` | Buffered player commands              | 32      |
//!
//! # Event log format
//!
//! One JSON object per line, tagged by `record`:
//!
//! ```text
//! {"record":"new_game","tick":0,"rows":20,"columns":10,"interval_ms":500}
//! {"record":"event","tick":57,"event":{"type":"lines_removed","count":1}}
//! {"record":"speed","tick":412,"interval_ms":400}
//! ```

use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use wahoo_core::{BoardSnapshot, GameConfig, GameLoop, RandomSource, RedrawSink, TickScheduler};
use wahoo_types::{GameCommand, GameEvent, PlayState};

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Capacity of the command channel
    pub command_queue: usize,
    pub log_path: Option<String>,
    /// Start a game as soon as [`Driver::run`] is called
    pub autostart: bool,
    /// Return from [`Driver::run`] when the game ends
    pub exit_on_game_over: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            command_queue: 32,
            log_path: None,
            autostart: true,
            exit_on_game_over: true,
        }
    }
}

impl DriverOptions {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let command_queue = env::var("WAHOO_COMMAND_QUEUE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(32);

        let log_path = env::var("WAHOO_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            command_queue,
            log_path,
            ..Self::default()
        }
    }
}

/// Scheduler half handed to the game loop
#[derive(Debug)]
pub struct TimerHandle {
    tx: watch::Sender<Option<u32>>,
}

impl TimerHandle {
    pub fn channel() -> (Self, watch::Receiver<Option<u32>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }
}

impl TickScheduler for TimerHandle {
    fn start_timer(&mut self, interval_ms: u32) {
        // Mark as changed even when the interval repeats (resume)
        self.tx.send_replace(Some(interval_ms));
    }
}

/// Publishes every redraw on a `watch` channel for a rendering task
#[derive(Debug)]
pub struct SnapshotSink {
    tx: watch::Sender<BoardSnapshot>,
}

impl SnapshotSink {
    pub fn channel() -> (Self, watch::Receiver<BoardSnapshot>) {
        let (tx, rx) = watch::channel(BoardSnapshot::default());
        (Self { tx }, rx)
    }
}

impl RedrawSink for SnapshotSink {
    fn redraw(&mut self, snapshot: &BoardSnapshot) {
        self.tx.send_modify(|current| current.clone_from(snapshot));
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum LogRecord {
    NewGame {
        tick: u64,
        rows: usize,
        columns: usize,
        interval_ms: u32,
    },
    Event {
        tick: u64,
        event: GameEvent,
    },
    Speed {
        tick: u64,
        interval_ms: u32,
    },
    Paused {
        tick: u64,
    },
    Resumed {
        tick: u64,
    },
}

/// Append-only JSON-lines log written by a background task
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<LogRecord>,
    task: JoinHandle<()>,
}

impl EventLog {
    pub fn open(path: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        let task = tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    log::warn!("event log {} unavailable: {}", path, e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });
        Self { tx, task }
    }

    fn record(&self, rec: LogRecord) {
        let _ = self.tx.send(rec);
    }

    /// Flush pending records and wait for the writer to finish
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DriverReport {
    pub ticks: u64,
    pub lines_removed: u32,
    pub game_over: bool,
    pub final_interval_ms: u32,
}

pub struct Driver<R, D> {
    game: GameLoop<R, TimerHandle, D>,
    timer_rx: watch::Receiver<Option<u32>>,
    commands: mpsc::Receiver<GameCommand>,
    options: DriverOptions,
    event_log: Option<EventLog>,
    ticks: u64,
}

/// Build a driver and the sender used to feed it player commands
pub fn build<R, D>(
    config: GameConfig,
    rng: R,
    sink: D,
    options: DriverOptions,
) -> anyhow::Result<(Driver<R, D>, mpsc::Sender<GameCommand>)>
where
    R: RandomSource,
    D: RedrawSink,
{
    let (timer, timer_rx) = TimerHandle::channel();
    let game = GameLoop::new(config, rng, timer, sink).context("invalid game configuration")?;
    let (command_tx, commands) = mpsc::channel(options.command_queue.max(1));

    Ok((
        Driver {
            game,
            timer_rx,
            commands,
            options,
            event_log: None,
            ticks: 0,
        },
        command_tx,
    ))
}

impl<R, D> Driver<R, D>
where
    R: RandomSource,
    D: RedrawSink,
{
    pub fn game(&self) -> &GameLoop<R, TimerHandle, D> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameLoop<R, TimerHandle, D> {
        &mut self.game
    }

    /// Drive the game until it ends (or, with `exit_on_game_over` off, until
    /// the command channel closes and nothing is scheduled)
    pub async fn run(mut self) -> anyhow::Result<DriverReport> {
        if let Some(path) = self.options.log_path.clone() {
            log::info!("writing event log to {}", path);
            self.event_log = Some(EventLog::open(path));
        }

        if self.options.autostart {
            self.start_game();
        }

        let mut interval = Duration::from_millis(self.game.tick_interval_ms() as u64);
        let mut deadline: Option<Instant> = None;
        let mut commands_open = true;

        loop {
            tokio::select! {
                changed = self.timer_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if let Some(ms) = *self.timer_rx.borrow_and_update() {
                        interval = Duration::from_millis(ms as u64);
                        deadline = Some(Instant::now() + interval);
                        log::trace!("timer armed at {}ms", ms);
                    }
                }
                command = self.commands.recv(), if commands_open => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            log::debug!("command channel closed");
                            commands_open = false;
                        }
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let keep = self.handle_tick();
                    deadline = if keep { deadline.map(|d| d + interval) } else { None };
                }
            }

            if self.game.is_over() && self.options.exit_on_game_over {
                break;
            }
            if !commands_open && deadline.is_none() && !self.timer_rx.has_changed().unwrap_or(false) {
                break;
            }
        }

        let report = DriverReport {
            ticks: self.ticks,
            lines_removed: self.game.lines_removed(),
            game_over: self.game.is_over(),
            final_interval_ms: self.game.tick_interval_ms(),
        };

        if let Some(event_log) = self.event_log.take() {
            event_log.close().await;
        }

        Ok(report)
    }

    fn start_game(&mut self) {
        self.game.new_game();
        let config = *self.game.config();
        self.log(LogRecord::NewGame {
            tick: self.ticks,
            rows: config.rows,
            columns: config.columns,
            interval_ms: self.game.tick_interval_ms(),
        });
    }

    fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::New => self.start_game(),
            GameCommand::Pause => {
                if self.game.pause() {
                    self.log(LogRecord::Paused { tick: self.ticks });
                }
            }
            GameCommand::Resume => {
                if self.game.resume() {
                    self.log(LogRecord::Resumed { tick: self.ticks });
                }
            }
            _ => {
                let changed = self.game.apply_command(command);
                log::trace!("command {} -> {}", command.as_str(), changed);
            }
        }
    }

    fn handle_tick(&mut self) -> bool {
        if self.game.state() != PlayState::Playing {
            // Fired while paused or after the end; resume or new game re-arms
            return false;
        }
        let outcome = self.game.tick();
        self.ticks += 1;

        for event in outcome.events {
            log::debug!("tick {}: {:?}", self.ticks, event);
            self.log(LogRecord::Event {
                tick: self.ticks,
                event,
            });
        }
        if let Some(interval_ms) = outcome.interval_ms {
            self.log(LogRecord::Speed {
                tick: self.ticks,
                interval_ms,
            });
        }

        outcome.keep_scheduling
    }

    fn log(&self, rec: LogRecord) {
        if let Some(event_log) = &self.event_log {
            event_log.record(rec);
        }
    }
}
