//! Game configuration
//!
//! | Variable        | Field              | Default |
//! |-----------------|--------------------|---------|
//! | `WAHOO_ROWS`    | `rows`             | 20      |
//! | `WAHOO_COLUMNS` | `columns`          | 10      |
//! | `WAHOO_PADDING` | `padding`          | 2       |
//! | `WAHOO_TICK_MS` | `tick_interval_ms` | 500     |
//! | `WAHOO_SEED`    | `seed`             | none    |
//!
//! Unparseable values fall back to the default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_COLUMNS, DEFAULT_PADDING, DEFAULT_ROWS, DEFAULT_TICK_INTERVAL_MS,
    LINES_PER_SPEED_STEP, SPEED_STEP_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRows,
    ZeroColumns,
    ZeroTickInterval,
    ZeroLinesPerStep,
    NegativePadding(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRows => write!(f, "board must have at least one row"),
            ConfigError::ZeroColumns => write!(f, "board must have at least one column"),
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be positive"),
            ConfigError::ZeroLinesPerStep => write!(f, "lines per speed step must be positive"),
            ConfigError::NegativePadding(p) => write!(f, "padding must not be negative (got {p})"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    /// Pixels between cells, used by the geometry query
    pub padding: i32,
    /// Base tick interval before any speed-up
    pub tick_interval_ms: u32,
    /// Interval reduction per speed step
    pub speed_step_ms: u32,
    /// Cleared lines needed for one speed step
    pub lines_per_step: u32,
    /// Seed for a reproducible piece sequence
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            padding: DEFAULT_PADDING,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            speed_step_ms: SPEED_STEP_MS,
            lines_per_step: LINES_PER_SPEED_STEP,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).map(|s| s.trim().to_string());

        Self {
            rows: parsed("WAHOO_ROWS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rows),
            columns: parsed("WAHOO_COLUMNS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.columns),
            padding: parsed("WAHOO_PADDING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.padding),
            tick_interval_ms: parsed("WAHOO_TICK_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tick_interval_ms),
            seed: parsed("WAHOO_SEED").and_then(|s| s.parse().ok()),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.lines_per_step == 0 {
            return Err(ConfigError::ZeroLinesPerStep);
        }
        if self.padding < 0 {
            return Err(ConfigError::NegativePadding(self.padding));
        }
        Ok(())
    }

    /// Interval after `lines` cumulative cleared lines
    ///
    /// Drops by `speed_step_ms` every `lines_per_step` lines. Returns `None`
    /// once the reduction would reach zero or below; the caller keeps its
    /// current interval in that case.
    pub fn interval_for_lines(&self, lines: u32) -> Option<u32> {
        let steps = lines / self.lines_per_step.max(1);
        let speed = steps.saturating_mul(self.speed_step_ms);
        self.tick_interval_ms
            .checked_sub(speed)
            .filter(|interval| *interval > 0)
    }
}
