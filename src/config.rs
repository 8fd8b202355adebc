use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use stopwatch_core::DEFAULT_TICK_PERIOD;

/// Loaded when no `--config` is given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "stopwatch.toml";

const DEFAULT_LAP_ROWS: usize = 10;
/// More rows than any terminal can show.
const MAX_LAP_ROWS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub clock: ClockSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub title: String,
    /// Lap lines visible at once.
    pub lap_rows: usize,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            title: "STOPWATCH".to_string(),
            lap_rows: DEFAULT_LAP_ROWS,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Reads `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] when it
    /// exists, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn with_tick_ms(mut self, tick_ms: Option<u64>) -> Self {
        if let Some(tick_ms) = tick_ms {
            self.clock.tick_ms = tick_ms;
        }
        self.sanitized()
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.clock.tick_ms)
    }

    fn sanitized(mut self) -> Self {
        if self.clock.tick_ms == 0 {
            log::warn!(
                "tick_ms = 0 is not usable, falling back to {} ms",
                ClockSection::default().tick_ms
            );
            self.clock.tick_ms = ClockSection::default().tick_ms;
        }
        if self.display.lap_rows == 0 {
            self.display.lap_rows = DEFAULT_LAP_ROWS;
        }
        if self.display.lap_rows > MAX_LAP_ROWS {
            log::warn!(
                "lap_rows = {} is more than a terminal can show, using {}",
                self.display.lap_rows,
                MAX_LAP_ROWS
            );
            self.display.lap_rows = MAX_LAP_ROWS;
        }
        self
    }
}
