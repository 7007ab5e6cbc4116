//! Run-time configuration for the visualizer.

use std::fmt;
use std::time::Duration;

use astar_core::DEFAULT_ROWS;

/// Configuration of an [`InteractionController`](crate::InteractionController)
/// and the loop driving it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Grid dimension (rows = columns).
    pub rows: i32,
    /// Width of the drawing surface; each cell is `pixel_width / rows` wide.
    pub pixel_width: i32,
    /// Input poll timeout in milliseconds; one search step runs per tick.
    pub tick_ms: u64,
    /// Run a started search to completion in a single tick.
    pub auto_run: bool,
    /// Capture mouse input.
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            pixel_width: DEFAULT_ROWS * 2,
            tick_ms: 16,
            auto_run: false,
            mouse: true,
        }
    }
}

impl Config {
    /// Set the grid dimension, keeping two pixels per cell.
    pub fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self.pixel_width = rows.saturating_mul(2);
        self
    }

    pub fn with_pixel_width(mut self, pixel_width: i32) -> Self {
        self.pixel_width = pixel_width;
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_auto_run(mut self, auto_run: bool) -> Self {
        self.auto_run = auto_run;
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Tick length as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Check that the configuration describes a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.pixel_width < self.rows {
            return Err(ConfigError::CellTooSmall {
                rows: self.rows,
                pixel_width: self.pixel_width,
            });
        }
        Ok(())
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than two rows leaves no room for distinct start and end cells.
    TooFewRows(i32),
    /// Cells would be less than one pixel wide.
    CellTooSmall { rows: i32, pixel_width: i32 },
    /// A command-line value could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRows(n) => write!(f, "config: need at least 2 rows, got {n}"),
            Self::CellTooSmall { rows, pixel_width } => write!(
                f,
                "config: {pixel_width} pixels cannot hold {rows} cells"
            ),
            Self::Parse(s) => write!(f, "config: cannot parse \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Build a [`Config`] from command-line arguments (program name excluded).
///
/// Accepts an optional row count and the `--auto` flag.
pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = Config::default();
    for arg in args {
        let arg = arg.as_ref();
        if arg == "--auto" {
            config = config.with_auto_run(true);
        } else {
            let rows = arg
                .parse()
                .map_err(|_| ConfigError::Parse(arg.to_string()))?;
            config = config.with_rows(rows);
        }
    }
    config.validate()?;
    Ok(config)
}
