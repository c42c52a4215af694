use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use super::{
    action::Direction,
    state::{Board, Cell},
};

/// Smallest snake a game may start with
pub const MIN_SNAKE_LENGTH: usize = 4;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square board
    pub board_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Cell the head occupies after a reset
    pub start_head: Cell,
    /// Heading after a reset; the body trails out behind it
    pub start_direction: Direction,

    /// Points awarded per food eaten
    pub food_score: u32,

    // Speed ramp, all in milliseconds
    /// Tick interval at the start of a game
    pub initial_tick_ms: u64,
    /// Amount the interval shrinks per food eaten
    pub tick_step_ms: u64,
    /// The interval never drops below this
    pub min_tick_ms: u64,
    /// Grace period between `start()` and the first tick
    pub start_delay_ms: u64,

    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 12,
            initial_snake_length: MIN_SNAKE_LENGTH,
            start_head: Cell::new(-2, 0),
            start_direction: Direction::Right,
            food_score: 10,
            initial_tick_ms: 450,
            tick_step_ms: 15,
            min_tick_ms: 250,
            start_delay_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing, with the snake starting at the centre
    pub fn small() -> Self {
        Self {
            start_head: Cell::new(0, 0),
            ..Self::new(10)
        }
    }

    /// Create a large board
    pub fn large() -> Self {
        Self::new(30)
    }

    /// Read a JSON config file; missing fields fall back to the defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// Tick interval after `foods_eaten` foods in one game
    pub fn tick_interval_after(&self, foods_eaten: u32) -> Duration {
        let reduction = self.tick_step_ms.saturating_mul(u64::from(foods_eaten));
        let ms = self
            .initial_tick_ms
            .saturating_sub(reduction)
            .max(self.min_tick_ms);
        Duration::from_millis(ms)
    }

    /// Number of cells a snake can legally occupy
    pub fn playable_cells(&self) -> usize {
        self.board().playable_cells()
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    /// Cells the snake occupies right after a reset, head first
    pub fn start_body(&self) -> Vec<Cell> {
        let (dx, dz) = self.start_direction.delta();
        (0..self.initial_snake_length as i32)
            .map(|i| Cell::new(self.start_head.x - dx * i, self.start_head.z - dz * i))
            .collect()
    }

    /// Check that a game built from this config can actually be played
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.board_size >= 4,
            "board_size must be at least 4, got {}",
            self.board_size
        );
        ensure!(
            self.initial_snake_length >= MIN_SNAKE_LENGTH,
            "initial_snake_length must be at least {}, got {}",
            MIN_SNAKE_LENGTH,
            self.initial_snake_length
        );
        ensure!(
            self.initial_snake_length < self.playable_cells(),
            "a snake of length {} leaves no room for food on a board of size {}",
            self.initial_snake_length,
            self.board_size
        );
        ensure!(self.min_tick_ms > 0, "min_tick_ms must be greater than zero");
        ensure!(
            self.min_tick_ms <= self.initial_tick_ms,
            "min_tick_ms ({}) must not exceed initial_tick_ms ({})",
            self.min_tick_ms,
            self.initial_tick_ms
        );

        let board = self.board();
        for cell in self.start_body() {
            ensure!(
                board.contains(cell),
                "starting snake cell ({}, {}) lies outside a board of size {}",
                cell.x,
                cell.z,
                self.board_size
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.food_score, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert!(config.validate().is_ok());
        assert!(GameConfig::small().validate().is_ok());
        assert!(GameConfig::large().validate().is_ok());
    }

    #[test]
    fn test_start_body_trails_behind_head() {
        let config = GameConfig::default();
        assert_eq!(
            config.start_body(),
            vec![
                Cell::new(-2, 0),
                Cell::new(-3, 0),
                Cell::new(-4, 0),
                Cell::new(-5, 0)
            ]
        );
    }

    #[test]
    fn test_speed_ramp_is_clamped() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval_after(0), Duration::from_millis(450));
        assert_eq!(config.tick_interval_after(1), Duration::from_millis(435));
        assert_eq!(config.tick_interval_after(13), Duration::from_millis(255));
        assert_eq!(config.tick_interval_after(14), Duration::from_millis(250));
        assert_eq!(config.tick_interval_after(1000), Duration::from_millis(250));
        assert_eq!(config.tick_interval_after(u32::MAX), Duration::from_millis(250));
    }

    #[test]
    fn test_validate_rejects_short_snake() {
        let config = GameConfig {
            initial_snake_length: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_snake_off_board() {
        // Tail would land on the lethal column at -6
        let config = GameConfig {
            start_head: Cell::new(-3, 0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_speed_range() {
        let config = GameConfig {
            min_tick_ms: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_size": 16, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.board_size, 16);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_tick_ms, 450);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = GameConfig::from_json_file(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
