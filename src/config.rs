//! Game configuration
//!
//! Grid layout, player defaults and tuning values. Loaded from a JSON file
//! on native; any missing field falls back to the built-in layout.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on blocks in one grid
pub const MAX_GRID_BLOCKS: usize = 4096;

/// RGBA color, components in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// CSS `rgba(...)` string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            self.a.clamp(0.0, 1.0)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Brick grid layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// (columns, rows)
    pub grid_size: (u32, u32),
    /// Anchor of the top-left block
    pub grid_position: Vec2,
    pub block_size: Vec2,
    pub block_gap: Vec2,
    /// Per-row colors, top row first. Rows past the end are white.
    pub row_colors: Vec<Color>,
    /// Per-row points, top row first. Rows past the end are worth nothing.
    pub row_points: Vec<u32>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_size: (12, 6),
            grid_position: Vec2::new(-86.0, 60.0),
            block_size: Vec2::new(14.0, 4.0),
            block_gap: Vec2::new(2.0, 2.0),
            row_colors: vec![
                Color::rgb(0.90, 0.20, 0.20), // Red
                Color::rgb(0.95, 0.55, 0.15), // Orange
                Color::rgb(0.95, 0.85, 0.20), // Yellow
                Color::rgb(0.30, 0.80, 0.30), // Green
                Color::rgb(0.25, 0.50, 0.95), // Blue
                Color::rgb(0.60, 0.35, 0.85), // Purple
            ],
            row_points: vec![7, 7, 5, 5, 3, 1],
        }
    }
}

/// Player reset positions and speed progression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub initial_paddle_position: Vec2,
    pub initial_paddle_size: Vec2,
    pub initial_ball_position: Vec2,
    /// Score events between ball speed-ups
    pub speed_increase_points: i32,
    /// Speed added to the ball on each speed-up
    pub speed_increase_value: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_paddle_position: Vec2::new(0.0, -65.0),
            initial_paddle_size: Vec2::new(24.0, 3.0),
            initial_ball_position: Vec2::new(0.0, -60.0),
            speed_increase_points: 5,
            speed_increase_value: 4.0,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub launch_speed: f32,
    pub max_speed: f32,
    /// Launch direction spread either side of straight up (radians)
    pub launch_spread: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: 1.5,
            launch_speed: 60.0,
            max_speed: 140.0,
            launch_spread: 0.5,
        }
    }
}

/// Playfield walls. Centered on the origin; the bottom edge is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            half_width: 100.0,
            half_height: 75.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSettings,
    pub player: PlayerSettings,
    pub ball: BallSettings,
    pub arena: ArenaSettings,
    pub max_lives: u32,
    /// Seconds between a reset being scheduled and the ball going live
    pub reset_delay: f32,
    /// Paddle width applied when the player dies
    pub death_paddle_width: f32,
    /// Paddle movement speed (units/second)
    pub paddle_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            player: PlayerSettings::default(),
            ball: BallSettings::default(),
            arena: ArenaSettings::default(),
            max_lives: 3,
            reset_delay: 3.0,
            death_paddle_width: 18.0,
            paddle_speed: 120.0,
        }
    }
}

impl GameConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));
        // NaN fails every comparison, so test for what is allowed
        let positive = |x: f32| x.is_finite() && x > 0.0;
        let non_negative = |x: f32| x.is_finite() && x >= 0.0;
        let finite = |v: Vec2| v.is_finite();

        let (columns, rows) = self.grid.grid_size;
        match columns.checked_mul(rows) {
            Some(count) if count as usize <= MAX_GRID_BLOCKS => {}
            _ => return invalid("grid.grid_size has too many blocks"),
        }
        if !positive(self.grid.block_size.x) || !positive(self.grid.block_size.y) {
            return invalid("grid.block_size must be positive");
        }
        if !finite(self.grid.grid_position) || !finite(self.grid.block_gap) {
            return invalid("grid position and gap must be finite");
        }
        if !positive(self.arena.half_width) || !positive(self.arena.half_height) {
            return invalid("arena extents must be positive");
        }

        let player = &self.player;
        if !finite(player.initial_paddle_position) || !finite(player.initial_ball_position) {
            return invalid("player start positions must be finite");
        }
        if !positive(player.initial_paddle_size.x) || !positive(player.initial_paddle_size.y) {
            return invalid("player.initial_paddle_size must be positive");
        }
        if !non_negative(player.speed_increase_value) {
            return invalid("player.speed_increase_value cannot be negative");
        }

        if self.max_lives == 0 {
            return invalid("max_lives must be at least 1");
        }
        if !non_negative(self.reset_delay) {
            return invalid("reset_delay cannot be negative");
        }
        if !positive(self.death_paddle_width) {
            return invalid("death_paddle_width must be positive");
        }
        if !non_negative(self.paddle_speed) {
            return invalid("paddle_speed cannot be negative");
        }
        if !positive(self.ball.radius) {
            return invalid("ball.radius must be positive");
        }
        if !positive(self.ball.launch_speed) {
            return invalid("ball.launch_speed must be positive");
        }
        if !self.ball.max_speed.is_finite() || self.ball.max_speed < self.ball.launch_speed {
            return invalid("ball.max_speed must be >= ball.launch_speed");
        }
        if !non_negative(self.ball.launch_spread) {
            return invalid("ball.launch_spread cannot be negative");
        }
        Ok(())
    }
}
