//! Breakout - A brick-grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (game manager, grid spawning, collisions)
//! - `config`: Data-driven grid/player settings
//! - `hud`: Lives and score label text
//! - `highscores`: Persisted leaderboard

pub mod config;
pub mod error;
pub mod highscores;
pub mod hud;
pub mod sim;

pub use config::{ArenaSettings, BallSettings, Color, GameConfig, GridSettings, PlayerSettings};
pub use error::{Error, Result};
pub use highscores::HighScores;
pub use hud::Hud;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
