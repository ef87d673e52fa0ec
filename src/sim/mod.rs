//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (blocks in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod manager;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_rect_collision, paddle_bounce, reflect_velocity};
pub use grid::{block_color, block_points, block_position, spawn_blocks};
pub use manager::GameManager;
pub use state::{Ball, Block, GameEvent, GamePhase, Paddle, Rect};
pub use tick::{TickInput, tick};
