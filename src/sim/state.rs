//! Core simulation types
//!
//! Entities owned by the game manager: paddle, ball and blocks.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ArenaSettings, Color};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a scheduled reset (ball parked, no input)
    Countdown,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BlocksReset { count: usize },
    GameReset { lives: u32 },
    BlockDestroyed { id: u32, points: u32 },
    SpeedIncreased { speed: f32 },
    PlayerDied { lives_left: u32 },
    GameOver { final_score: u64 },
    WaveCleared,
}

/// Axis-aligned rectangle (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point inside the rectangle to `p`
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Slide horizontally, staying between the side walls
    pub fn move_by(&mut self, dx: f32, arena: &ArenaSettings) {
        let limit = (arena.half_width - self.size.x / 2.0).max(0.0);
        self.pos.x = (self.pos.x + dx).clamp(-limit, limit);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Current speed (velocity magnitude once launched)
    pub speed: f32,
    pub max_speed: f32,
    /// Inactive balls neither move nor collide
    pub active: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, speed: f32, max_speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            speed,
            max_speed,
            active: false,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.vel = Vec2::ZERO;
        }
    }

    /// Send the ball upward, within `spread` radians of vertical
    pub fn launch(&mut self, rng: &mut Pcg32, spread: f32) {
        let angle = if spread > 0.0 {
            rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        self.vel = Vec2::new(angle.sin(), angle.cos()) * self.speed;
    }

    /// Change speed within `0..=max_speed`, keeping the current direction
    pub fn add_speed(&mut self, value: f32) {
        self.speed = (self.speed + value).clamp(0.0, self.max_speed);
        if self.vel != Vec2::ZERO {
            self.vel = self.vel.normalize() * self.speed;
        }
    }
}

/// A brick in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub points: u32,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
