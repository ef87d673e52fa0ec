//! Collision detection and response
//!
//! Everything in the playfield is an axis-aligned rectangle except the ball,
//! so the only shape test needed is circle vs rectangle.

use glam::Vec2;

use super::state::{Ball, Paddle, Rect};

/// Largest bounce angle off the paddle edge (radians from vertical)
pub const MAX_BOUNCE_ANGLE: f32 = 1.05; // ~60 degrees

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a rectangle
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.clamp_point(ball_pos);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    if dist_sq > 1e-8 {
        // Center outside the rectangle: normal from nearest surface point
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    // Center inside: push out along the axis of least overlap
    let local = ball_pos - rect.center;
    let overlap_x = rect.half.x - local.x.abs();
    let overlap_y = rect.half.y - local.y.abs();
    if overlap_x < overlap_y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(local.x.signum(), 0.0),
            penetration: overlap_x + ball_radius,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, local.y.signum()),
            penetration: overlap_y + ball_radius,
        }
    }
}

/// Reflect velocity off a surface with given normal
#[inline]
pub fn reflect_velocity(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Bounce the ball off the paddle top.
///
/// Hit position picks the outgoing angle: center goes straight up, edges go
/// out at `MAX_BOUNCE_ANGLE`. Speed is preserved.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle) {
    let half_width = (paddle.size.x / 2.0).max(f32::EPSILON);
    let offset = ((ball.pos.x - paddle.pos.x) / half_width).clamp(-1.0, 1.0);
    let angle = offset * MAX_BOUNCE_ANGLE;
    let speed = ball.vel.length().max(ball.speed);

    ball.vel = Vec2::new(angle.sin(), angle.cos()) * speed;
    // Sit the ball on top of the paddle so it can't re-collide next tick
    ball.pos.y = paddle.pos.y + paddle.size.y / 2.0 + ball.radius;
}
