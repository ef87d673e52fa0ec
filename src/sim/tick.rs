//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{ball_rect_collision, paddle_bounce, reflect_velocity};
use super::manager::GameManager;
use super::state::GamePhase;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal paddle input, -1.0 (left) to 1.0 (right)
    pub move_axis: f32,
    /// Pause toggle
    pub pause: bool,
    /// Autopilot - the paddle tracks the ball
    pub autopilot: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(manager: &mut GameManager, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match manager.phase {
            GamePhase::Playing | GamePhase::Countdown => {
                manager.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                manager.phase = if manager.pending_reset().is_some() {
                    GamePhase::Countdown
                } else {
                    GamePhase::Playing
                };
            }
        }
    }

    if manager.phase == GamePhase::Paused {
        return;
    }

    manager.time_ticks += 1;
    manager.advance_reset_timer(dt);

    if manager.is_user_interaction_enabled() {
        let axis = if input.autopilot {
            autopilot_axis(manager)
        } else {
            input.move_axis.clamp(-1.0, 1.0)
        };
        let dx = axis * manager.config().paddle_speed * dt;
        let arena = manager.config().arena.clone();
        manager.paddle.move_by(dx, &arena);
    }

    if manager.ball.active {
        step_ball(manager, dt);
    }
}

/// Steer toward the ball, with a little lead so it doesn't always hit dead center
fn autopilot_axis(manager: &GameManager) -> f32 {
    let ball = manager.ball();
    let paddle = manager.paddle();
    let lead = (manager.time_ticks() as f32 * 0.013).sin() * paddle.size.x * 0.3;
    let target = ball.pos.x + lead;
    let delta = target - paddle.pos.x;
    (delta / 2.0).clamp(-1.0, 1.0)
}

fn step_ball(manager: &mut GameManager, dt: f32) {
    let arena = manager.config().arena.clone();
    let ball = &mut manager.ball;
    ball.pos += ball.vel * dt;

    // Side and top walls
    let r = ball.radius;
    if ball.pos.x - r < -arena.half_width && ball.vel.x < 0.0 {
        ball.pos.x = -arena.half_width + r;
        ball.vel = reflect_velocity(ball.vel, Vec2::X);
    } else if ball.pos.x + r > arena.half_width && ball.vel.x > 0.0 {
        ball.pos.x = arena.half_width - r;
        ball.vel = reflect_velocity(ball.vel, Vec2::NEG_X);
    }
    if ball.pos.y + r > arena.half_height && ball.vel.y > 0.0 {
        ball.pos.y = arena.half_height - r;
        ball.vel = reflect_velocity(ball.vel, Vec2::NEG_Y);
    }

    // Paddle (only when falling onto it)
    if ball.vel.y < 0.0 {
        let result = ball_rect_collision(ball.pos, ball.radius, &manager.paddle.rect());
        if result.hit && result.normal.y > 0.0 {
            paddle_bounce(ball, &manager.paddle);
        }
    }

    // At most one block per tick
    let hit = manager.blocks.iter().enumerate().find_map(|(i, block)| {
        let result = ball_rect_collision(ball.pos, ball.radius, &block.rect());
        result.hit.then_some((i, result))
    });
    if let Some((index, result)) = hit {
        ball.pos += result.normal * result.penetration;
        if ball.vel.dot(result.normal) < 0.0 {
            ball.vel = reflect_velocity(ball.vel, result.normal);
        }

        let block = manager.blocks.remove(index);
        log::debug!("Block {} destroyed (+{})", block.id, block.points);
        manager.push_block_destroyed(block.id, block.points);
        manager.add_player_score(block.points);

        if manager.blocks.is_empty() {
            manager.wave_cleared();
        }
        return;
    }

    // Fell past the paddle
    if ball.pos.y + ball.radius < -arena.half_height {
        manager.player_died();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Block, GameEvent};
    use crate::Color;

    fn started(seed: u64) -> GameManager {
        let mut manager = GameManager::new(GameConfig::default(), seed);
        manager.start();
        manager
    }

    fn run_seconds(manager: &mut GameManager, input: &TickInput, seconds: f32) {
        let ticks = (seconds / SIM_DT).ceil() as u32;
        for _ in 0..ticks {
            tick(manager, input, SIM_DT);
        }
    }

    #[test]
    fn test_reset_fires_after_delay() {
        let mut manager = started(1);
        let input = TickInput::default();

        run_seconds(&mut manager, &input, 2.9);
        assert!(!manager.ball().active);
        assert!(!manager.is_user_interaction_enabled());

        run_seconds(&mut manager, &input, 0.2);
        assert!(manager.ball().active);
        assert!(manager.is_user_interaction_enabled());
        assert_eq!(manager.lives(), 3);
        assert_eq!(manager.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paddle_ignores_input_while_disabled() {
        let mut manager = started(1);
        let input = TickInput {
            move_axis: 1.0,
            ..Default::default()
        };
        let start_x = manager.paddle().pos.x;
        tick(&mut manager, &input, SIM_DT);
        assert_eq!(manager.paddle().pos.x, start_x);

        manager.reset_game();
        tick(&mut manager, &input, SIM_DT);
        assert!(manager.paddle().pos.x > start_x);
    }

    #[test]
    fn test_tick_pause() {
        let mut manager = started(1);
        manager.reset_game();

        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut manager, &input, SIM_DT);
        assert_eq!(manager.phase(), GamePhase::Paused);

        let frozen = manager.ball().pos;
        tick(&mut manager, &TickInput::default(), SIM_DT);
        assert_eq!(manager.ball().pos, frozen);

        // Unpause
        tick(&mut manager, &input, SIM_DT);
        assert_eq!(manager.phase(), GamePhase::Playing);
        assert_ne!(manager.ball().pos, frozen);
    }

    #[test]
    fn test_pause_holds_reset_timer() {
        let mut manager = started(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut manager, &pause, SIM_DT);
        run_seconds(&mut manager, &TickInput::default(), 5.0);
        assert!(!manager.ball().active);

        tick(&mut manager, &pause, SIM_DT);
        assert_eq!(manager.phase(), GamePhase::Countdown);
        run_seconds(&mut manager, &TickInput::default(), 3.1);
        assert!(manager.ball().active);
    }

    #[test]
    fn test_ball_lost_costs_a_life() {
        let mut manager = started(1);
        manager.reset_game();
        manager.drain_events();

        // Send the ball straight down, away from the paddle
        manager.paddle.pos.x = 80.0;
        manager.ball.pos = Vec2::new(-50.0, -60.0);
        manager.ball.vel = Vec2::new(0.0, -60.0);

        run_seconds(&mut manager, &TickInput::default(), 1.0);

        assert_eq!(manager.lives(), 2);
        assert!(!manager.ball().active);
        assert!(!manager.is_user_interaction_enabled());
        assert_eq!(manager.phase(), GamePhase::Countdown);
        let events = manager.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied { lives_left: 2 }));
    }

    #[test]
    fn test_block_hit_scores_and_bounces() {
        let mut manager = started(1);
        manager.reset_game();
        manager.blocks.clear();
        manager.blocks.push(Block {
            id: 900,
            pos: Vec2::new(0.0, 20.0),
            size: Vec2::new(14.0, 4.0),
            color: Color::WHITE,
            points: 7,
        });
        manager.blocks.push(Block {
            id: 901,
            pos: Vec2::new(60.0, 60.0),
            size: Vec2::new(14.0, 4.0),
            color: Color::WHITE,
            points: 1,
        });
        manager.ball.pos = Vec2::new(0.0, 10.0);
        manager.ball.vel = Vec2::new(0.0, 60.0);
        manager.drain_events();

        run_seconds(&mut manager, &TickInput::default(), 0.3);

        assert_eq!(manager.blocks().len(), 1);
        assert_eq!(manager.score(), 7);
        assert_eq!(manager.hud().score_text, "7");
        assert!(manager.ball().vel.y < 0.0);
        let events = manager.drain_events();
        assert!(events.contains(&GameEvent::BlockDestroyed { id: 900, points: 7 }));
    }

    #[test]
    fn test_wave_cleared_respawns_grid() {
        let mut manager = started(1);
        manager.reset_game();
        manager.blocks.truncate(1);
        let last = manager.blocks()[0].clone();
        manager.ball.pos = last.pos - Vec2::new(0.0, last.size.y / 2.0 + 1.0);
        manager.ball.vel = Vec2::new(0.0, 60.0);

        tick(&mut manager, &TickInput::default(), SIM_DT);

        let (columns, rows) = GameConfig::default().grid.grid_size;
        assert_eq!(manager.blocks().len(), (columns * rows) as usize);
        assert_eq!(manager.score(), last.points as u64);
        assert_eq!(manager.lives(), 3);
        assert!(manager.drain_events().contains(&GameEvent::WaveCleared));
    }

    #[test]
    fn test_ball_stays_in_arena() {
        let mut manager = started(3);
        manager.reset_game();
        let arena = GameConfig::default().arena;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..2400 {
            tick(&mut manager, &input, SIM_DT);
            let ball = manager.ball();
            assert!(ball.pos.x.abs() <= arena.half_width);
            assert!(ball.pos.y <= arena.half_height);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);

        let inputs = [
            TickInput {
                move_axis: 0.5,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
            TickInput {
                move_axis: -1.0,
                ..Default::default()
            },
        ];

        for i in 0..1200 {
            let input = &inputs[(i / 400) % inputs.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }

        assert_eq!(a.time_ticks(), b.time_ticks());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.blocks().len(), b.blocks().len());
        assert_eq!(a.ball().pos, b.ball().pos);
        assert_eq!(a.paddle().pos, b.paddle().pos);
    }
}
