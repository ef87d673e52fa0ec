//! Game manager
//!
//! Owns lives, score, the paddle, the ball and the brick grid, and
//! sequences deaths and resets. Time-based behavior (the delayed reset) is
//! driven from [`super::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::spawn_blocks;
use super::state::{Ball, Block, GameEvent, GamePhase, Paddle};
use crate::config::GameConfig;
use crate::hud::Hud;

pub struct GameManager {
    config: GameConfig,
    rng: Pcg32,
    pub(crate) paddle: Paddle,
    pub(crate) ball: Ball,
    pub(crate) blocks: Vec<Block>,
    lives: u32,
    score: u64,
    /// Counts down toward the next ball speed-up
    points_to_increase: i32,
    user_interaction_enabled: bool,
    /// Seconds until `reset_game` runs
    pending_reset: Option<f32>,
    pub(crate) phase: GamePhase,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    events: Vec<GameEvent>,
    hud: Hud,
    next_id: u32,
}

impl GameManager {
    /// Create a manager with no lives, no blocks and a parked ball.
    /// Call [`GameManager::start`] to begin.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = &config.player;
        let paddle = Paddle::new(player.initial_paddle_position, player.initial_paddle_size);
        let ball = Ball::new(
            player.initial_ball_position,
            config.ball.radius,
            config.ball.launch_speed,
            config.ball.max_speed,
        );

        Self {
            rng: Pcg32::seed_from_u64(seed),
            paddle,
            ball,
            blocks: Vec::new(),
            lives: 0,
            score: 0,
            points_to_increase: 0,
            user_interaction_enabled: false,
            pending_reset: None,
            phase: GamePhase::Countdown,
            time_ticks: 0,
            events: Vec::new(),
            hud: Hud::new(),
            next_id: 1,
            config,
        }
    }

    /// Spawn the grid and schedule the first reset
    pub fn start(&mut self) {
        self.points_to_increase = self.config.player.speed_increase_points;
        self.ball.set_active(false);
        self.reset_blocks();
        self.schedule_reset();
        log::info!("Game started, first serve in {}s", self.config.reset_delay);
    }

    /// Ball was lost: lose a life, rebuild the grid and schedule a reset.
    ///
    /// At zero lives the next reset refills them to `max_lives`.
    pub fn player_died(&mut self) {
        self.user_interaction_enabled = false;
        self.ball.set_active(false);
        self.paddle.pos = self.config.player.initial_paddle_position;
        self.paddle.size.x = self.config.death_paddle_width;
        self.lives = self.lives.saturating_sub(1);
        self.update_hud();

        self.events.push(GameEvent::PlayerDied {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            log::info!("Game over, final score {}", self.score);
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        } else {
            log::info!("Player died, {} lives left", self.lives);
        }

        self.reset_blocks();
        self.schedule_reset();
    }

    pub fn reset_paddle_and_ball(&mut self) {
        let player = &self.config.player;
        self.paddle.pos = player.initial_paddle_position;
        self.paddle.size = player.initial_paddle_size;
        self.ball.pos = player.initial_ball_position;
    }

    /// Add points and advance the speed-up counter.
    ///
    /// The counter drops by `speed_increase_points` per call regardless of
    /// `points`; once it is at or below zero the next call speeds the ball
    /// up and rewinds it.
    pub fn add_player_score(&mut self, points: u32) {
        self.score += points as u64;

        let player = &self.config.player;
        if self.points_to_increase <= 0 {
            self.points_to_increase = player.speed_increase_points;
            self.ball.add_speed(player.speed_increase_value);
            log::debug!("Ball speed up: {}", self.ball.speed);
            self.events.push(GameEvent::SpeedIncreased {
                speed: self.ball.speed,
            });
        } else {
            self.points_to_increase -= player.speed_increase_points;
        }

        self.update_hud();
    }

    /// Remove every block and spawn a fresh grid
    pub fn reset_blocks(&mut self) {
        self.blocks.clear();

        let next_id = &mut self.next_id;
        self.blocks = spawn_blocks(&self.config.grid, || {
            let id = *next_id;
            *next_id += 1;
            id
        });

        log::debug!("Spawned {} blocks", self.blocks.len());
        self.events.push(GameEvent::BlocksReset {
            count: self.blocks.len(),
        });
    }

    /// Put the ball back in play. Runs when the scheduled reset fires.
    pub fn reset_game(&mut self) {
        self.pending_reset = None;
        self.ball.set_active(true);
        self.reset_paddle_and_ball();

        self.score = 0;
        if self.lives == 0 {
            self.lives = self.config.max_lives;
        }
        self.update_hud();
        self.user_interaction_enabled = true;

        self.ball.launch(&mut self.rng, self.config.ball.launch_spread);
        if self.phase == GamePhase::Countdown {
            self.phase = GamePhase::Playing;
        }

        log::info!("Game reset: {} lives", self.lives);
        self.events.push(GameEvent::GameReset { lives: self.lives });
    }

    pub(crate) fn push_block_destroyed(&mut self, id: u32, points: u32) {
        self.events.push(GameEvent::BlockDestroyed { id, points });
    }

    /// Last block gone: rebuild the grid and re-serve, keeping score and lives
    pub(crate) fn wave_cleared(&mut self) {
        log::info!("Wave cleared at score {}", self.score);
        self.events.push(GameEvent::WaveCleared);
        self.reset_blocks();
        self.reset_paddle_and_ball();
        self.ball.launch(&mut self.rng, self.config.ball.launch_spread);
    }

    /// Advance the pending reset timer; fires `reset_game` on expiry
    pub(crate) fn advance_reset_timer(&mut self, dt: f32) {
        if let Some(remaining) = self.pending_reset.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.reset_game();
            }
        }
    }

    /// Replaces any reset already pending
    fn schedule_reset(&mut self) {
        self.pending_reset = Some(self.config.reset_delay);
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Countdown;
        }
    }

    fn update_hud(&mut self) {
        self.hud.update(self.lives, self.score);
    }

    pub fn is_user_interaction_enabled(&self) -> bool {
        self.user_interaction_enabled
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn points_to_increase(&self) -> i32 {
        self.points_to_increase
    }

    pub fn pending_reset(&self) -> Option<f32> {
        self.pending_reset
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
