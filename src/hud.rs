//! HUD labels
//!
//! Text for the lives and score labels. Front-ends copy these strings into
//! whatever displays them (DOM elements on web, log lines on native).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub lives_text: String,
    pub score_text: String,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, lives: u32, score: u64) {
        self.lives_text = lives.to_string();
        self.score_text = score.to_string();
    }
}
