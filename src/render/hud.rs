//! HUD text and overlay screens
//!
//! Pure functions of the session; the page or window layer decides how to
//! show them.

use crate::sim::{GamePhase, GameState};

/// Score font size outside the spike flash
pub const SCORE_FONT_PX: u32 = 40;
/// Score font size while the spike flash is showing
pub const SCORE_FLASH_FONT_PX: u32 = 60;

/// How the running score should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreStyle {
    pub font_px: u32,
    pub color: [f32; 4],
}

pub fn score_style(state: &GameState) -> ScoreStyle {
    if state.flash_active() {
        ScoreStyle {
            font_px: SCORE_FLASH_FONT_PX,
            color: [1.0, 0.0, 0.0, 1.0],
        }
    } else {
        ScoreStyle {
            font_px: SCORE_FONT_PX,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Full-screen panel to show over the playfield, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Start screen with its start button
    Start,
    /// Game over screen with the final line and a restart button
    GameOver { summary: String },
}

pub fn overlay(state: &GameState) -> Option<Overlay> {
    match state.phase {
        GamePhase::Ready => Some(Overlay::Start),
        GamePhase::Playing => None,
        GamePhase::GameOver => Some(Overlay::GameOver {
            summary: final_line(state.score, state.best_score),
        }),
    }
}

/// Text shown on the game over screen
pub fn final_line(score: u32, best: u32) -> String {
    format!("Score: {}  |  Best: {}", score, best)
}
