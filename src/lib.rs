//! Flappy City - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, obstacles, difficulty, game state)
//! - `render`: Read-only presentation data derived from simulation state
//! - `tuning`: Data-driven game balance

pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Default screen geometry
pub mod consts {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;
    /// Ground strip height
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Nominal frame rate the tick-based constants were tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
}
