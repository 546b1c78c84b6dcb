//! Presentation data
//!
//! Read-only: nothing here mutates the simulation. Renderers consume the
//! quad list and HUD state after each tick.

pub mod hud;
pub mod instance;

pub use hud::{Overlay, ScoreStyle, overlay, score_style};
pub use instance::{Instance, build_instances};
