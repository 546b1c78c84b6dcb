//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in screen order (oldest first)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod scenery;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Aabb, CollisionKind, hits_gapped_column};
pub use difficulty::{Difficulty, evaluate};
pub use obstacle::{FieldOutcome, Obstacle, ObstacleField};
pub use scenery::Scenery;
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
