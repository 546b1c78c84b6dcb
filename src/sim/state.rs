//! Game session state
//!
//! One aggregate owns every piece of mutable game state: phase, score,
//! frame counter, avatar, obstacles and the seeded RNG streams.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::CollisionKind;
use super::obstacle::{Obstacle, ObstacleField};
use super::scenery::Scenery;
use crate::tuning::{Tuning, TuningError};

/// Stream id for the decorative RNG, kept apart from gameplay randomness
const SCENERY_STREAM: u64 = 0x5CE7_E27;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Avatar idles, no obstacles, waiting for start
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; obstacles and score frozen
    GameOver,
}

/// Something that happened during the most recent tick or input call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    /// An obstacle was cleared; carries the new score
    Scored { score: u32 },
    /// A new speed multiplier took effect
    DifficultyChanged { multiplier: f32, spike: bool },
    Collided(CollisionKind),
    Reset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Highest score reached in this process; never reset
    pub best_score: u32,
    /// Ticks since creation, across all phases
    pub frames: u64,
    pub avatar: Avatar,
    pub field: ObstacleField,
    pub scenery: Scenery,
    /// Remaining ticks of the spike flash
    pub flash_ticks: u32,
    /// Events since the start of the last tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) scenery_rng: Pcg32,
    tuning: Tuning,
}

impl GameState {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// Build a session from tuning that has already passed [`Tuning::validate`]
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(
            tuning.validate().is_ok(),
            "GameState::with_tuning called with invalid tuning"
        );
        Self {
            seed,
            phase: GamePhase::Ready,
            score: 0,
            best_score: 0,
            frames: 0,
            avatar: Avatar::new(&tuning),
            field: ObstacleField::new(&tuning),
            scenery: Scenery::new(&tuning.screen),
            flash_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            scenery_rng: Pcg32::new(seed, SCENERY_STREAM),
            tuning,
        }
    }

    /// Validate `tuning` and build a session from it
    pub fn try_with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_tuning(tuning, seed))
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Ready -> Playing. Ignored in any other phase.
    pub fn on_start(&mut self) {
        if self.phase != GamePhase::Ready {
            return;
        }
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.best_score);
    }

    /// Flap while Playing. Ignored in any other phase.
    pub fn on_flap(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.avatar.flap();
        self.events.push(GameEvent::Flapped);
    }

    /// GameOver -> Ready. Ignored in any other phase.
    pub fn on_reset(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.avatar.reset();
        self.field.reset();
        self.phase = GamePhase::Ready;
        self.events.push(GameEvent::Reset);
        log::info!("Reset to ready");
    }

    /// Keyboard action: starts the run when Ready and flaps in the same press
    pub fn on_action(&mut self) {
        self.on_start();
        self.on_flap();
    }

    /// Playing -> GameOver
    pub(crate) fn game_over(&mut self, kind: CollisionKind) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.best_score = self.best_score.max(self.score);
        self.events.push(GameEvent::Collided(kind));
        debug_assert!(self.best_score >= self.score);
        log::info!(
            "Game over ({:?}) at score {}, best {}",
            kind,
            self.score,
            self.best_score
        );
    }

    /// True while the spike flash is showing
    pub fn flash_active(&self) -> bool {
        self.flash_ticks > 0
    }

    /// True if the speed multiplier changed during the last tick
    pub fn tier_changed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::DifficultyChanged { .. }))
    }

    /// Serializable view for renderers and tooling
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            best_score: self.best_score,
            frames: self.frames,
            avatar: AvatarView {
                x: self.avatar.pos.x,
                y: self.avatar.pos.y,
                rotation: self.avatar.rotation,
                width: self.avatar.half.x * 2.0,
                height: self.avatar.half.y * 2.0,
            },
            obstacles: self.field.obstacles.iter().cloned().collect(),
            multiplier: self.field.multiplier,
            tier_changed: self.tier_changed(),
            flash: self.flash_active(),
        }
    }
}

/// Avatar fields exposed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarView {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

/// Read-only view of the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    pub frames: u64,
    pub avatar: AvatarView,
    pub obstacles: Vec<Obstacle>,
    pub multiplier: f32,
    pub tier_changed: bool,
    pub flash: bool,
}
