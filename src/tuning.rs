//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON document can retune the game
//! without touching the simulation. Missing fields fall back to the defaults.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Screen and ground geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenTuning {
    pub width: f32,
    pub height: f32,
    /// Height of the ground strip at the bottom of the screen
    pub ground_height: f32,
}

impl Default for ScreenTuning {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl ScreenTuning {
    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Avatar physics and presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarTuning {
    /// Fixed horizontal position of the avatar center
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Magnitude of the upward velocity set by a flap
    pub flap_impulse: f32,
    /// Rotation while falling at or above flap speed (radians)
    pub tilt_down: f32,
    /// Rotation otherwise (radians)
    pub tilt_up: f32,
    /// Idle bob amplitude while Ready
    pub bob_amplitude: f32,
    /// Ticks per radian of idle bob phase
    pub bob_period: f32,
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self {
            x: 50.0,
            width: 34.0,
            height: 24.0,
            gravity: 0.15,
            flap_impulse: 3.8,
            tilt_down: FRAC_PI_4,
            tilt_up: -FRAC_PI_6,
            bob_amplitude: 15.0,
            bob_period: 10.0,
        }
    }
}

/// Obstacle geometry and base speed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub width: f32,
    /// Height of the segment above the gap
    pub top_height: f32,
    /// Vertical size of the passable gap
    pub gap: f32,
    /// Most negative top-segment offset; spawns land in [offset, 2 * offset)
    pub max_negative_offset: f32,
    /// Speed in pixels per tick before the difficulty multiplier
    pub base_speed: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            width: 52.0,
            top_height: 242.0,
            gap: 160.0,
            max_negative_offset: -80.0,
            base_speed: 1.2,
        }
    }
}

/// Difficulty curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Points per tier
    pub tier_size: u32,
    /// Multiplier applied when the score is a positive multiple of `tier_size`
    pub spike_multiplier: f32,
    /// Linear multiplier at tier 0
    pub base_multiplier: f32,
    /// Linear multiplier growth per tier
    pub multiplier_per_tier: f32,
    /// Spawn cadence at tier 0 (ticks between spawns)
    pub base_cadence: u32,
    /// Cadence reduction per tier
    pub cadence_per_tier: u32,
    /// Cadence floor
    pub min_cadence: u32,
    /// Multiplier in effect before the first evaluation of a run
    pub initial_multiplier: f32,
    /// Cadence in effect before the first evaluation of a run
    pub initial_cadence: u32,
    /// Length of the spike flash in ticks
    pub flash_ticks: u32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            tier_size: 10,
            spike_multiplier: 10.5,
            base_multiplier: 2.0,
            multiplier_per_tier: 0.8,
            base_cadence: 120,
            cadence_per_tier: 5,
            min_cadence: 70,
            initial_multiplier: 1.0,
            initial_cadence: 120,
            // 300 ms
            flash_ticks: TICKS_PER_SECOND * 3 / 10,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen: ScreenTuning,
    pub avatar: AvatarTuning,
    pub obstacles: ObstacleTuning,
    pub difficulty: DifficultyTuning,
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(name: &str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("avatar.width", self.avatar.width)?;
        positive("avatar.height", self.avatar.height)?;
        positive("obstacles.width", self.obstacles.width)?;
        positive("obstacles.top_height", self.obstacles.top_height)?;
        positive("obstacles.gap", self.obstacles.gap)?;
        positive("obstacles.base_speed", self.obstacles.base_speed)?;

        if self.screen.ground_height < 0.0 || self.screen.ground_y() < self.avatar.height {
            return Err(TuningError::Invalid(
                "ground line leaves no room for the avatar".into(),
            ));
        }
        if self.obstacles.max_negative_offset >= 0.0 {
            return Err(TuningError::Invalid(
                "obstacles.max_negative_offset must be negative".into(),
            ));
        }

        let d = &self.difficulty;
        if d.tier_size == 0 {
            return Err(TuningError::Invalid("difficulty.tier_size must be non-zero".into()));
        }
        if d.min_cadence == 0 || d.base_cadence == 0 || d.initial_cadence == 0 {
            return Err(TuningError::Invalid("spawn cadences must be non-zero".into()));
        }
        positive("difficulty.base_multiplier", d.base_multiplier)?;
        positive("difficulty.spike_multiplier", d.spike_multiplier)?;
        positive("difficulty.initial_multiplier", d.initial_multiplier)?;
        if d.multiplier_per_tier < 0.0 {
            return Err(TuningError::Invalid(
                "difficulty.multiplier_per_tier must not be negative".into(),
            ));
        }

        Ok(())
    }
}
