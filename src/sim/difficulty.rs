//! Score-driven difficulty curve
//!
//! Pure function of the score. Every positive multiple of the tier size
//! gets a short-lived speed spike; between spikes the multiplier grows
//! linearly with the tier and obstacles spawn more often.

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;

/// Result of evaluating the curve at a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Multiplier applied to the base obstacle speed
    pub multiplier: f32,
    /// Ticks between obstacle spawns
    pub spawn_cadence: u32,
    /// True when `multiplier` is the spike value
    pub spike: bool,
}

/// Difficulty bracket for a score
///
/// A zero `tier_size` is rejected by validation; here it counts as one.
#[inline]
pub fn tier(score: u32, params: &DifficultyTuning) -> u32 {
    score / params.tier_size.max(1)
}

/// Evaluate the curve
pub fn evaluate(score: u32, params: &DifficultyTuning) -> Difficulty {
    let tier = tier(score, params);
    let spike = score > 0 && score % params.tier_size.max(1) == 0;

    let multiplier = if spike {
        params.spike_multiplier
    } else {
        params.base_multiplier + tier as f32 * params.multiplier_per_tier
    };

    let spawn_cadence = params
        .base_cadence
        .saturating_sub(tier.saturating_mul(params.cadence_per_tier))
        .max(params.min_cadence);

    Difficulty {
        multiplier,
        spawn_cadence,
        spike,
    }
}
