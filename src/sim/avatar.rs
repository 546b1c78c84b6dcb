//! The player-controlled avatar
//!
//! Falls under a constant per-tick gravity, kicks upward on flap and is kept
//! between the ceiling and the ground line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionKind};
use super::state::GamePhase;
use crate::tuning::{AvatarTuning, Tuning};

/// The avatar entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Center position (x never changes)
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is down)
    pub vel: f32,
    /// Presentational tilt in radians
    pub rotation: f32,
    /// Half width and half height of the bounding box
    pub half: Vec2,
    params: AvatarTuning,
    home_y: f32,
    ground_y: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        let params = tuning.avatar.clone();
        let home_y = tuning.screen.height / 2.0;
        Self {
            pos: Vec2::new(params.x, home_y),
            vel: 0.0,
            rotation: 0.0,
            half: Vec2::new(params.width / 2.0, params.height / 2.0),
            params,
            home_y,
            ground_y: tuning.screen.ground_y(),
        }
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }

    /// Lowest allowed center y (resting on the ground)
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.ground_y - self.half.y
    }

    /// Highest allowed center y (touching the ceiling)
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.half.y
    }

    /// Idle bob height for a given frame count
    pub fn idle_y(&self, frames: u64) -> f32 {
        let phase = frames as f32 / self.params.bob_period;
        (self.home_y + phase.sin() * self.params.bob_amplitude)
            .clamp(self.min_y(), self.max_y())
    }

    /// Advance one tick
    ///
    /// Returns `Some(CollisionKind::Ground)` the tick the avatar reaches the
    /// ground while `Playing`. In `GameOver` the avatar keeps falling and stays
    /// pinned to the ground, without signalling again.
    pub fn update(&mut self, frames: u64, phase: GamePhase) -> Option<CollisionKind> {
        if phase == GamePhase::Ready {
            self.pos.y = self.idle_y(frames);
            return None;
        }

        self.vel += self.params.gravity;
        self.pos.y += self.vel;

        self.rotation = if self.vel >= self.params.flap_impulse {
            self.params.tilt_down
        } else {
            self.params.tilt_up
        };

        let mut signal = None;

        if self.pos.y + self.half.y >= self.ground_y {
            self.pos.y = self.max_y();
            if phase == GamePhase::Playing {
                signal = Some(CollisionKind::Ground);
            }
        }

        // Soft ceiling
        if self.pos.y - self.half.y <= 0.0 {
            self.pos.y = self.min_y();
            self.vel = 0.0;
        }

        debug_assert!(self.pos.y >= self.min_y() && self.pos.y <= self.max_y());
        signal
    }

    /// Instantaneous upward kick; overwrites the current velocity
    pub fn flap(&mut self) {
        self.vel = -self.params.flap_impulse;
    }

    pub fn reset(&mut self) {
        self.vel = 0.0;
        self.pos = Vec2::new(self.params.x, self.home_y);
        self.rotation = 0.0;
    }

    pub fn flap_impulse(&self) -> f32 {
        self.params.flap_impulse
    }

    pub fn gravity(&self) -> f32 {
        self.params.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn avatar() -> Avatar {
        Avatar::new(&Tuning::default())
    }

    #[test]
    fn test_idle_bob_ignores_velocity() {
        let mut a = avatar();
        let mut b = avatar();
        b.vel = 42.0;
        b.pos.y = 10.0;

        for frames in [0u64, 7, 31, 500] {
            a.update(frames, GamePhase::Ready);
            b.update(frames, GamePhase::Ready);
            assert_eq!(a.pos.y, b.pos.y);
            assert_eq!(a.pos.y, a.idle_y(frames));
        }
        assert_eq!(a.idle_y(0), 240.0);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut a = avatar();
        a.vel = 9.0;
        a.flap();
        assert_eq!(a.vel, -3.8);
        a.vel = -1.0;
        a.flap();
        assert_eq!(a.vel, -3.8);
    }

    #[test]
    fn test_flap_then_gravity() {
        let mut a = avatar();
        let start_y = a.pos.y;
        a.flap();
        let signal = a.update(0, GamePhase::Playing);
        assert!(signal.is_none());
        let expected_vel = -3.8 + 0.15;
        assert!((a.vel - expected_vel).abs() < 1e-6);
        assert!((a.pos.y - (start_y + expected_vel)).abs() < 1e-4);
        assert_eq!(a.rotation, a.params.tilt_up);
    }

    #[test]
    fn test_rotation_tilts_down_when_falling_fast() {
        let mut a = avatar();
        a.vel = 3.8;
        a.update(0, GamePhase::Playing);
        assert_eq!(a.rotation, a.params.tilt_down);
    }

    #[test]
    fn test_ceiling_zeroes_velocity() {
        let mut a = avatar();
        a.pos.y = a.min_y() + 1.0;
        a.vel = -3.8;
        let signal = a.update(0, GamePhase::Playing);
        assert!(signal.is_none());
        assert_eq!(a.pos.y, a.min_y());
        assert_eq!(a.vel, 0.0);
    }

    #[test]
    fn test_ground_signals_only_while_playing() {
        let mut a = avatar();
        a.pos.y = a.max_y() - 0.5;
        a.vel = 2.0;
        assert_eq!(a.update(0, GamePhase::Playing), Some(CollisionKind::Ground));
        assert_eq!(a.pos.y, a.max_y());

        // Still on the ground, but the run is already over
        assert_eq!(a.update(1, GamePhase::GameOver), None);
        assert_eq!(a.pos.y, a.max_y());
    }

    #[test]
    fn test_ground_keeps_falling_velocity() {
        let mut a = avatar();
        a.pos.y = a.max_y() - 0.5;
        a.vel = 2.0;
        assert_eq!(a.update(0, GamePhase::Playing), Some(CollisionKind::Ground));
        assert!((a.vel - 2.15).abs() < 1e-6);

        for frames in 1..=20 {
            assert_eq!(a.update(frames, GamePhase::GameOver), None);
        }
        assert_eq!(a.pos.y, a.max_y());
        assert!(a.vel >= a.flap_impulse());
        assert_eq!(a.rotation, a.params.tilt_down);
    }

    #[test]
    fn test_reset() {
        let mut a = avatar();
        a.vel = 5.0;
        a.pos.y = 400.0;
        a.rotation = 1.0;
        a.reset();
        assert_eq!(a.vel, 0.0);
        assert_eq!(a.pos, Vec2::new(50.0, 240.0));
        assert_eq!(a.rotation, 0.0);
    }

    proptest! {
        #[test]
        fn prop_playing_stays_in_bounds(
            start in 12.0f32..388.0,
            vel in -20.0f32..20.0,
            flaps in proptest::collection::vec(any::<bool>(), 1..200),
        ) {
            let mut a = avatar();
            a.pos.y = start;
            a.vel = vel;
            for (i, flap) in flaps.into_iter().enumerate() {
                if flap {
                    a.flap();
                }
                a.update(i as u64, GamePhase::Playing);
                prop_assert!(a.pos.y >= a.min_y());
                prop_assert!(a.pos.y <= a.max_y());
            }
        }

        #[test]
        fn prop_idle_is_pure(frames in 0u64..100_000, vel in -50.0f32..50.0) {
            let mut a = avatar();
            a.vel = vel;
            a.update(frames, GamePhase::Ready);
            prop_assert_eq!(a.pos.y, avatar().idle_y(frames));
        }
    }
}
