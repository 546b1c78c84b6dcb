//! Gapped obstacles and the field that spawns, scrolls and retires them

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, hits_gapped_column};
use super::difficulty::{self, Difficulty};
use crate::tuning::{DifficultyTuning, ObstacleTuning, Tuning};

/// A vertical barrier with one passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the top segment (usually negative, partly off-screen)
    pub y: f32,
    pub width: f32,
    /// Height of the top segment
    pub top_height: f32,
    /// Height of the gap below the top segment
    pub gap: f32,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// First y of the gap (bottom of the top segment)
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.y + self.top_height
    }

    /// Last y of the gap (top of the bottom segment)
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top() + self.gap
    }

    /// Whether a body touches either solid segment
    pub fn hits(&self, body: &Aabb) -> bool {
        hits_gapped_column(body, self.x, self.width, self.gap_top(), self.gap_bottom())
    }
}

/// What happened to the field during one update
#[derive(Debug, Clone, Default)]
pub struct FieldOutcome {
    /// Obstacles that scrolled fully off the left edge this tick
    pub retired: u32,
    /// The avatar touched a solid segment
    pub collided: bool,
    /// Set when a new difficulty multiplier was applied this tick
    pub difficulty_changed: Option<Difficulty>,
    /// Set when an obstacle spawned this tick
    pub spawned: bool,
}

/// Ordered queue of obstacles, oldest (leftmost) first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: VecDeque<Obstacle>,
    /// Effective speed in pixels per tick
    pub speed: f32,
    /// Last applied difficulty multiplier
    pub multiplier: f32,
    /// Ticks between spawns
    pub spawn_cadence: u32,
    params: ObstacleTuning,
    difficulty: DifficultyTuning,
    spawn_x: f32,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: VecDeque::new(),
            speed: tuning.obstacles.base_speed,
            multiplier: tuning.difficulty.initial_multiplier,
            spawn_cadence: tuning.difficulty.initial_cadence,
            params: tuning.obstacles.clone(),
            difficulty: tuning.difficulty.clone(),
            spawn_x: tuning.screen.width,
        }
    }

    /// Advance one tick of play
    ///
    /// `frames` is the session frame counter used for the spawn cadence,
    /// `score` the score at the start of the tick. Scoring and collision are
    /// reported back rather than applied here.
    pub fn update<R: Rng>(
        &mut self,
        frames: u64,
        score: u32,
        avatar: &Aabb,
        rng: &mut R,
    ) -> FieldOutcome {
        let mut outcome = FieldOutcome::default();

        let target = difficulty::evaluate(score, &self.difficulty);
        if target.multiplier != self.multiplier {
            self.apply(target);
            outcome.difficulty_changed = Some(target);
        }

        if frames % u64::from(self.spawn_cadence.max(1)) == 0 {
            self.spawn(rng);
            outcome.spawned = true;
        }

        let (retired, collided) = self.advance(avatar);
        outcome.retired = retired;
        outcome.collided = collided;
        outcome
    }

    /// Adopt a new multiplier and cadence
    pub fn apply(&mut self, target: Difficulty) {
        self.multiplier = target.multiplier;
        self.speed = self.params.base_speed * target.multiplier;
        self.spawn_cadence = target.spawn_cadence;
        log::debug!(
            "Difficulty: multiplier {:.2}, speed {:.2}, cadence {}{}",
            self.multiplier,
            self.speed,
            self.spawn_cadence,
            if target.spike { " (spike)" } else { "" }
        );
    }

    /// Spawn one obstacle at the right edge with a randomized gap height
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let y = self.params.max_negative_offset * (rng.random::<f32>() + 1.0);
        let obstacle = Obstacle {
            x: self.spawn_x,
            y,
            width: self.params.width,
            top_height: self.params.top_height,
            gap: self.params.gap,
        };
        debug_assert!(obstacle.width > 0.0);
        log::debug!(
            "Spawned obstacle at x={:.1}, gap {:.1}..{:.1}",
            obstacle.x,
            obstacle.gap_top(),
            obstacle.gap_bottom()
        );
        self.obstacles.push_back(obstacle);
    }

    /// Scroll every obstacle, retire those past the left edge and test the avatar
    ///
    /// Returns the number retired and whether the avatar hit anything.
    pub fn advance(&mut self, avatar: &Aabb) -> (u32, bool) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }

        // Uniform motion keeps the queue sorted, so retirees are always at the front
        let mut retired = 0;
        while self.obstacles.front().is_some_and(|o| o.right() <= 0.0) {
            self.obstacles.pop_front();
            retired += 1;
        }

        let collided = self.obstacles.iter().any(|o| o.hits(avatar));
        (retired, collided)
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.speed = self.params.base_speed;
        self.multiplier = self.difficulty.initial_multiplier;
        self.spawn_cadence = self.difficulty.initial_cadence;
    }

    pub fn base_speed(&self) -> f32 {
        self.params.base_speed
    }
}
