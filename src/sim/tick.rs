//! Per-frame simulation tick
//!
//! The driver calls `tick` once per frame; the simulation counts frames
//! itself and knows nothing about wall-clock time.

use super::collision::CollisionKind;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start button
    pub start: bool,
    /// Pointer activation (flap only)
    pub flap: bool,
    /// Keyboard action (start when Ready, flap when Playing)
    pub action: bool,
    /// Restart button
    pub reset: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// How far below the gap center the autopilot lets the avatar sink before flapping
const AUTOPILOT_SLACK: f32 = 20.0;

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    if input.reset {
        state.on_reset();
    }
    if input.start {
        state.on_start();
    }
    if input.action {
        state.on_action();
    }
    if input.flap {
        state.on_flap();
    }

    // Cosmetic flash reverts on its own
    state.flash_ticks = state.flash_ticks.saturating_sub(1);

    state.scenery.update(&mut state.scenery_rng);

    if let Some(kind) = state.avatar.update(state.frames, state.phase) {
        state.game_over(kind);
    }

    if state.phase == GamePhase::Playing {
        let bounds = state.avatar.bounds();
        let outcome = state
            .field
            .update(state.frames, state.score, &bounds, &mut state.rng);

        if let Some(change) = outcome.difficulty_changed {
            if change.spike {
                state.flash_ticks = state.tuning().difficulty.flash_ticks;
            }
            state.events.push(GameEvent::DifficultyChanged {
                multiplier: change.multiplier,
                spike: change.spike,
            });
        }

        for _ in 0..outcome.retired {
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
        }

        if outcome.collided {
            state.game_over(CollisionKind::Obstacle);
        }
    }

    state.frames += 1;
}

/// Demo AI: start, hold the next gap's center, restart once the avatar has landed
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Ready => input.start = true,
        GamePhase::Playing => {
            let avatar = &state.avatar;
            let left = avatar.bounds().left();
            let target = state
                .field
                .obstacles
                .iter()
                .find(|o| o.right() > left)
                .map(|o| (o.gap_top() + o.gap_bottom()) / 2.0)
                .unwrap_or(state.tuning().screen.height / 2.0);

            if avatar.pos.y > target + AUTOPILOT_SLACK && avatar.vel > 0.0 {
                input.flap = true;
            }
        }
        GamePhase::GameOver => {
            if state.avatar.pos.y >= state.avatar.max_y() {
                input.reset = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;

    fn playing() -> GameState {
        let mut state = GameState::new(12345);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_ready_to_playing() {
        let mut state = GameState::new(12345);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.field.obstacles.is_empty());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_ready_ignores_flap() {
        let mut state = GameState::new(12345);
        for _ in 0..30 {
            let input = TickInput {
                flap: true,
                ..Default::default()
            };
            tick(&mut state, &input);
            assert_eq!(state.avatar.pos.y, state.avatar.idle_y(state.frames - 1));
        }
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.avatar.vel, 0.0);
    }

    #[test]
    fn test_flap_then_one_tick() {
        let mut state = playing();
        state.field.obstacles.clear();
        state.avatar.pos.y = 240.0;
        state.avatar.vel = 0.0;

        let input = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        let gravity = state.avatar.gravity();
        let expected = -state.avatar.flap_impulse() + gravity;
        assert!((state.avatar.vel - expected).abs() < 1e-6);
        assert!((state.avatar.pos.y - (240.0 + expected)).abs() < 1e-4);
    }

    #[test]
    fn test_ground_ends_run_once() {
        let mut state = playing();
        state.field.obstacles.clear();

        let mut ticks = 0;
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 10_000);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .events
                .contains(&GameEvent::Collided(CollisionKind::Ground))
        );

        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
            assert!(state.events.is_empty());
            assert_eq!(state.avatar.pos.y, state.avatar.max_y());
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        // Landed avatar keeps its falling pose
        assert!(state.avatar.vel >= state.avatar.flap_impulse());
        assert_eq!(state.avatar.rotation, state.tuning().avatar.tilt_down);
        assert_eq!(state.snapshot().avatar.rotation, state.tuning().avatar.tilt_down);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = playing();
        state.field.obstacles.clear();
        state.avatar.pos.y = 240.0;
        state.avatar.vel = -state.avatar.gravity();
        // Top segment reaches down to y=300, well below the avatar
        state.field.obstacles.push_back(Obstacle {
            x: 40.0,
            y: 58.0,
            width: 52.0,
            top_height: 242.0,
            gap: 160.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .events
                .contains(&GameEvent::Collided(CollisionKind::Obstacle))
        );
    }

    #[test]
    fn test_passing_through_gap() {
        let mut state = playing();
        state.field.obstacles.clear();
        state.avatar.pos.y = 240.0;
        state.avatar.vel = -state.avatar.gravity();
        // Gap spans 140..300 around the avatar
        state.field.obstacles.push_back(Obstacle {
            x: 40.0,
            y: -102.0,
            width: 52.0,
            top_height: 242.0,
            gap: 160.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_retirement_scores() {
        let mut state = playing();
        state.field.obstacles.clear();
        state.field.obstacles.push_back(Obstacle {
            x: -51.0,
            y: -100.0,
            width: 52.0,
            top_height: 242.0,
            gap: 160.0,
        });
        state.avatar.pos.y = 240.0;
        state.avatar.vel = -state.avatar.gravity();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::Scored { score: 1 }));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spike_arms_flash() {
        let mut state = playing();
        state.field.obstacles.clear();
        state.score = 10;
        state.avatar.pos.y = 240.0;
        state.avatar.vel = -state.avatar.gravity();

        tick(&mut state, &TickInput::default());
        assert!(state.tier_changed());
        assert!(state.flash_active());
        assert_eq!(state.field.multiplier, 10.5);

        let flash = state.tuning().difficulty.flash_ticks;
        for _ in 0..flash {
            state.avatar.pos.y = 240.0;
            state.avatar.vel = -state.avatar.gravity();
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.flash_active());
    }

    #[test]
    fn test_reset_round_trip() {
        let mut state = playing();
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default());
        }
        state.best_score = 7;

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.best_score, 7);
        assert!(state.field.obstacles.is_empty());
        assert_eq!(state.field.multiplier, 1.0);
        assert_eq!(state.field.speed, state.field.base_speed());
        assert_eq!(state.avatar.vel, 0.0);
        assert_eq!(state.avatar.rotation, 0.0);
        // Ready tick already applied the idle bob
        assert_eq!(state.avatar.pos.y, state.avatar.idle_y(state.frames - 1));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.frames, state2.frames);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.best_score, state2.best_score);
        assert_eq!(state1.field.obstacles.len(), state2.field.obstacles.len());
        assert_eq!(state1.avatar.pos, state2.avatar.pos);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = GameState::new(42);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut state, &input);
        }
        assert!(state.best_score > 0 || state.score > 0);
    }
}
