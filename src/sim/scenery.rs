//! Decorative background movers
//!
//! Birds drifting across the sky, cars on the road and flickering building
//! windows. Advanced every tick regardless of phase and never read by the
//! gameplay code.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::ScreenTuning;

/// Chance that a window is lit on any given tick
pub const WINDOW_LIT_CHANCE: f64 = 0.7;
/// Spacing between window origins
pub const WINDOW_SPACING: f32 = 15.0;
pub const WINDOW_SIZE: f32 = 8.0;
/// Distance from the bottom of the screen to the base of the buildings
pub const SKYLINE_BASE_OFFSET: f32 = 150.0;
/// How far past an edge a bird flies before wrapping around
const BIRD_WRAP_MARGIN: f32 = 20.0;

/// A small bird flying in the background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundBird {
    pub x: f32,
    pub y: f32,
    /// +1 flies right, -1 flies left
    pub direction: f32,
    pub speed: f32,
}

/// A car driving along the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub speed: f32,
    /// Body color (RGBA)
    pub color: [f32; 4],
}

/// A building in the skyline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
    /// Window lit flags, row-major
    pub lit: Vec<bool>,
    pub columns: usize,
    pub rows: usize,
}

impl Building {
    fn new(x: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        let columns = window_count(width - 20.0);
        let rows = window_count(height - 25.0);
        Self {
            x,
            width,
            height,
            color,
            lit: vec![false; columns * rows],
            columns,
            rows,
        }
    }

    /// Top-left corner of window `(column, row)` on a screen of the given height
    pub fn window_origin(&self, column: usize, row: usize, screen_height: f32) -> (f32, f32) {
        let top = screen_height - SKYLINE_BASE_OFFSET - self.height;
        (
            self.x + 10.0 + column as f32 * WINDOW_SPACING,
            top + 15.0 + row as f32 * WINDOW_SPACING,
        )
    }
}

/// Number of windows fitting into a span with the standard spacing
fn window_count(span: f32) -> usize {
    if span <= 0.0 {
        0
    } else {
        (span / WINDOW_SPACING).ceil() as usize
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// All decorative background state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenery {
    pub birds: Vec<BackgroundBird>,
    pub cars: Vec<Car>,
    pub buildings: Vec<Building>,
    screen_width: f32,
}

impl Scenery {
    pub fn new(screen: &ScreenTuning) -> Self {
        let h = screen.height;
        Self {
            birds: vec![
                BackgroundBird {
                    x: 50.0,
                    y: 50.0,
                    direction: 1.0,
                    speed: 0.5,
                },
                BackgroundBird {
                    x: 150.0,
                    y: 90.0,
                    direction: -1.0,
                    speed: 0.3,
                },
                BackgroundBird {
                    x: 250.0,
                    y: 70.0,
                    direction: 1.0,
                    speed: 0.7,
                },
            ],
            cars: vec![
                Car {
                    x: 0.0,
                    y: h - 100.0,
                    width: 40.0,
                    speed: 1.5,
                    color: rgb(255, 0, 0),
                },
                Car {
                    x: 150.0,
                    y: h - 95.0,
                    width: 45.0,
                    speed: 2.2,
                    color: rgb(0, 0, 255),
                },
                Car {
                    x: 300.0,
                    y: h - 105.0,
                    width: 35.0,
                    speed: 1.8,
                    color: rgb(255, 255, 0),
                },
            ],
            buildings: vec![
                Building::new(10.0, 60.0, 120.0, rgb(0x8B, 0x45, 0x13)),
                Building::new(80.0, 50.0, 150.0, rgb(0xA9, 0xA9, 0xA9)),
                Building::new(140.0, 70.0, 180.0, rgb(0x70, 0x80, 0x90)),
                Building::new(220.0, 65.0, 140.0, rgb(0xB8, 0x86, 0x0B)),
                Building::new(295.0, 55.0, 160.0, rgb(0xCD, 0x85, 0x3F)),
            ],
            screen_width: screen.width,
        }
    }

    /// Move birds and cars, re-roll window lights
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let width = self.screen_width;

        for bird in &mut self.birds {
            bird.x += bird.speed * bird.direction;
            if bird.x > width + BIRD_WRAP_MARGIN {
                bird.x = -BIRD_WRAP_MARGIN;
            }
            if bird.x < -BIRD_WRAP_MARGIN {
                bird.x = width + BIRD_WRAP_MARGIN;
            }
        }

        for car in &mut self.cars {
            car.x += car.speed;
            if car.x > width {
                car.x = -car.width;
            }
        }

        for building in &mut self.buildings {
            for lit in &mut building.lit {
                *lit = rng.random_bool(WINDOW_LIT_CHANCE);
            }
        }
    }
}
