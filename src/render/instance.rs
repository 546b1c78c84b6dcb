//! Quad instances for 2D rendering
//!
//! The whole scene is flat-colored rectangles, so a renderer only needs one
//! instanced quad draw over the list built here.

use bytemuck::{Pod, Zeroable};

use crate::sim::GameState;
use crate::sim::scenery::{SKYLINE_BASE_OFFSET, WINDOW_SIZE};

/// One colored rectangle, rotated about its center
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    /// Top-left corner in screen pixels
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    /// Radians, clockwise in screen space
    pub rotation: f32,
}

impl Instance {
    pub const fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            pos: [x, y],
            size: [w, h],
            color,
            rotation: 0.0,
        }
    }

    pub const fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const SKY: [f32; 4] = rgb(0x6E, 0xC9, 0xE0);
    pub const SUN: [f32; 4] = rgb(0xFD, 0xB8, 0x13);
    pub const BIRD_SILHOUETTE: [f32; 4] = rgb(0, 0, 0);
    pub const WINDOW_LIT: [f32; 4] = rgb(0xFF, 0xFF, 0x99);
    pub const ROAD: [f32; 4] = rgb(0x55, 0x55, 0x55);
    pub const ROAD_MARKING: [f32; 4] = rgb(0xFF, 0xFF, 0xFF);
    pub const WHEEL: [f32; 4] = rgb(0, 0, 0);
    pub const VERGE: [f32; 4] = rgb(0x4C, 0xAF, 0x50);
    pub const OBSTACLE: [f32; 4] = rgb(0x73, 0xC9, 0x00);
    pub const GROUND: [f32; 4] = rgb(0xDE, 0xD8, 0x95);
    pub const GROUND_GRASS: [f32; 4] = rgb(0x33, 0xCC, 0x33);
    pub const AVATAR_BODY: [f32; 4] = rgb(0xFF, 0xD7, 0x00);
    pub const AVATAR_WING: [f32; 4] = rgb(0xFF, 0xA5, 0x00);
    pub const FLASH: [f32; 4] = rgb(0xFF, 0xFF, 0xFF);
}

/// Build every quad for the current frame, back to front
pub fn build_instances(state: &GameState) -> Vec<Instance> {
    let screen = &state.tuning().screen;
    let (w, h) = (screen.width, screen.height);
    let mut out = Vec::with_capacity(128 + state.field.obstacles.len() * 2);

    // Sky and sun
    out.push(Instance::rect(0.0, 0.0, w, h - SKYLINE_BASE_OFFSET, colors::SKY));
    out.push(Instance::rect(w - 90.0, 30.0, 60.0, 60.0, colors::SUN));

    for bird in &state.scenery.birds {
        // Tail trails behind the flight direction
        let x = if bird.direction > 0.0 {
            bird.x - 10.0
        } else {
            bird.x
        };
        out.push(Instance::rect(x, bird.y - 5.0, 10.0, 10.0, colors::BIRD_SILHOUETTE));
    }

    for building in &state.scenery.buildings {
        let top = h - SKYLINE_BASE_OFFSET - building.height;
        out.push(Instance::rect(
            building.x,
            top,
            building.width,
            building.height,
            building.color,
        ));
        for row in 0..building.rows {
            for column in 0..building.columns {
                if building.lit[row * building.columns + column] {
                    let (x, y) = building.window_origin(column, row, h);
                    out.push(Instance::rect(x, y, WINDOW_SIZE, WINDOW_SIZE, colors::WINDOW_LIT));
                }
            }
        }
    }

    // Road with dashed markings
    out.push(Instance::rect(0.0, h - 120.0, w, 40.0, colors::ROAD));
    let mut x = 0.0;
    while x < w {
        out.push(Instance::rect(x, h - 100.0, 20.0, 5.0, colors::ROAD_MARKING));
        x += 40.0;
    }

    for car in &state.scenery.cars {
        out.push(Instance::rect(car.x, car.y, car.width, 15.0, car.color));
        out.push(Instance::rect(
            car.x + 5.0,
            car.y - 10.0,
            car.width - 10.0,
            10.0,
            car.color,
        ));
        out.push(Instance::rect(car.x + 5.0, car.y + 10.0, 10.0, 10.0, colors::WHEEL));
        out.push(Instance::rect(
            car.x + car.width - 15.0,
            car.y + 10.0,
            10.0,
            10.0,
            colors::WHEEL,
        ));
    }

    out.push(Instance::rect(0.0, h - 80.0, w, 20.0, colors::VERGE));

    for obstacle in &state.field.obstacles {
        out.push(Instance::rect(
            obstacle.x,
            obstacle.y,
            obstacle.width,
            obstacle.top_height,
            colors::OBSTACLE,
        ));
        let bottom = obstacle.gap_bottom();
        out.push(Instance::rect(
            obstacle.x,
            bottom,
            obstacle.width,
            (h - bottom).max(0.0),
            colors::OBSTACLE,
        ));
    }

    let ground_y = screen.ground_y();
    out.push(Instance::rect(0.0, ground_y, w, screen.ground_height, colors::GROUND));
    out.push(Instance::rect(0.0, ground_y, w, 15.0, colors::GROUND_GRASS));

    let avatar = &state.avatar;
    let (half_w, half_h) = (avatar.half.x, avatar.half.y);
    out.push(
        Instance::rect(
            avatar.pos.x - half_w,
            avatar.pos.y - half_h,
            half_w * 2.0,
            half_h * 2.0,
            colors::AVATAR_BODY,
        )
        .rotated(avatar.rotation),
    );
    out.push(
        Instance::rect(
            avatar.pos.x - half_w,
            avatar.pos.y - half_h / 3.0,
            half_w,
            half_h * 2.0 / 3.0,
            colors::AVATAR_WING,
        )
        .rotated(avatar.rotation),
    );

    // Full-screen flash fades out over the spike feedback window
    if state.flash_active() {
        let total = state.tuning().difficulty.flash_ticks.max(1) as f32;
        let mut color = colors::FLASH;
        color[3] = 0.6 * state.flash_ticks as f32 / total;
        out.push(Instance::rect(0.0, 0.0, w, h, color));
    }

    out
}

/// Raw bytes for upload to an instance buffer
pub fn as_bytes(instances: &[Instance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
