//! Game constants for grid size, timing, scoring, colors and layout.

use bevy::prelude::*;

use super::Position;

// Grid dimensions (in cells)
pub const GRID_WIDTH: i32 = 30;
pub const GRID_HEIGHT: i32 = 30;

// Visual settings
pub const CELL_SIZE: f32 = 20.0;
pub const STATUS_BAR_HEIGHT: f32 = 48.0;

// Timing (milliseconds between simulation steps)
pub const INITIAL_STEP_INTERVAL_MS: u64 = 150;
pub const MIN_STEP_INTERVAL_MS: u64 = 80;
pub const STEP_SPEEDUP_MS: u64 = 2;

// Rules
pub const FOOD_COUNT: usize = 5;
pub const POINTS_PER_FOOD: u32 = 10;
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

// Initial positions
pub const INITIAL_SNAKE_POSITION: Position = Position { x: 15, y: 15 };

// Colors
pub const BACKGROUND_COLOR: Color = Color::srgb(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);
pub const GRID_LINE_COLOR: Color = Color::srgb(17.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0);
pub const STATUS_BAR_COLOR: Color = Color::srgb(0.08, 0.08, 0.1);
pub const OVERLAY_TEXT_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
pub const SNAKE_BODY_ALPHA: f32 = 0x90 as f32 / 255.0;

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_GRID: f32 = 0.5;
pub const Z_FOOD: f32 = 1.0;
pub const Z_FOOD_GLOW: f32 = 1.1;
pub const Z_SNAKE: f32 = 2.0;
