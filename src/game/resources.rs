//! Game resources (singleton state).

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::{
    Direction, FOOD_COUNT, Food, GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_POSITION,
    INITIAL_STEP_INTERVAL_MS, MAX_SPAWN_ATTEMPTS, MIN_STEP_INTERVAL_MS, POINTS_PER_FOOD, Position,
    STEP_SPEEDUP_MS, SnakeColor,
};
use crate::food::initialize_foods;

/// Frame ordering: the simulation runs before anything reads the state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Simulate,
    Present,
}

/// Game phase, derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Board and rule settings a game is played with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub start: Position,
    pub start_color: SnakeColor,
    pub food_count: usize,
    pub points_per_food: u32,
    pub initial_step_interval_ms: u64,
    pub min_step_interval_ms: u64,
    pub step_speedup_ms: u64,
    pub max_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            start: INITIAL_SNAKE_POSITION,
            start_color: SnakeColor::default(),
            food_count: FOOD_COUNT,
            points_per_food: POINTS_PER_FOOD,
            initial_step_interval_ms: INITIAL_STEP_INTERVAL_MS,
            min_step_interval_ms: MIN_STEP_INTERVAL_MS,
            step_speedup_ms: STEP_SPEEDUP_MS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl GameConfig {
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.grid_width).contains(&position.x) && (0..self.grid_height).contains(&position.y)
    }
}

/// Main game state resource.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub next_direction: Direction,
    /// The color the snake has to eat next.
    pub color: SnakeColor,
    pub score: u32,
    pub foods: Vec<Food>,
    pub running: bool,
    pub paused: bool,
    pub step_interval_ms: u64,
    pub config: GameConfig,
}

impl GameState {
    /// Builds a fresh game with a full set of foods.
    pub fn new(config: GameConfig, rng: &mut impl rand::Rng) -> Self {
        let mut state = GameState {
            snake: vec![config.start],
            direction: Direction::NONE,
            next_direction: Direction::NONE,
            color: config.start_color,
            score: 0,
            foods: Vec::with_capacity(config.food_count),
            running: true,
            paused: false,
            step_interval_ms: config.initial_step_interval_ms,
            config,
        };
        initialize_foods(&mut state, rng);
        state
    }

    /// Puts the game back to its initial values, keeping the config.
    pub fn reset(&mut self, rng: &mut impl rand::Rng) {
        *self = GameState::new(self.config, rng);
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn phase(&self) -> GamePhase {
        if !self.running {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else if self.direction.is_none() && self.next_direction.is_none() {
            GamePhase::NotStarted
        } else {
            GamePhase::Running
        }
    }

    pub fn occupies(&self, position: Position) -> bool {
        self.snake.iter().any(|segment| segment.collides_with(&position))
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// Shortens the step interval by one speed-up notch, never below the floor.
    pub(crate) fn speed_up(&mut self) {
        self.step_interval_ms = self
            .step_interval_ms
            .saturating_sub(self.config.step_speedup_ms)
            .max(self.config.min_step_interval_ms);
    }

    pub(crate) fn award_food(&mut self) {
        self.score += self.config.points_per_food;
    }
}

/// Random source shared by food placement and color picks.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(StdRng::from_os_rng())
    }
}

/// Time of the last simulation step, measured on the app clock.
#[derive(Resource, Default)]
pub struct StepClock {
    pub last_step: Duration,
}

impl StepClock {
    /// Whether `interval` has passed since the last step at time `now`.
    pub fn is_due(&self, now: Duration, interval: Duration) -> bool {
        now.saturating_sub(self.last_step) >= interval
    }
}
