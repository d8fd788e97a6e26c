//! Food manager - places colored food on cells the snake does not occupy.

use bevy::prelude::*;
use rand::{Rng, seq::IteratorRandom};

use crate::game::{Food, GameConfig, GameState, Position, SnakeColor};

/// Spawns one food at a random cell that doesn't overlap with the snake.
///
/// Foods may land on other foods. Random picks are retried up to
/// `max_spawn_attempts` times, after which a free cell is chosen directly.
/// Returns `None` only when the snake covers the whole board.
pub fn spawn_food(state: &mut GameState, rng: &mut impl Rng) -> Option<Food> {
    let config = state.config;
    let picked = (0..config.max_spawn_attempts)
        .map(|_| random_cell(&config, rng))
        .find(|position| !state.occupies(*position));

    let position = match picked {
        Some(position) => position,
        None => {
            warn!(
                "no free cell after {} random picks, scanning the board",
                config.max_spawn_attempts
            );
            match free_cell(state, rng) {
                Some(position) => position,
                None => {
                    warn!("board is full, no food spawned");
                    return None;
                }
            }
        }
    };

    let food = Food {
        position,
        color: SnakeColor::random(rng),
    };
    state.foods.push(food);
    Some(food)
}

/// Replaces the food set with `food_count` freshly spawned foods.
pub fn initialize_foods(state: &mut GameState, rng: &mut impl Rng) {
    state.foods.clear();
    for _ in 0..state.config.food_count {
        spawn_food(state, rng);
    }
}

fn random_cell(config: &GameConfig, rng: &mut impl Rng) -> Position {
    Position {
        x: rng.random_range(0..config.grid_width),
        y: rng.random_range(0..config.grid_height),
    }
}

fn free_cell(state: &GameState, rng: &mut impl Rng) -> Option<Position> {
    let config = state.config;
    (0..config.grid_height)
        .flat_map(|y| (0..config.grid_width).map(move |x| Position { x, y }))
        .filter(|position| !state.occupies(*position))
        .choose(rng)
}
