//! Game events (messages).

use bevy::prelude::*;

use super::{Position, SnakeColor};

/// Message triggered when the snake eats a food of its color.
#[derive(Message)]
pub struct FoodEatenEvent {
    pub position: Position,
    pub color: SnakeColor,
}

/// Message triggered when a game ends.
#[derive(Message)]
pub struct GameOverEvent {
    pub cause: GameOverCause,
    pub score: u32,
    pub length: usize,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    WrongColor(SnakeColor),
}

impl GameOverCause {
    pub fn describe(&self) -> String {
        match self {
            GameOverCause::Wall => "You hit the wall".to_string(),
            GameOverCause::SelfCollision => "You ran into yourself".to_string(),
            GameOverCause::WrongColor(color) => {
                format!("You ate {} food", color.name().to_lowercase())
            }
        }
    }
}
