//! Grid primitives and marker components for the snake game.

use bevy::prelude::*;

use super::SnakeColor;

/// Grid position of a cell on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns the neighbouring cell one step along `direction`.
    pub fn offset(&self, direction: Direction) -> Position {
        Position {
            x: self.x + direction.x,
            y: self.y + direction.y,
        }
    }
}

/// Movement vector of the snake. `y` grows downward.
///
/// `Direction::NONE` means the snake has not started moving yet.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Direction {
    pub x: i32,
    pub y: i32,
}

impl Direction {
    pub const NONE: Direction = Direction { x: 0, y: 0 };
    pub const UP: Direction = Direction { x: 0, y: -1 };
    pub const DOWN: Direction = Direction { x: 0, y: 1 };
    pub const LEFT: Direction = Direction { x: -1, y: 0 };
    pub const RIGHT: Direction = Direction { x: 1, y: 0 };

    pub fn is_none(&self) -> bool {
        *self == Direction::NONE
    }

    /// Whether a turn onto `requested`'s axis is allowed while moving along `self`.
    ///
    /// Vertical requests need `self.y == 0`, horizontal ones need `self.x == 0`,
    /// so neither reversals nor same-axis requests get through.
    pub fn accepts(&self, requested: Direction) -> bool {
        if requested.y != 0 {
            self.y == 0
        } else if requested.x != 0 {
            self.x == 0
        } else {
            false
        }
    }
}

/// A food item on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Food {
    pub position: Position,
    pub color: SnakeColor,
}

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the length display UI element.
#[derive(Component)]
pub struct LengthText;

/// Component to mark the current color indicator.
#[derive(Component)]
pub struct ColorIndicator;

/// Component to mark the game over panel.
#[derive(Component)]
pub struct GameOverUI;

/// Final score line of the game over panel.
#[derive(Component)]
pub struct FinalScoreText;

/// Line of the game over panel saying what ended the game.
#[derive(Component)]
pub struct GameOverReasonText;

/// Final length line of the game over panel.
#[derive(Component)]
pub struct FinalLengthText;
