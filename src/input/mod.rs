//! Input handling - maps keys to commands and applies them to the game state.

use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use rand::Rng;

use crate::game::{Direction, GameRng, GameState};

/// A key the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Restart,
}

impl Key {
    /// Maps a key name such as `"ArrowUp"`, `"w"` or `" "`. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Key::Up),
            "arrowdown" | "s" => Some(Key::Down),
            "arrowleft" | "a" => Some(Key::Left),
            "arrowright" | "d" => Some(Key::Right),
            " " | "space" => Some(Key::Pause),
            "r" => Some(Key::Restart),
            _ => None,
        }
    }

    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Key::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Key::Down),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
            KeyCode::Space => Some(Key::Pause),
            KeyCode::KeyR => Some(Key::Restart),
            _ => None,
        }
    }

    fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::UP),
            Key::Down => Some(Direction::DOWN),
            Key::Left => Some(Direction::LEFT),
            Key::Right => Some(Direction::RIGHT),
            Key::Pause | Key::Restart => None,
        }
    }
}

/// What a key press did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    Turned(Direction),
    Paused(bool),
    Restarted,
}

/// Applies one key press to the game.
///
/// After game over only restart is honored, while paused only the pause
/// toggle. Turns go through the reversal gate on the active direction.
pub fn handle_input(state: &mut GameState, key: Key, rng: &mut impl Rng) -> Option<InputEffect> {
    if !state.running {
        if key == Key::Restart {
            state.reset(rng);
            return Some(InputEffect::Restarted);
        }
        return None;
    }

    if state.paused {
        if key == Key::Pause {
            state.paused = false;
            return Some(InputEffect::Paused(false));
        }
        return None;
    }

    match key {
        Key::Pause => {
            state.paused = true;
            Some(InputEffect::Paused(true))
        }
        Key::Restart => {
            state.reset(rng);
            Some(InputEffect::Restarted)
        }
        _ => {
            let requested = key.direction()?;
            if state.direction.accepts(requested) {
                state.next_direction = requested;
                Some(InputEffect::Turned(requested))
            } else {
                None
            }
        }
    }
}

/// System to feed key presses into the game in the order they arrived.
///
/// Auto-repeat presses are skipped so holding space does not flicker the pause.
pub fn read_keyboard(
    mut keyboard_reader: MessageReader<KeyboardInput>,
    mut game: ResMut<GameState>,
    mut rng: ResMut<GameRng>,
) {
    for event in keyboard_reader.read() {
        if event.state != ButtonState::Pressed || event.repeat {
            continue;
        }
        let Some(key) = Key::from_key_code(event.key_code) else {
            continue;
        };
        match handle_input(&mut game, key, &mut rng.0) {
            Some(InputEffect::Restarted) => info!("Game restarted"),
            Some(InputEffect::Paused(paused)) => debug!("Paused: {}", paused),
            Some(InputEffect::Turned(direction)) => debug!("Turning {:?}", direction),
            None => {}
        }
    }
}
