use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::movement::Direction;

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
}

impl KeyCode {
    /// Accepts runtime key names (`"Up"`, `"Enter"`) as well as DOM
    /// `KeyboardEvent.key` values (`"ArrowUp"`, `" "`).
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(key) = parse_named_key(name) {
            return Some(key);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                Some(Self::Character(ch.to_ascii_uppercase()))
            }
            _ => None,
        }
    }
}

fn parse_named_key(name: &str) -> Option<KeyCode> {
    use NamedKey::*;
    let key = match name {
        "Space" | " " => Space,
        "Enter" | "Return" => Enter,
        "Left" | "ArrowLeft" => Left,
        "Right" | "ArrowRight" => Right,
        "Up" | "ArrowUp" => Up,
        "Down" | "ArrowDown" => Down,
        "Escape" | "Esc" => Escape,
        _ => return None,
    };
    Some(KeyCode::Named(key))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Space,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// Discrete request understood by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Start,
    Restart,
}

/// Arrows and WASD move, Enter or Space start, R restarts.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    use NamedKey::*;
    let command = match key {
        KeyCode::Named(Up) | KeyCode::Character('W') => Command::Move(Direction::Up),
        KeyCode::Named(Down) | KeyCode::Character('S') => Command::Move(Direction::Down),
        KeyCode::Named(Left) | KeyCode::Character('A') => Command::Move(Direction::Left),
        KeyCode::Named(Right) | KeyCode::Character('D') => Command::Move(Direction::Right),
        KeyCode::Named(Enter) | KeyCode::Named(Space) => Command::Start,
        KeyCode::Character('R') => Command::Restart,
        _ => return None,
    };
    Some(command)
}

/// Key presses waiting to be handled, delivered one at a time. Platform
/// event handlers push from their callbacks; the game loop pops.
#[derive(Debug, Default)]
pub struct InputQueue {
    pressed: Mutex<VecDeque<KeyCode>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&self, key: KeyCode) {
        self.pressed.lock().push_back(key);
    }

    /// Pops presses until one maps to a command. Unrecognised keys are
    /// discarded.
    pub fn next_command(&self) -> Option<Command> {
        let mut pressed = self.pressed.lock();
        while let Some(key) = pressed.pop_front() {
            if let Some(command) = command_for_key(key) {
                return Some(command);
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.lock().is_empty()
    }
}
