//! Keyboard mapping
//!
//! Arrow keys and WASD move; Space starts, pauses or resumes; Escape pauses;
//! M toggles sound. Single-character keys are matched case-insensitively.

use std::collections::HashSet;

use crate::sim::{Command, HeldDirections};

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Command(Command),
    ToggleMute,
}

/// `a` and `A` are the same key; named keys (`ArrowUp`) are left alone
fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Map a `KeyboardEvent.key` value to an action
pub fn map_key(key: &str) -> Option<KeyAction> {
    let action = match normalize(key).as_str() {
        "ArrowUp" | "w" => KeyAction::Move(Direction::Up),
        "ArrowDown" | "s" => KeyAction::Move(Direction::Down),
        "ArrowLeft" | "a" => KeyAction::Move(Direction::Left),
        "ArrowRight" | "d" => KeyAction::Move(Direction::Right),
        " " => KeyAction::Command(Command::Action),
        "Escape" => KeyAction::Command(Command::Pause),
        "m" => KeyAction::ToggleMute,
        _ => return None,
    };
    Some(action)
}

/// Keys whose browser default (page scrolling) must be suppressed
pub fn prevents_default(key: &str) -> bool {
    matches!(key, " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

/// Tracks held keys between frames
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the one-shot action (command or mute) for
    /// a fresh press; movement keys and auto-repeat yield nothing.
    pub fn key_down(&mut self, key: &str) -> Option<KeyAction> {
        if !self.pressed.insert(normalize(key)) {
            return None;
        }
        map_key(key).filter(|action| !matches!(action, KeyAction::Move(_)))
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&normalize(key));
    }

    /// Forget every held key (focus lost)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Directions currently held
    pub fn held(&self) -> HeldDirections {
        let mut held = HeldDirections::default();
        for key in &self.pressed {
            if let Some(KeyAction::Move(dir)) = map_key(key) {
                match dir {
                    Direction::Up => held.up = true,
                    Direction::Down => held.down = true,
                    Direction::Left => held.left = true,
                    Direction::Right => held.right = true,
                }
            }
        }
        held
    }
}
