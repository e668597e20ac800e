//! Data-driven game balance
//!
//! Defaults mirror `consts`; a `Tuning` can be loaded as part of `Settings`
//! so rules can be adjusted without touching the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Session length in seconds
    pub session_duration_secs: f64,
    /// Mistakes allowed before game over
    pub max_lives: u32,
    /// Correct answers needed for victory
    pub win_target: u32,
    /// Victory bonus per remaining second
    pub time_bonus_per_sec: f64,
    /// Delay before the next question after a correct answer (ms)
    pub next_question_delay_ms: f64,
    /// Arena width/height
    pub arena_width: f32,
    pub arena_height: f32,
    /// Avatar size and speed (units per tick)
    pub player_size: f32,
    pub player_speed: f32,
    /// Star size
    pub star_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_duration_secs: SESSION_DURATION_SECS,
            max_lives: MAX_LIVES,
            win_target: WIN_TARGET,
            time_bonus_per_sec: TIME_BONUS_PER_SEC,
            next_question_delay_ms: NEXT_QUESTION_DELAY_MS,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            star_size: STAR_SIZE,
        }
    }
}

impl Tuning {
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Clamp out-of-range values so a hand-edited config can't break the game
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.session_duration_secs > 0.0) {
            self.session_duration_secs = defaults.session_duration_secs;
        }
        self.max_lives = self.max_lives.max(1);
        self.win_target = self.win_target.max(1);
        self.time_bonus_per_sec = self.time_bonus_per_sec.max(0.0);
        self.next_question_delay_ms = self.next_question_delay_ms.max(0.0);
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            self.arena_width = defaults.arena_width;
            self.arena_height = defaults.arena_height;
        }
        if !(self.player_size > 0.0) {
            self.player_size = defaults.player_size;
        }
        self.player_size = self
            .player_size
            .min(self.arena_width)
            .min(self.arena_height);
        self.player_speed = self.player_speed.max(0.0);
        if !(self.star_size > 0.0) {
            self.star_size = defaults.star_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.session_duration_secs, 90.0);
        assert_eq!(t.max_lives, 5);
        assert_eq!(t.win_target, 15);
        assert_eq!(t.next_question_delay_ms, 800.0);
        assert_eq!(t.arena_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"max_lives": 3}"#).unwrap();
        assert_eq!(t.max_lives, 3);
        assert_eq!(t.win_target, WIN_TARGET);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let t = Tuning {
            session_duration_secs: -5.0,
            max_lives: 0,
            arena_width: 0.0,
            player_size: 5000.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.session_duration_secs, SESSION_DURATION_SECS);
        assert_eq!(t.max_lives, 1);
        assert_eq!(t.arena_width, ARENA_WIDTH);
        assert_eq!(t.player_size, ARENA_HEIGHT);
    }
}
