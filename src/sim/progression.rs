//! Question progression: current question, streaks and level advancement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::consts::{MAX_LEVEL, POINTS_PER_CORRECT, STREAK_FOR_LEVEL_UP};

/// Outcome of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: i32,
    pub points: u64,
    /// Set when this answer advanced the level
    pub leveled_up: bool,
}

/// Snapshot of progression counters for the HUD and end screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub level: u32,
    pub correct_streak: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
    /// Percentage 0-100
    pub accuracy: u32,
}

/// Owns the active question and the player's progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub current: Option<Question>,
    pub level: u32,
    pub correct_streak: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            current: None,
            level: 1,
            correct_streak: 0,
            total_correct: 0,
            total_wrong: 0,
        }
    }

    /// Replace the current question with a fresh one at the current level
    pub fn generate_new_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Question {
        self.current.insert(Question::generate(self.level, rng))
    }

    /// Check an answer against the current question and update counters
    pub fn submit_answer(&mut self, answer: i32) -> AnswerResult {
        let (is_correct, correct_answer) = match &self.current {
            Some(q) => (q.is_correct(answer), q.correct_answer),
            None => (false, 0),
        };

        let mut leveled_up = false;
        if is_correct {
            self.total_correct += 1;
            self.correct_streak += 1;
            if self.correct_streak >= STREAK_FOR_LEVEL_UP && self.level < MAX_LEVEL {
                self.level += 1;
                self.correct_streak = 0;
                leveled_up = true;
            }
        } else {
            self.total_wrong += 1;
            self.correct_streak = 0;
        }

        AnswerResult {
            is_correct,
            correct_answer,
            points: if is_correct { POINTS_PER_CORRECT } else { 0 },
            leveled_up,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rounded percentage of correct answers, 0 before any attempt
    pub fn accuracy(&self) -> u32 {
        let total = self.total_correct + self.total_wrong;
        if total == 0 {
            return 0;
        }
        (self.total_correct as f64 / total as f64 * 100.0).round() as u32
    }

    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            level: self.level,
            correct_streak: self.correct_streak,
            total_correct: self.total_correct,
            total_wrong: self.total_wrong,
            accuracy: self.accuracy(),
        }
    }
}
