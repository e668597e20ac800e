//! Arithmetic question generation
//!
//! Difficulty scales with level: the set of operations widens and the
//! operand range grows. Every question carries one correct answer and three
//! nearby distractors, presented in shuffled order.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::ANSWERS_PER_QUESTION;

/// Distractors per question
pub const WRONG_ANSWER_COUNT: usize = ANSWERS_PER_QUESTION - 1;

/// Attempts before distractor generation is considered broken
const MAX_DISTRACTOR_ATTEMPTS: u32 = 1000;

/// Arithmetic operation of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Symbol shown in the question text
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// Pick an operation for the given level
    pub fn for_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Self {
        match level {
            0..=3 => Operation::Add,
            4..=6 => {
                if rng.random_bool(0.5) {
                    Operation::Add
                } else {
                    Operation::Subtract
                }
            }
            7..=9 => {
                let roll: f64 = rng.random();
                if roll < 0.4 {
                    Operation::Add
                } else if roll < 0.7 {
                    Operation::Subtract
                } else {
                    Operation::Multiply
                }
            }
            _ => {
                let roll: f64 = rng.random();
                if roll < 0.3 {
                    Operation::Add
                } else if roll < 0.5 {
                    Operation::Subtract
                } else if roll < 0.8 {
                    Operation::Multiply
                } else {
                    Operation::Divide
                }
            }
        }
    }
}

/// Inclusive operand range for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub min: i32,
    pub max: i32,
}

impl NumberRange {
    pub fn for_level(level: u32) -> Self {
        let (min, max) = match level {
            0..=2 => (1, 10),
            3..=4 => (1, 20),
            5..=6 => (5, 30),
            7..=8 => (10, 50),
            _ => (10, 100),
        };
        Self { min, max }
    }
}

/// A generated question. Immutable once built; a new one supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub level: u32,
    pub operation: Operation,
    pub num1: i32,
    pub num2: i32,
    pub correct_answer: i32,
    pub wrong_answers: [i32; WRONG_ANSWER_COUNT],
    /// Correct answer plus distractors, shuffled
    pub answers: [i32; ANSWERS_PER_QUESTION],
}

impl Question {
    /// Generate a question for `level` (level 0 is treated as 1)
    pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Self {
        let level = level.max(1);
        let operation = Operation::for_level(level, rng);
        let range = NumberRange::for_level(level);

        let (num1, num2, correct_answer) = match operation {
            Operation::Add => {
                let a = rng.random_range(range.min..=range.max);
                let b = rng.random_range(range.min..=range.max);
                (a, b, a + b)
            }
            Operation::Subtract => {
                let a = rng.random_range(range.min..=range.max);
                // b never exceeds a, so the result is never negative
                let b = rng.random_range(range.min..=a);
                (a, b, a - b)
            }
            Operation::Multiply => {
                let upper = ceil_div(range.max, 3).max(2);
                let a = rng.random_range(2..=upper);
                let b = rng.random_range(2..=upper);
                (a, b, a * b)
            }
            Operation::Divide => {
                let divisor = rng.random_range(2..=12);
                let upper = ceil_div(range.max, divisor).max(2);
                let quotient = rng.random_range(2..=upper);
                (divisor * quotient, divisor, quotient)
            }
        };

        let wrong_answers = generate_wrong_answers(correct_answer, rng);

        let mut answers = [0; ANSWERS_PER_QUESTION];
        answers[0] = correct_answer;
        answers[1..].copy_from_slice(&wrong_answers);
        answers.shuffle(rng);

        Self {
            level,
            operation,
            num1,
            num2,
            correct_answer,
            wrong_answers,
            answers,
        }
    }

    /// Text shown in the HUD, e.g. `7 + 5 = ?`
    pub fn text(&self) -> String {
        format!("{} {} {} = ?", self.num1, self.operation.symbol(), self.num2)
    }

    pub fn is_correct(&self, answer: i32) -> bool {
        answer == self.correct_answer
    }
}

/// Three distinct positive values near `correct`, none equal to it
fn generate_wrong_answers<R: Rng + ?Sized>(
    correct: i32,
    rng: &mut R,
) -> [i32; WRONG_ANSWER_COUNT] {
    let max_offset = ((correct as f64 * 0.3).ceil() as i32).max(5);
    let mut wrong = [0; WRONG_ANSWER_COUNT];
    let mut count = 0;
    let mut attempts = 0;

    while count < WRONG_ANSWER_COUNT && attempts < MAX_DISTRACTOR_ATTEMPTS {
        attempts += 1;
        let offset = rng.random_range(1..=max_offset);
        let candidate = if rng.random_bool(0.5) {
            correct + offset
        } else {
            correct - offset
        };

        if candidate > 0 && candidate != correct && !wrong[..count].contains(&candidate) {
            wrong[count] = candidate;
            count += 1;
        }
    }

    debug_assert!(
        count == WRONG_ANSWER_COUNT,
        "distractor generation stalled for answer {correct}"
    );

    // Release builds stay total: fill upward from the answer
    let mut next = correct.max(0) + 1;
    while count < WRONG_ANSWER_COUNT {
        if !wrong[..count].contains(&next) {
            wrong[count] = next;
            count += 1;
        }
        next += 1;
    }

    wrong
}

#[inline]
fn ceil_div(value: i32, divisor: i32) -> i32 {
    (value + divisor - 1) / divisor
}

/// Short description of a level band
pub fn level_description(level: u32) -> &'static str {
    match level {
        0..=3 => "Easy - Addition",
        4..=6 => "Medium - Add & Subtract",
        7..=9 => "Hard - Multiply",
        _ => "Expert - All Operations",
    }
}

/// HUD colour of a level band
pub fn level_color(level: u32) -> &'static str {
    match level {
        0..=3 => "#4CAF50",
        4..=6 => "#FF9800",
        7..=9 => "#F44336",
        _ => "#9C27B0",
    }
}
