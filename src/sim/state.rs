//! Game state and core simulation types
//!
//! The session owns everything here: avatar, stars, progression, timer,
//! score and lives. Nothing else mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::placement::star_positions;
use super::progression::Progression;
use super::timer::SessionTimer;
use crate::consts::STAR_COLLECT_RATE;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Assets still loading
    Loading,
    /// Title screen, waiting for start
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ran out of time or lives
    GameOver,
    /// Reached the win target
    Victory,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
            GamePhase::Victory => "victory",
        }
    }

    /// Phases from which a start command begins a new session
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            GamePhase::Start | GamePhase::GameOver | GamePhase::Victory
        )
    }
}

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick
    pub speed: f32,
    /// Arena the avatar is confined to
    pub bounds: Vec2,
}

impl Player {
    /// Avatar centred in the arena
    pub fn centered(arena: Vec2, size: f32, speed: f32) -> Self {
        let size = Vec2::splat(size);
        Self {
            pos: (arena - size) * 0.5,
            size,
            speed,
            bounds: arena,
        }
    }

    /// Move by held directions, then clamp inside the arena. Opposing keys
    /// cancel out.
    pub fn update(&mut self, dirs: &HeldDirections) {
        if dirs.left {
            self.pos.x -= self.speed;
        }
        if dirs.right {
            self.pos.x += self.speed;
        }
        if dirs.up {
            self.pos.y -= self.speed;
        }
        if dirs.down {
            self.pos.y += self.speed;
        }
        self.clamp_to_bounds();
    }

    pub fn clamp_to_bounds(&mut self) {
        let max = (self.bounds - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    pub fn bounds_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size)
    }
}

/// How a star was collected; drives its exit animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectKind {
    Correct,
    Wrong,
}

/// An answer target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub base_size: f32,
    /// Answer shown on the star
    pub value: i32,
    pub is_correct: bool,
    /// Set once the avatar touched it
    pub collected: Option<CollectKind>,
    /// Exit animation progress, 0 -> 1
    pub animation_progress: f32,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Star {
    pub fn new(id: u32, pos: Vec2, size: f32, value: i32, is_correct: bool) -> Self {
        Self {
            id,
            pos,
            base_size: size,
            value,
            is_correct,
            collected: None,
            animation_progress: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected.is_some()
    }

    /// Eligible for collision
    pub fn is_active(&self) -> bool {
        !self.is_collected() && self.opacity > 0.3
    }

    /// Advance the exit animation. Returns false once the star should be
    /// removed.
    pub fn update(&mut self) -> bool {
        let Some(kind) = self.collected else {
            return true;
        };

        self.animation_progress = (self.animation_progress + STAR_COLLECT_RATE).min(1.0);
        let p = self.animation_progress;
        match kind {
            CollectKind::Correct => {
                self.scale = 1.0 + p * 0.5;
                self.rotation += 0.3;
            }
            CollectKind::Wrong => {
                self.scale = 1.0 - p * 0.8;
                self.rotation += 0.2;
                // Shake
                self.pos.x += (p * 20.0).sin() * 2.0;
            }
        }
        self.opacity = 1.0 - p;

        p < 1.0
    }

    pub fn collect(&mut self, kind: CollectKind) {
        self.collected = Some(kind);
    }

    pub fn size(&self) -> f32 {
        self.base_size * self.scale
    }

    pub fn bounds_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size()))
    }

    pub fn center(&self) -> Vec2 {
        self.bounds_rect().center()
    }
}

/// Events emitted by the simulation for the session layer (sound, logs,
/// persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    QuestionGenerated { level: u32 },
    AnswerCollected { value: i32, correct: bool, points: u64 },
    LevelUp { level: u32 },
    TimeBonus { points: u64 },
    NewHighScore { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub player: Player,
    /// Active stars in insertion order
    pub stars: Vec<Star>,
    pub progression: Progression,
    pub timer: SessionTimer,
    pub score: u64,
    pub lives: u32,
    /// Best score across sessions
    pub high_score: u64,
    /// This session beat the previous best
    pub new_high_score: bool,
    /// Session-clock time (ms) at which the next question is due
    pub pending_question_at: Option<f64>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session in the loading phase
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let tuning = tuning.sanitized();
        let player = Player::centered(tuning.arena_size(), tuning.player_size, tuning.player_speed);
        Self {
            phase: GamePhase::Loading,
            player,
            stars: Vec::new(),
            progression: Progression::new(),
            timer: SessionTimer::new(tuning.session_duration_secs),
            score: 0,
            lives: tuning.max_lives,
            high_score,
            new_high_score: false,
            pending_question_at: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn arena_size(&self) -> Vec2 {
        self.tuning.arena_size()
    }

    /// Reset score, lives, progression, avatar and stars for a new session
    pub fn reset_session(&mut self, now_ms: f64) {
        self.score = 0;
        self.lives = self.tuning.max_lives;
        self.new_high_score = false;
        self.stars.clear();
        self.pending_question_at = None;
        self.progression.reset();
        self.timer = SessionTimer::new(self.tuning.session_duration_secs);
        self.timer.start(now_ms);
        self.player = Player::centered(
            self.arena_size(),
            self.tuning.player_size,
            self.tuning.player_speed,
        );
    }

    /// Replace the question and its whole star set
    pub fn generate_new_question(&mut self) -> u32 {
        self.stars.clear();

        let question = self.progression.generate_new_question(&mut self.rng).clone();
        let positions = star_positions(
            question.answers.len(),
            self.player.center(),
            self.arena_size(),
            &mut self.rng,
        );

        for (&value, pos) in question.answers.iter().zip(positions) {
            let id = self.next_entity_id();
            let star = Star::new(
                id,
                pos,
                self.tuning.star_size,
                value,
                question.is_correct(value),
            );
            self.stars.push(star);
        }

        question.level
    }

    /// Text of the active question, if any
    pub fn question_text(&self) -> Option<String> {
        self.progression.current.as_ref().map(|q| q.text())
    }

    /// Commit the score as the new best if it beats the previous one
    pub fn commit_high_score(&mut self) -> Option<u64> {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            Some(self.score)
        } else {
            None
        }
    }

    pub fn remaining_secs(&self) -> f64 {
        self.timer.remaining_secs()
    }
}
