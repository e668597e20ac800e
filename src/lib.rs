//! Star Hunter - Math Edition
//!
//! Core modules:
//! - `sim`: Simulation (phases, timer, questions, collisions, scoring)
//! - `session`: Simulation plus its asset and storage collaborators
//! - `renderer`: Backend-agnostic draw list built from the simulation
//! - `assets`: Image/sound collaborator interface and load tracking
//! - `platform`: Browser/native platform abstraction (input, storage, time)
//! - `highscores`: Persisted best score
//! - `settings`: Persisted player preferences
//! - `tuning`: Data-driven game balance

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical arena size (canvas pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Height of the HUD band at the top of the arena
    pub const HUD_HEIGHT: f32 = 100.0;

    /// Session length in seconds
    pub const SESSION_DURATION_SECS: f64 = 90.0;
    /// Mistakes allowed per session
    pub const MAX_LIVES: u32 = 5;
    /// Correct answers needed to win
    pub const WIN_TARGET: u32 = 15;
    /// Victory bonus points per remaining second
    pub const TIME_BONUS_PER_SEC: f64 = 2.0;
    /// Delay between a correct collection and the next question (ms)
    pub const NEXT_QUESTION_DELAY_MS: f64 = 800.0;

    /// Avatar defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 7.0;

    /// Collectible defaults
    pub const STAR_SIZE: f32 = 45.0;
    /// Animation progress added per tick once collected
    pub const STAR_COLLECT_RATE: f32 = 0.08;

    /// Progression
    pub const POINTS_PER_CORRECT: u64 = 10;
    pub const STREAK_FOR_LEVEL_UP: u32 = 3;
    pub const MAX_LEVEL: u32 = 12;
    pub const ANSWERS_PER_QUESTION: usize = 4;

    /// Timer turns red below this many seconds
    pub const LOW_TIME_WARNING_SECS: f64 = 15.0;
}

/// Centre of a box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
