//! Simulation module
//!
//! All gameplay logic lives here:
//! - Wall-clock timestamps only enter through `tick`
//! - RNG is owned by the session state
//! - Stable iteration order (star insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod progression;
pub mod question;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, aabb_overlap};
pub use placement::star_positions;
pub use progression::{AnswerResult, ProgressStats, Progression};
pub use question::{Operation, Question, level_color, level_description};
pub use state::{
    CollectKind, GameEvent, GamePhase, GameState, HeldDirections, Player, Star,
};
pub use tick::{
    Command, TickInput, apply_command, exit_to_menu, finish_loading, pause_game, resume_game,
    start_game, tick,
};
pub use timer::SessionTimer;
