//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall-clock milliseconds)
//! - Input events (key names to directions and commands)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - The animation frame loop and the optional HTML pause menu

pub mod frame;
pub mod input;
pub mod menu;
pub mod storage;
pub mod time;

pub use frame::FrameLoop;
pub use input::{Direction, KeyAction, KeyboardState, map_key, prevents_default};
pub use storage::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use menu::{ACTIVE_CLASS, MENU_BUTTONS, PAUSE_MENU_ID, pause_menu_visible};
pub use time::{clock_seed, now_ms};
