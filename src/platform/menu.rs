//! Optional HTML pause menu
//!
//! The page may provide `#pauseMenu` with three buttons; the menu is shown by
//! adding the `active` class while the game is paused.

use crate::sim::{Command, GamePhase};

pub const PAUSE_MENU_ID: &str = "pauseMenu";
pub const ACTIVE_CLASS: &str = "active";

/// Button element ids and the command each one sends
pub const MENU_BUTTONS: [(&str, Command); 3] = [
    ("resumeBtn", Command::Resume),
    ("restartBtn", Command::Restart),
    ("exitBtn", Command::Exit),
];

pub fn pause_menu_visible(phase: GamePhase) -> bool {
    phase == GamePhase::Paused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_markup_names() {
        assert_eq!(PAUSE_MENU_ID, "pauseMenu");
        assert_eq!(ACTIVE_CLASS, "active");
        let ids: Vec<&str> = MENU_BUTTONS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["resumeBtn", "restartBtn", "exitBtn"]);
        assert_eq!(MENU_BUTTONS[0].1, Command::Resume);
        assert_eq!(MENU_BUTTONS[1].1, Command::Restart);
        assert_eq!(MENU_BUTTONS[2].1, Command::Exit);
    }

    #[test]
    fn test_menu_only_visible_while_paused() {
        assert!(pause_menu_visible(GamePhase::Paused));
        for phase in [
            GamePhase::Loading,
            GamePhase::Start,
            GamePhase::Playing,
            GamePhase::GameOver,
            GamePhase::Victory,
        ] {
            assert!(!pause_menu_visible(phase));
        }
    }
}
