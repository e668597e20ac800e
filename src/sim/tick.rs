//! Per-frame simulation tick and phase transitions
//!
//! The harness calls `tick` once per animation frame with a wall-clock
//! timestamp. Commands are applied first in any phase; the simulation itself
//! only advances while playing.

use serde::{Deserialize, Serialize};

use super::collision::aabb_overlap;
use super::state::{CollectKind, GameEvent, GamePhase, GameState, HeldDirections};
use super::timer::SessionTimer;

/// Discrete commands from keys or menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Space: start, pause or resume depending on phase
    Action,
    /// Escape: pause while playing
    Pause,
    /// Pause menu resume button
    Resume,
    /// Restart from the pause menu or an end screen
    Restart,
    /// Back to the title screen
    Exit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: HeldDirections,
    pub command: Option<Command>,
}

/// Advance the session by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(command) = input.command {
        apply_command(state, command, now_ms, &mut events);
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Timer
    state.timer.update(now_ms);
    if state.timer.is_expired() {
        end_game(state, GamePhase::GameOver, false, &mut events);
        return events;
    }

    // Deferred next question, measured on the pause-compensated clock
    if let Some(due) = state.pending_question_at {
        if state.timer.elapsed_ms(now_ms) >= due {
            state.pending_question_at = None;
            let level = state.generate_new_question();
            events.push(GameEvent::QuestionGenerated { level });
        }
    }

    state.player.update(&input.held);

    state.stars.retain_mut(|star| star.update());

    check_collisions(state, now_ms, &mut events);

    // Reaching the target earns the time bonus, but losing the last life in
    // the same tick still ends in game over
    let won = state.progression.total_correct >= state.tuning.win_target;
    if state.lives == 0 {
        end_game(state, GamePhase::GameOver, won, &mut events);
    } else if won {
        end_game(state, GamePhase::Victory, true, &mut events);
    }

    events
}

/// Resolve avatar/star overlaps in star insertion order
fn check_collisions(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.bounds_rect();

    for star in state.stars.iter_mut() {
        // Collected stars keep animating in place but never count twice
        if !star.is_active() || !aabb_overlap(&player_rect, &star.bounds_rect()) {
            continue;
        }

        let result = state.progression.submit_answer(star.value);
        events.push(GameEvent::AnswerCollected {
            value: star.value,
            correct: result.is_correct,
            points: result.points,
        });

        if result.is_correct {
            star.collect(CollectKind::Correct);
            state.score += result.points;
            let due = state.timer.elapsed_ms(now_ms) + state.tuning.next_question_delay_ms;
            state.pending_question_at = Some(due);
            if result.leveled_up {
                log::info!("Level up! Now level {}", state.progression.level);
                events.push(GameEvent::LevelUp {
                    level: state.progression.level,
                });
            }
        } else {
            star.collect(CollectKind::Wrong);
            state.lives = state.lives.saturating_sub(1);
        }
    }
}

/// Apply a command according to the current phase
pub fn apply_command(
    state: &mut GameState,
    command: Command,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    match (command, state.phase) {
        (Command::Action, phase) if phase.can_start() => start_game(state, now_ms, events),
        (Command::Action | Command::Pause, GamePhase::Playing) => pause_game(state, now_ms, events),
        (Command::Action | Command::Resume, GamePhase::Paused) => {
            resume_game(state, now_ms, events)
        }
        (Command::Restart, GamePhase::Paused) => start_game(state, now_ms, events),
        (Command::Restart, phase) if phase.can_start() => start_game(state, now_ms, events),
        (Command::Exit, GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory) => {
            exit_to_menu(state, events)
        }
        _ => {}
    }
}

/// Leave the loading phase once assets have settled
pub fn finish_loading(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::Loading {
        set_phase(state, GamePhase::Start, events);
    }
}

/// Begin a fresh session
pub fn start_game(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    state.reset_session(now_ms);
    set_phase(state, GamePhase::Playing, events);
    let level = state.generate_new_question();
    events.push(GameEvent::QuestionGenerated { level });
}

/// Pause; a no-op unless playing
pub fn pause_game(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.timer.pause(now_ms);
    set_phase(state, GamePhase::Paused, events);
}

/// Resume; a no-op unless paused
pub fn resume_game(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Paused {
        return;
    }
    state.timer.resume(now_ms);
    set_phase(state, GamePhase::Playing, events);
}

/// Return to the title screen, dropping the star set and any pending question
pub fn exit_to_menu(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.stars.clear();
    state.pending_question_at = None;
    state.timer = SessionTimer::new(state.tuning.session_duration_secs);
    set_phase(state, GamePhase::Start, events);
}

fn end_game(
    state: &mut GameState,
    outcome: GamePhase,
    time_bonus: bool,
    events: &mut Vec<GameEvent>,
) {
    state.pending_question_at = None;

    if time_bonus {
        let bonus = (state.timer.remaining_secs() * state.tuning.time_bonus_per_sec).floor() as u64;
        state.score += bonus;
        events.push(GameEvent::TimeBonus { points: bonus });
    }

    set_phase(state, outcome, events);

    if let Some(score) = state.commit_high_score() {
        events.push(GameEvent::NewHighScore { score });
    }
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::info!("Phase {} -> {}", from.as_str(), to.as_str());
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}
