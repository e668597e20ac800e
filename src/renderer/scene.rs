//! Frame description built from the game state
//!
//! Painter's order: background, stars, avatar, HUD, phase overlay. Any image
//! the asset source cannot provide is replaced by a plain shape so a failed
//! load never leaves a hole in the frame.

use glam::Vec2;

use super::shapes::{progress_fill, star_points};
use super::{DrawCommand, Text, TextAlign};
use crate::assets::{AssetSource, ImageKey};
use crate::consts::{HUD_HEIGHT, LOW_TIME_WARNING_SECS, POINTS_PER_CORRECT};
use crate::sim::{CollectKind, GamePhase, GameState, Rect, Star, level_color, level_description};

const WHITE: &str = "#fff";
const GOLD: &str = "#FFD700";
const GREEN: &str = "#00FF00";
const RED: &str = "#FF0000";

/// Presentation switches that don't affect the simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    /// Draw stars without spin
    pub reduced_motion: bool,
}

/// Build the draw list for one frame
pub fn build_frame<A: AssetSource>(
    state: &GameState,
    assets: &A,
    options: &SceneOptions,
) -> Vec<DrawCommand> {
    let arena = state.arena_size();
    let mut frame = Vec::with_capacity(48);

    background(&mut frame, arena, assets.has_image(ImageKey::Background));

    match state.phase {
        GamePhase::Loading => loading_overlay(&mut frame, arena, assets.progress()),
        GamePhase::Start => start_screen(&mut frame, state, arena),
        GamePhase::Playing => gameplay(&mut frame, state, assets, options),
        GamePhase::Paused => {
            gameplay(&mut frame, state, assets, options);
            pause_overlay(&mut frame, arena);
        }
        GamePhase::GameOver => game_over_screen(&mut frame, state, arena),
        GamePhase::Victory => victory_screen(&mut frame, state, arena),
    }

    frame
}

fn full(arena: Vec2) -> Rect {
    Rect::from_pos_size(Vec2::ZERO, arena)
}

fn dim(frame: &mut Vec<DrawCommand>, arena: Vec2, color: &'static str) {
    frame.push(DrawCommand::FillRect {
        rect: full(arena),
        color,
    });
}

fn text(frame: &mut Vec<DrawCommand>, text: Text) {
    frame.push(DrawCommand::Text(text));
}

fn background(frame: &mut Vec<DrawCommand>, arena: Vec2, has_image: bool) {
    if has_image {
        frame.push(DrawCommand::Image {
            key: ImageKey::Background,
            rect: full(arena),
            rotation: 0.0,
            alpha: 1.0,
        });
    } else {
        frame.push(DrawCommand::Gradient {
            rect: full(arena),
            top: "#1a1a2e",
            bottom: "#0f0f1e",
        });
    }
}

fn loading_overlay(frame: &mut Vec<DrawCommand>, arena: Vec2, progress: f32) {
    let center = arena * 0.5;
    dim(frame, arena, "rgba(0, 0, 0, 0.8)");
    text(frame, Text::new("Loading...", center, 36.0, WHITE).bold());

    let bar = Rect::new((arena.x - 400.0) * 0.5, center.y + 40.0, 400.0, 30.0);
    frame.push(DrawCommand::StrokeRect {
        rect: bar,
        color: WHITE,
        width: 1.0,
    });
    frame.push(DrawCommand::FillRect {
        rect: progress_fill(&bar, progress),
        color: "#4CAF50",
    });
}

fn start_screen(frame: &mut Vec<DrawCommand>, state: &GameState, arena: Vec2) {
    let cx = arena.x * 0.5;
    dim(frame, arena, "rgba(0, 0, 0, 0.7)");

    text(frame, Text::new("⭐ STAR HUNTER ⭐", Vec2::new(cx, 120.0), 56.0, GOLD).bold());
    text(frame, Text::new("Math Edition", Vec2::new(cx, 160.0), 28.0, "#FFA500").bold());
    text(frame, Text::new("📚 How to Play:", Vec2::new(cx, 230.0), 24.0, WHITE));

    let tuning = &state.tuning;
    let instructions = [
        "1. Solve the math problem shown at the top".to_string(),
        "2. Move with Arrow Keys or WASD".to_string(),
        "3. Collect the star with the correct answer".to_string(),
        "4. Wrong answer = lose 1 life ❤️".to_string(),
        format!("5. Get {} correct answers to WIN!", tuning.win_target),
        String::new(),
        format!("💡 All correct answers = {} points", POINTS_PER_CORRECT),
        format!("⏰ You have {} seconds!", tuning.session_duration_secs.ceil()),
    ];
    for (i, line) in instructions.into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = 270.0 + i as f32 * 30.0;
        text(frame, Text::new(line, Vec2::new(cx, y), 20.0, WHITE));
    }

    text(
        frame,
        Text::new("Press SPACEBAR to Start", Vec2::new(cx, arena.y - 80.0), 32.0, GREEN).bold(),
    );

    if state.high_score > 0 {
        let line = format!("High Score: {}", state.high_score);
        text(frame, Text::new(line, Vec2::new(cx, arena.y - 30.0), 24.0, GOLD).bold());
    }
}

fn gameplay<A: AssetSource>(
    frame: &mut Vec<DrawCommand>,
    state: &GameState,
    assets: &A,
    options: &SceneOptions,
) {
    let star_image = assets.has_image(ImageKey::Star);
    for star in &state.stars {
        draw_star(frame, star, star_image, options);
    }

    let player = state.player.bounds_rect();
    if assets.has_image(ImageKey::Player) {
        frame.push(DrawCommand::Image {
            key: ImageKey::Player,
            rect: player,
            rotation: 0.0,
            alpha: 1.0,
        });
    } else {
        frame.push(DrawCommand::FillRect {
            rect: player,
            color: "#00ff00",
        });
        frame.push(DrawCommand::StrokeRect {
            rect: player,
            color: "#00aa00",
            width: 2.0,
        });
    }

    hud(frame, state);
}

fn draw_star(frame: &mut Vec<DrawCommand>, star: &Star, has_image: bool, options: &SceneOptions) {
    let rect = star.bounds_rect();
    let center = rect.center();
    let size = star.size();
    let rotation = if options.reduced_motion {
        0.0
    } else {
        star.rotation
    };

    if has_image {
        frame.push(DrawCommand::Image {
            key: ImageKey::Star,
            rect,
            rotation,
            alpha: star.opacity,
        });
    } else {
        frame.push(DrawCommand::Polygon {
            points: star_points(center, 5, size * 0.5, size * 0.25, rotation),
            fill: "#FFFF00",
            stroke: GOLD,
            line_width: 2.0,
            alpha: star.opacity,
        });
    }

    match star.collected {
        None => {
            let label = Text::new(star.value.to_string(), center, (size * 0.5).floor(), "#000")
                .bold()
                .middle()
                .alpha(star.opacity);
            text(frame, label);
        }
        // Feedback fades out over the first half of the animation
        Some(kind) if star.animation_progress < 0.5 => {
            let alpha = 1.0 - star.animation_progress * 2.0;
            let mark = center - Vec2::new(0.0, 30.0);
            let caption = mark - Vec2::new(0.0, 25.0);
            let (symbol, symbol_color, note, note_color, note_size) = match kind {
                CollectKind::Correct => ("✓", GREEN, format!("+{}", POINTS_PER_CORRECT), GOLD, 24.0),
                CollectKind::Wrong => ("✗", RED, "Wrong!".to_string(), "#FF6666", 20.0),
            };
            text(frame, Text::new(symbol, mark, 36.0, symbol_color).bold().alpha(alpha));
            text(frame, Text::new(note, caption, note_size, note_color).bold().alpha(alpha));
        }
        Some(_) => {}
    }
}

fn hud(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let width = state.arena_size().x;
    let right = width - 20.0;

    frame.push(DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, width, HUD_HEIGHT),
        color: "rgba(0, 0, 0, 0.7)",
    });

    if let Some(question) = state.question_text() {
        text(frame, Text::new(question, Vec2::new(width * 0.5, 45.0), 36.0, GOLD).bold());
    }

    let level = state.progression.level;
    let level_line = format!("Level {} ({})", level, level_description(level));
    text(
        frame,
        Text::new(level_line, Vec2::new(20.0, 80.0), 20.0, level_color(level))
            .bold()
            .align(TextAlign::Left),
    );

    let hearts = "❤️".repeat(state.lives as usize);
    text(
        frame,
        Text::new(hearts, Vec2::new(20.0, 35.0), 28.0, RED)
            .bold()
            .align(TextAlign::Left),
    );

    let remaining = state.remaining_secs();
    let time_color = if remaining < LOW_TIME_WARNING_SECS {
        RED
    } else {
        WHITE
    };
    let lines = [
        (format!("Score: {}", state.score), 35.0, WHITE),
        (format!("Time: {}s", remaining.ceil()), 65.0, time_color),
        (
            format!(
                "Progress: {}/{}",
                state.progression.total_correct, state.tuning.win_target
            ),
            95.0,
            WHITE,
        ),
    ];
    for (line, y, color) in lines {
        text(
            frame,
            Text::new(line, Vec2::new(right, y), 24.0, color)
                .bold()
                .align(TextAlign::Right),
        );
    }
}

fn pause_overlay(frame: &mut Vec<DrawCommand>, arena: Vec2) {
    let center = arena * 0.5;
    dim(frame, arena, "rgba(0, 0, 0, 0.6)");
    text(
        frame,
        Text::new("PAUSED", center - Vec2::new(0.0, 20.0), 56.0, WHITE).bold(),
    );
    text(
        frame,
        Text::new("Press SPACEBAR to Resume", center + Vec2::new(0.0, 30.0), 24.0, WHITE),
    );
}

fn high_score_line(frame: &mut Vec<DrawCommand>, state: &GameState, cx: f32, cy: f32) {
    if state.new_high_score {
        text(
            frame,
            Text::new("⭐ NEW HIGH SCORE! ⭐", Vec2::new(cx, cy + 120.0), 32.0, GOLD).bold(),
        );
    } else {
        let line = format!("High Score: {}", state.high_score);
        text(frame, Text::new(line, Vec2::new(cx, cy + 110.0), 24.0, GOLD).bold());
    }
}

fn game_over_screen(frame: &mut Vec<DrawCommand>, state: &GameState, arena: Vec2) {
    let (cx, cy) = (arena.x * 0.5, arena.y * 0.5);
    let stats = state.progression.stats();
    dim(frame, arena, "rgba(0, 0, 0, 0.85)");

    text(frame, Text::new("GAME OVER!", Vec2::new(cx, cy - 100.0), 64.0, RED).bold());
    let lines = [
        (format!("Final Score: {}", state.score), cy - 20.0),
        (format!("Correct Answers: {}", stats.total_correct), cy + 20.0),
        (format!("Accuracy: {}%", stats.accuracy), cy + 60.0),
    ];
    for (line, y) in lines {
        text(frame, Text::new(line, Vec2::new(cx, y), 28.0, WHITE));
    }

    high_score_line(frame, state, cx, cy);
    text(
        frame,
        Text::new("Press SPACEBAR to Try Again", Vec2::new(cx, arena.y - 80.0), 28.0, GREEN).bold(),
    );
}

fn victory_screen(frame: &mut Vec<DrawCommand>, state: &GameState, arena: Vec2) {
    let (cx, cy) = (arena.x * 0.5, arena.y * 0.5);
    let stats = state.progression.stats();
    dim(frame, arena, "rgba(0, 0, 0, 0.85)");

    text(frame, Text::new("🎉 VICTORY! 🎉", Vec2::new(cx, cy - 100.0), 64.0, GOLD).bold());
    let lines = [
        (format!("Final Score: {}", state.score), cy - 20.0),
        (format!("Level Reached: {}", stats.level), cy + 20.0),
        (format!("Accuracy: {}%", stats.accuracy), cy + 60.0),
    ];
    for (line, y) in lines {
        text(frame, Text::new(line, Vec2::new(cx, y), 28.0, WHITE));
    }

    high_score_line(frame, state, cx, cy);
    text(
        frame,
        Text::new("Press SPACEBAR to Play Again", Vec2::new(cx, arena.y - 80.0), 28.0, GREEN).bold(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NullAssets, SoundKey};
    use crate::sim::{Command, TickInput, tick};
    use crate::tuning::Tuning;

    const T0: f64 = 1_000.0;

    /// Every image available, loading at a fixed progress
    struct AllImages {
        progress: f32,
    }

    impl AssetSource for AllImages {
        type Image = ();

        fn image(&self, _key: ImageKey) -> Option<&()> {
            Some(&())
        }

        fn play_sound(&mut self, _key: SoundKey) {}

        fn progress(&self) -> f32 {
            self.progress
        }

        fn is_complete(&self) -> bool {
            self.progress >= 1.0
        }
    }

    fn texts(frame: &[DrawCommand]) -> Vec<&Text> {
        frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn find_text<'a>(frame: &'a [DrawCommand], prefix: &str) -> Option<&'a Text> {
        texts(frame)
            .into_iter()
            .find(|t| t.content.starts_with(prefix))
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(99, Tuning::default(), 0);
        let mut events = Vec::new();
        crate::sim::finish_loading(&mut state, &mut events);
        let input = TickInput {
            command: Some(Command::Action),
            ..Default::default()
        };
        tick(&mut state, &input, T0);
        state
    }

    #[test]
    fn test_loading_bar_tracks_progress() {
        let state = GameState::new(1, Tuning::default(), 0);
        let frame = build_frame(&state, &AllImages { progress: 0.25 }, &SceneOptions::default());

        assert!(find_text(&frame, "Loading").is_some());
        let fills: Vec<&Rect> = frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: "#4CAF50" } => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].size.x, 100.0);
    }

    #[test]
    fn test_fallback_shapes_without_images() {
        let state = playing_state();
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());

        assert!(matches!(frame[0], DrawCommand::Gradient { .. }));
        let polygons = frame
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Polygon { .. }))
            .count();
        assert_eq!(polygons, 4);
        assert!(frame.iter().any(|cmd| matches!(
            cmd,
            DrawCommand::FillRect { color: "#00ff00", .. }
        )));
        assert!(!frame.iter().any(|cmd| matches!(cmd, DrawCommand::Image { .. })));
    }

    #[test]
    fn test_images_used_when_available() {
        let state = playing_state();
        let frame = build_frame(&state, &AllImages { progress: 1.0 }, &SceneOptions::default());

        let images: Vec<ImageKey> = frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { key, .. } => Some(*key),
                _ => None,
            })
            .collect();
        assert_eq!(images[0], ImageKey::Background);
        assert_eq!(images.iter().filter(|k| **k == ImageKey::Star).count(), 4);
        assert_eq!(images.last(), Some(&ImageKey::Player));
    }

    #[test]
    fn test_hud_shows_question_and_values() {
        let state = playing_state();
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());

        let question = state.question_text().unwrap();
        assert!(texts(&frame).iter().any(|t| t.content == question));
        assert_eq!(find_text(&frame, "Score:").unwrap().content, "Score: 0");
        assert_eq!(find_text(&frame, "Time:").unwrap().content, "Time: 90s");
        assert_eq!(find_text(&frame, "Progress:").unwrap().content, "Progress: 0/15");
        assert!(find_text(&frame, "Level 1").is_some());

        for star in &state.stars {
            assert!(texts(&frame).iter().any(|t| t.content == star.value.to_string()));
        }
    }

    #[test]
    fn test_timer_turns_red_when_low() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default(), T0 + 70_000.0);
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert_eq!(find_text(&frame, "Time:").unwrap().color, WHITE);

        tick(&mut state, &TickInput::default(), T0 + 80_500.0);
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        let time = find_text(&frame, "Time:").unwrap();
        assert_eq!(time.content, "Time: 10s");
        assert_eq!(time.color, RED);
    }

    #[test]
    fn test_collected_star_shows_feedback_not_value() {
        let mut state = playing_state();
        let idx = state.stars.iter().position(|s| !s.is_correct).unwrap();
        let value = state.stars[idx].value;
        state.stars[idx].collect(CollectKind::Wrong);
        state.stars[idx].update();

        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert!(find_text(&frame, "Wrong!").is_some());
        assert!(find_text(&frame, "✗").is_some());
        // Distractors are distinct, so the value text is gone
        assert!(!texts(&frame).iter().any(|t| t.content == value.to_string()));
    }

    #[test]
    fn test_reduced_motion_draws_unrotated() {
        let mut state = playing_state();
        state.stars[0].rotation = 1.0;
        let frame = build_frame(
            &state,
            &AllImages { progress: 1.0 },
            &SceneOptions {
                reduced_motion: true,
            },
        );
        assert!(frame.iter().all(|cmd| match cmd {
            DrawCommand::Image { rotation, .. } => *rotation == 0.0,
            _ => true,
        }));
    }

    #[test]
    fn test_pause_overlay_on_top_of_game() {
        let mut state = playing_state();
        let input = TickInput {
            command: Some(Command::Pause),
            ..Default::default()
        };
        tick(&mut state, &input, T0 + 100.0);
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert!(find_text(&frame, "Score:").is_some());
        assert_eq!(texts(&frame).last().unwrap().content, "Press SPACEBAR to Resume");
    }

    #[test]
    fn test_start_screen_high_score() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        state.phase = GamePhase::Start;
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert!(find_text(&frame, "High Score").is_none());
        assert!(find_text(&frame, "5. Get 15 correct").is_some());

        state.high_score = 120;
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert_eq!(find_text(&frame, "High Score").unwrap().content, "High Score: 120");
    }

    #[test]
    fn test_game_over_summary() {
        let mut state = playing_state();
        state.score = 30;
        tick(&mut state, &TickInput::default(), T0 + 95_000.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert!(find_text(&frame, "GAME OVER").is_some());
        assert_eq!(find_text(&frame, "Final Score").unwrap().content, "Final Score: 30");
        assert_eq!(find_text(&frame, "Accuracy").unwrap().content, "Accuracy: 0%");
        assert!(find_text(&frame, "⭐ NEW HIGH SCORE").is_some());
    }

    #[test]
    fn test_victory_without_record_shows_best() {
        let mut state = playing_state();
        state.high_score = 10_000;
        state.phase = GamePhase::Victory;
        let frame = build_frame(&state, &NullAssets, &SceneOptions::default());
        assert!(find_text(&frame, "🎉 VICTORY").is_some());
        assert!(find_text(&frame, "Level Reached: 1").is_some());
        assert_eq!(find_text(&frame, "High Score").unwrap().content, "High Score: 10000");
        assert!(find_text(&frame, "⭐ NEW HIGH SCORE").is_none());
    }
}
