//! Session glue between the simulation and its collaborators
//!
//! Owns the `GameState` plus the asset source and key-value store. The
//! simulation reports what happened as `GameEvent`s; this layer turns those
//! into sounds and high score writes. Nothing in here can end a session:
//! asset and storage failures are logged by the collaborators and ignored.

use crate::assets::{AssetSource, SoundKey};
use crate::highscores::HighScore;
use crate::platform::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{
    Command, GameEvent, GamePhase, GameState, TickInput, apply_command, finish_loading, tick,
};

pub struct Session<A: AssetSource, S: KeyValueStore> {
    state: GameState,
    settings: Settings,
    best: HighScore,
    assets: A,
    store: S,
}

impl<A: AssetSource, S: KeyValueStore> Session<A, S> {
    /// Create a session in the loading phase. The stored high score is read
    /// once here.
    pub fn new(seed: u64, settings: Settings, assets: A, store: S) -> Self {
        let best = HighScore::load(&store);
        let state = GameState::new(seed, settings.tuning.clone(), best.score);
        log::info!("Session created with seed {}", seed);
        Self {
            state,
            settings,
            best,
            assets,
            store,
        }
    }

    /// Leave the loading phase once the asset source reports completion
    pub fn poll_loading(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase == GamePhase::Loading && self.assets.is_complete() {
            log::info!("Assets settled ({:.0}%)", self.assets.progress() * 100.0);
            finish_loading(&mut self.state, &mut events);
        }
        events
    }

    /// One frame: loading check, then a simulation tick
    pub fn update(&mut self, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
        let mut events = self.poll_loading();
        events.extend(tick(&mut self.state, input, now_ms));
        self.handle_events(&events);
        events
    }

    /// Apply a command immediately (menu buttons, auto-pause) without
    /// advancing the simulation
    pub fn command(&mut self, command: Command, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        apply_command(&mut self.state, command, now_ms, &mut events);
        self.handle_events(&events);
        events
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::AnswerCollected { correct, .. } => {
                    let key = if correct {
                        SoundKey::Correct
                    } else {
                        SoundKey::Wrong
                    };
                    self.assets.play_sound(key);
                }
                GameEvent::PhaseChanged { to: GamePhase::Victory, .. } => {
                    self.assets.play_sound(SoundKey::Victory);
                }
                GameEvent::PhaseChanged { to: GamePhase::GameOver, .. } => {
                    self.assets.play_sound(SoundKey::GameOver);
                }
                GameEvent::NewHighScore { score } => {
                    if self.best.submit(score) {
                        log::info!("New high score: {}", score);
                        self.best.save(&mut self.store);
                    }
                }
                GameEvent::TimeBonus { points } => {
                    log::info!("Time bonus: {} points", points);
                }
                _ => {}
            }
        }
    }

    /// Replace and persist settings. Volume applies at once; new tuning
    /// applies from the next session and is ignored mid-session.
    pub fn apply_settings(&mut self, settings: Settings) {
        if !matches!(self.state.phase, GamePhase::Playing | GamePhase::Paused) {
            self.state.tuning = settings.tuning.clone().sanitized();
        }
        self.assets.set_volume(settings.effective_volume());
        settings.save(&mut self.store);
        self.settings = settings;
    }

    /// Flip the mute setting; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        let mut settings = self.settings.clone();
        settings.muted = !settings.muted;
        let muted = settings.muted;
        self.apply_settings(settings);
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        muted
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.best.score
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageKey;
    use crate::platform::MemoryStore;
    use crate::platform::storage::tests::BrokenStore;
    use glam::Vec2;

    const T0: f64 = 5_000.0;

    /// Records every sound request and volume change; completes when told to
    #[derive(Default)]
    struct RecordingAssets {
        complete: bool,
        played: Vec<SoundKey>,
        volume: Option<f32>,
    }

    impl AssetSource for RecordingAssets {
        type Image = ();

        fn image(&self, _key: ImageKey) -> Option<&()> {
            None
        }

        fn play_sound(&mut self, key: SoundKey) {
            self.played.push(key);
        }

        fn progress(&self) -> f32 {
            if self.complete { 1.0 } else { 0.5 }
        }

        fn is_complete(&self) -> bool {
            self.complete
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = Some(volume);
        }
    }

    fn loaded_session<S: KeyValueStore>(store: S) -> Session<RecordingAssets, S> {
        let assets = RecordingAssets {
            complete: true,
            ..Default::default()
        };
        let mut session = Session::new(7, Settings::default(), assets, store);
        session.poll_loading();
        session
    }

    fn started<S: KeyValueStore>(store: S) -> Session<RecordingAssets, S> {
        let mut session = loaded_session(store);
        session.command(Command::Action, T0);
        assert_eq!(session.phase(), GamePhase::Playing);
        session
    }

    /// Move one star of the wanted kind under the avatar and every other
    /// active star out of the way
    fn put_star_on_player<S: KeyValueStore>(
        session: &mut Session<RecordingAssets, S>,
        correct: bool,
    ) {
        let target = session.state.player.pos;
        let mut placed = false;
        for star in session.state.stars.iter_mut().filter(|s| s.is_active()) {
            if !placed && star.is_correct == correct {
                star.pos = target;
                placed = true;
            } else {
                star.pos = Vec2::ZERO;
            }
        }
        assert!(placed);
    }

    #[test]
    fn test_stays_loading_until_assets_complete() {
        let mut session = Session::new(
            1,
            Settings::default(),
            RecordingAssets::default(),
            MemoryStore::new(),
        );
        session.update(&TickInput::default(), T0);
        session.command(Command::Action, T0);
        assert_eq!(session.phase(), GamePhase::Loading);

        session.assets_mut().complete = true;
        let events = session.update(&TickInput::default(), T0);
        assert_eq!(session.phase(), GamePhase::Start);
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Loading,
            to: GamePhase::Start,
        }));
    }

    #[test]
    fn test_sounds_follow_collections() {
        let mut session = started(MemoryStore::new());

        put_star_on_player(&mut session, false);
        session.update(&TickInput::default(), T0 + 16.0);
        assert_eq!(session.assets().played, vec![SoundKey::Wrong]);

        put_star_on_player(&mut session, true);
        session.update(&TickInput::default(), T0 + 32.0);
        assert_eq!(session.assets().played, vec![SoundKey::Wrong, SoundKey::Correct]);
    }

    #[test]
    fn test_high_score_loaded_and_saved() {
        let mut store = MemoryStore::new();
        HighScore::new(5).save(&mut store);

        let mut session = started(store);
        assert_eq!(session.high_score(), 5);
        assert_eq!(session.state().high_score, 5);

        put_star_on_player(&mut session, true);
        session.update(&TickInput::default(), T0 + 16.0);
        assert_eq!(session.state().score, 10);

        // Time runs out
        session.update(&TickInput::default(), T0 + 91_000.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score(), 10);
        assert_eq!(HighScore::load(session.store()).score, 10);
        assert_eq!(session.assets().played.last(), Some(&SoundKey::GameOver));
    }

    #[test]
    fn test_broken_storage_never_ends_session() {
        let mut session = started(BrokenStore);
        assert_eq!(session.high_score(), 0);

        put_star_on_player(&mut session, true);
        session.update(&TickInput::default(), T0 + 16.0);
        session.update(&TickInput::default(), T0 + 91_000.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        // The in-memory best still updates
        assert_eq!(session.high_score(), 10);

        session.command(Command::Restart, T0 + 92_000.0);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_victory_plays_jingle() {
        let mut session = started(MemoryStore::new());
        let target = session.settings().tuning.win_target;
        session.state.progression.total_correct = target - 1;

        put_star_on_player(&mut session, true);
        session.update(&TickInput::default(), T0 + 16.0);
        assert_eq!(session.phase(), GamePhase::Victory);
        assert_eq!(
            session.assets().played,
            vec![SoundKey::Correct, SoundKey::Victory]
        );
    }

    #[test]
    fn test_command_does_not_advance_simulation() {
        let mut session = started(MemoryStore::new());
        let before = session.state().player.pos;
        session.command(Command::Pause, T0 + 100.0);
        assert_eq!(session.phase(), GamePhase::Paused);
        assert_eq!(session.state().player.pos, before);
        session.command(Command::Resume, T0 + 200.0);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_settings_apply_between_sessions() {
        let mut session = loaded_session(MemoryStore::new());
        let mut settings = Settings::default();
        settings.tuning.max_lives = 2;
        session.apply_settings(settings.clone());

        session.command(Command::Action, T0);
        assert_eq!(session.state().lives, 2);
        assert_eq!(Settings::load(session.store()), settings);

        // Mid-session changes are stored but not applied
        let mut later = settings.clone();
        later.tuning.max_lives = 9;
        session.apply_settings(later);
        assert_eq!(session.state().tuning.max_lives, 2);
    }

    #[test]
    fn test_toggle_mute_sets_volume_and_persists() {
        let mut session = started(MemoryStore::new());
        let audible = Settings::default().effective_volume();
        assert!(audible > 0.0);

        assert!(session.toggle_mute());
        assert_eq!(session.assets().volume, Some(0.0));
        assert!(Settings::load(session.store()).muted);
        // Muting never touches the running session
        assert_eq!(session.phase(), GamePhase::Playing);

        assert!(!session.toggle_mute());
        assert_eq!(session.assets().volume, Some(audible));
        assert!(!Settings::load(session.store()).muted);
    }
}
