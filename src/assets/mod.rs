//! Asset manifest and the collaborator interface the session talks to
//!
//! The session never touches images or audio directly. It asks an
//! `AssetSource` whether an image is available, fires sounds at it, and polls
//! it for load progress. Failed loads count as settled so the game can leave
//! the loading screen with fallback visuals.

use std::fmt;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAssets;

/// Images in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Player,
    Star,
    Background,
}

impl ImageKey {
    pub const ALL: [ImageKey; 3] = [ImageKey::Player, ImageKey::Star, ImageKey::Background];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKey::Player => "player",
            ImageKey::Star => "star",
            ImageKey::Background => "background",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ImageKey::Player => "assets/player.png",
            ImageKey::Star => "assets/star.png",
            ImageKey::Background => "assets/background.png",
        }
    }
}

/// Sounds the session can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKey {
    Correct,
    Wrong,
    Victory,
    GameOver,
}

impl SoundKey {
    pub const ALL: [SoundKey; 4] = [
        SoundKey::Correct,
        SoundKey::Wrong,
        SoundKey::Victory,
        SoundKey::GameOver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKey::Correct => "correct",
            SoundKey::Wrong => "wrong",
            SoundKey::Victory => "victory",
            SoundKey::GameOver => "gameover",
        }
    }

    /// Audio file for this sound. Jingles without a file are always synthesized.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            SoundKey::Correct => Some("assets/correct.mp3"),
            SoundKey::Wrong => Some("assets/wrong.mp3"),
            SoundKey::Victory | SoundKey::GameOver => None,
        }
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrow interface to whatever loads and plays assets
pub trait AssetSource {
    /// Backend image handle
    type Image;

    /// Loaded image, or `None` if it failed or is still pending
    fn image(&self, key: ImageKey) -> Option<&Self::Image>;

    /// Best effort; failures are swallowed by the implementation
    fn play_sound(&mut self, key: SoundKey);

    /// Load progress in [0, 1]
    fn progress(&self) -> f32;

    /// True once every asset has loaded or failed
    fn is_complete(&self) -> bool;

    /// Playback volume in [0, 1]; 0 silences everything
    fn set_volume(&mut self, _volume: f32) {}

    fn has_image(&self, key: ImageKey) -> bool {
        self.image(key).is_some()
    }
}

/// Counts loaded and failed assets against the manifest size
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    total: usize,
    loaded: usize,
    failed: usize,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce assets that are about to start loading
    pub fn register(&mut self, count: usize) {
        self.total += count;
    }

    pub fn mark_loaded(&mut self, name: &str) {
        self.loaded += 1;
        log::debug!("Loaded asset '{}' ({}/{})", name, self.settled(), self.total);
    }

    pub fn mark_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        log::warn!("Failed to load asset '{}': {}", name, reason);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.settled() as f32 / self.total as f32).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.settled() >= self.total
    }
}

/// No images, silent sounds, already complete. Used by the native build and
/// tests; the renderer falls back to plain shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAssets;

impl AssetSource for NullAssets {
    type Image = ();

    fn image(&self, _key: ImageKey) -> Option<&()> {
        None
    }

    fn play_sound(&mut self, _key: SoundKey) {}

    fn progress(&self) -> f32 {
        1.0
    }

    fn is_complete(&self) -> bool {
        true
    }
}
