//! Browser asset loading
//!
//! Images load through `HtmlImageElement`, sounds through
//! `HtmlAudioElement`. Every element reports back exactly once (loaded or
//! failed) into shared load state that the session polls each frame.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::{Result, anyhow};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlImageElement};

use super::{AssetSource, AssetTracker, ImageKey, SoundKey};
use crate::audio::AudioManager;

#[derive(Default)]
struct LoadState {
    tracker: AssetTracker,
    images: HashSet<ImageKey>,
    sounds: HashSet<SoundKey>,
    settled: HashSet<&'static str>,
}

impl LoadState {
    /// Record the first outcome for an asset; later callbacks are ignored
    fn settle(&mut self, name: &'static str, outcome: Result<(), String>) -> bool {
        if !self.settled.insert(name) {
            return false;
        }
        match outcome {
            Ok(()) => self.tracker.mark_loaded(name),
            Err(reason) => self.tracker.mark_failed(name, &reason),
        }
        true
    }
}

/// Manifest assets loaded by the browser
pub struct WebAssets {
    state: Rc<RefCell<LoadState>>,
    images: HashMap<ImageKey, HtmlImageElement>,
    sounds: HashMap<SoundKey, HtmlAudioElement>,
    synth: AudioManager,
    volume: f32,
}

impl WebAssets {
    /// Start loading every manifest asset
    pub fn load(volume: f32) -> Self {
        let state = Rc::new(RefCell::new(LoadState::default()));
        let sound_files: Vec<SoundKey> = SoundKey::ALL
            .into_iter()
            .filter(|k| k.path().is_some())
            .collect();
        state
            .borrow_mut()
            .tracker
            .register(ImageKey::ALL.len() + sound_files.len());

        let mut images = HashMap::new();
        for key in ImageKey::ALL {
            match load_image(key, &state) {
                Ok(img) => {
                    images.insert(key, img);
                }
                Err(err) => {
                    state.borrow_mut().settle(key.as_str(), Err(format!("{:#}", err)));
                }
            }
        }

        let mut sounds = HashMap::new();
        for key in sound_files {
            match load_sound(key, volume, &state) {
                Ok(audio) => {
                    sounds.insert(key, audio);
                }
                Err(err) => {
                    state.borrow_mut().settle(key.as_str(), Err(format!("{:#}", err)));
                }
            }
        }

        Self {
            state,
            images,
            sounds,
            synth: AudioManager::new(volume),
            volume,
        }
    }

    /// Unlock audio after a user gesture
    pub fn resume_audio(&self) {
        self.synth.resume();
    }
}

impl AssetSource for WebAssets {
    type Image = HtmlImageElement;

    fn image(&self, key: ImageKey) -> Option<&HtmlImageElement> {
        if self.state.borrow().images.contains(&key) {
            self.images.get(&key)
        } else {
            None
        }
    }

    /// Applies to both files and synthesized sounds
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        for audio in self.sounds.values() {
            audio.set_volume(self.volume as f64);
        }
        self.synth.set_volume(self.volume);
    }

    fn play_sound(&mut self, key: SoundKey) {
        if self.volume <= 0.0 {
            return;
        }

        let loaded = self.state.borrow().sounds.contains(&key);
        let Some(audio) = self.sounds.get(&key).filter(|_| loaded) else {
            self.synth.play(key);
            return;
        };

        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => {
                // Autoplay rejections surface asynchronously; swallow them
                let on_reject = Closure::once(move |err: JsValue| {
                    log::debug!("Could not play sound '{}': {:?}", key, err);
                });
                let _ = promise.catch(&on_reject);
                on_reject.forget();
            }
            Err(err) => log::debug!("Could not play sound '{}': {:?}", key, err),
        }
    }

    fn progress(&self) -> f32 {
        self.state.borrow().tracker.progress()
    }

    fn is_complete(&self) -> bool {
        self.state.borrow().tracker.is_complete()
    }
}

fn load_image(key: ImageKey, state: &Rc<RefCell<LoadState>>) -> Result<HtmlImageElement> {
    let img = HtmlImageElement::new().map_err(|err| anyhow!("Could not create image: {:?}", err))?;

    let on_load = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            let mut state = state.borrow_mut();
            if state.settle(key.as_str(), Ok(())) {
                state.images.insert(key);
            }
        })
    };
    let on_error = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            state
                .borrow_mut()
                .settle(key.as_str(), Err(format!("could not load {}", key.path())));
        })
    };

    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_load.forget();
    on_error.forget();

    img.set_src(key.path());
    Ok(img)
}

fn load_sound(key: SoundKey, volume: f32, state: &Rc<RefCell<LoadState>>) -> Result<HtmlAudioElement> {
    let path = key
        .path()
        .ok_or_else(|| anyhow!("Sound '{}' has no file", key))?;
    let audio = HtmlAudioElement::new_with_src(path)
        .map_err(|err| anyhow!("Could not create audio: {:?}", err))?;
    audio.set_volume(volume.clamp(0.0, 1.0) as f64);
    audio.set_preload("auto");

    let on_ready = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            let mut state = state.borrow_mut();
            if state.settle(key.as_str(), Ok(())) {
                state.sounds.insert(key);
            }
        })
    };
    let on_error = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            state
                .borrow_mut()
                .settle(key.as_str(), Err(format!("could not load {}", path)));
        })
    };

    audio
        .add_event_listener_with_callback("canplaythrough", on_ready.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen for audio: {:?}", err))?;
    audio
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen for audio: {:?}", err))?;
    on_ready.forget();
    on_error.forget();

    audio.load();
    Ok(audio)
}
