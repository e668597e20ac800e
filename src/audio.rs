//! Synthesized sounds using the Web Audio API
//!
//! Used whenever a sound file is missing or has no file at all (the end of
//! session jingles). Each effect is a handful of oscillators with short gain
//! envelopes.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::assets::SoundKey;

/// Procedural sound player
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - synthesized sounds disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume audio context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set volume (0.0 - 1.0); 0 mutes
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play the synthesized version of a sound
    pub fn play(&self, key: SoundKey) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match key {
            SoundKey::Correct => self.play_correct(ctx, vol),
            SoundKey::Wrong => self.play_wrong(ctx, vol),
            SoundKey::Victory => self.play_victory(ctx, vol),
            SoundKey::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short rising arpeggio; `step` seconds between notes
    fn arpeggio(
        &self,
        ctx: &AudioContext,
        vol: f32,
        notes: &[f32],
        step: f64,
        length: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }
    }

    /// Correct answer - bright ding
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        self.arpeggio(
            ctx,
            vol * 0.8,
            &[600.0, 800.0, 1000.0],
            0.08,
            0.15,
            OscillatorType::Sine,
        );
    }

    /// Wrong answer - low falling buzz
    fn play_wrong(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Victory - triumphant fanfare
    fn play_victory(&self, ctx: &AudioContext, vol: f32) {
        self.arpeggio(
            ctx,
            vol,
            &[500.0, 600.0, 700.0, 800.0, 1000.0],
            0.1,
            0.35,
            OscillatorType::Triangle,
        );
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        self.arpeggio(
            ctx,
            vol,
            &[400.0, 350.0, 300.0, 200.0],
            0.2,
            0.3,
            OscillatorType::Sine,
        );
    }
}
