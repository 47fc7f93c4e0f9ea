//! Procedural sound effects over the Web Audio API
//!
//! Each effect is a short score of oscillator tones, played fire-and-forget.
//! A missing or suspended AudioContext degrades to silence; gameplay never
//! waits on audio.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::settings::Settings;

/// One oscillator note inside an effect's score
struct Tone {
    wave: OscillatorType,
    /// Seconds after the effect starts
    at: f64,
    /// Frequency sweep over the tone's life; equal endpoints hold steady
    freq: (f32, f32),
    /// Peak gain, scaled by the effective volume
    level: f32,
    /// Seconds from peak to silence
    decay: f64,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Heart collected
    Collect,
    /// Target score reached
    Win,
}

impl SoundEffect {
    fn score(self) -> &'static [Tone] {
        match self {
            // Bright little pop, chirping upward
            SoundEffect::Collect => &[Tone {
                wave: OscillatorType::Sine,
                at: 0.0,
                freq: (600.0, 1100.0),
                level: 0.4,
                decay: 0.15,
            }],
            // Four-note ascending fanfare
            SoundEffect::Win => &[
                Tone {
                    wave: OscillatorType::Triangle,
                    at: 0.0,
                    freq: (400.0, 400.0),
                    level: 0.5,
                    decay: 0.4,
                },
                Tone {
                    wave: OscillatorType::Triangle,
                    at: 0.1,
                    freq: (500.0, 500.0),
                    level: 0.5,
                    decay: 0.4,
                },
                Tone {
                    wave: OscillatorType::Triangle,
                    at: 0.2,
                    freq: (600.0, 600.0),
                    level: 0.5,
                    decay: 0.4,
                },
                Tone {
                    wave: OscillatorType::Triangle,
                    at: 0.3,
                    freq: (800.0, 800.0),
                    level: 0.5,
                    decay: 0.4,
                },
            ],
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Adopt persisted volume preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect, fire-and-forget
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let start = ctx.current_time();
        for tone in effect.score() {
            // A tone that fails to schedule is simply dropped
            let _ = schedule_tone(ctx, start, tone, vol);
        }
    }
}

/// Wire oscillator -> gain envelope -> destination and schedule the tone
fn schedule_tone(
    ctx: &AudioContext,
    start: f64,
    tone: &Tone,
    vol: f32,
) -> Result<(), wasm_bindgen::JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(tone.wave);
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let t = start + tone.at;
    let (from, to) = tone.freq;
    osc.frequency().set_value_at_time(from, t)?;
    if to != from {
        // Sweep over roughly the audible part of the envelope
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + tone.decay * 0.7)?;
    }
    gain.gain().set_value_at_time(vol * tone.level, t)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + tone.decay)?;

    osc.start_with_when(t)?;
    osc.stop_with_when(t + tone.decay + 0.05)?;
    Ok(())
}
