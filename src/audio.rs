//! Sound cues
//!
//! The core fires cues and never looks at the result. In the browser the
//! cues are synthesised with the Web Audio API - no external files needed.

use crate::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Gunshot, fired on every hit
    Shoot,
    /// Impact ping on the target
    Hit,
    /// Dry-fire buzzer for a key that matched nothing
    Miss,
}

/// Fire-and-forget sound output
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);

    /// Volume changed in settings
    fn set_volume(&mut self, _volume: Volume) {}
}

/// Plays nothing (native builds, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Master/sfx volume with mute, shared by every backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub master: f32,
    pub sfx: f32,
    pub muted: bool,
}

impl Volume {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master: settings.master_volume.clamp(0.0, 1.0),
            sfx: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundCue, SoundSink, Volume};

    /// Web Audio backed sound sink
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: Volume,
    }

    impl AudioManager {
        pub fn new(volume: Volume) -> Self {
            // May fail outside a secure context; the game just runs silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume }
        }

        /// Create an oscillator wired through a gain node
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

        /// Single tone with an exponential fade
        fn blip(&self, ctx: &AudioContext, osc_type: OscillatorType, freq: f32, secs: f64, level: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + secs)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + secs).ok();
        }

        /// Shot - square crack, sawtooth body, falling thud
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, OscillatorType::Square, 400.0, 0.1, vol * 0.2);
            self.blip(ctx, OscillatorType::Sawtooth, 200.0, 0.15, vol * 0.1);

            let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency().linear_ramp_to_value_at_time(50.0, t + 0.1).ok();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.01, t + 0.1).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Hit - high ping
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, OscillatorType::Sine, 880.0, 0.1, vol * 0.1);
        }

        /// Miss - low buzzer
        fn play_miss(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, OscillatorType::Sawtooth, 100.0, 0.3, vol * 0.2);
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Shoot => self.play_shoot(ctx, vol),
                SoundCue::Hit => self.play_hit(ctx, vol),
                SoundCue::Miss => self.play_miss(ctx, vol),
            }
        }

        fn set_volume(&mut self, volume: Volume) {
            self.volume = volume;
        }
    }
}
