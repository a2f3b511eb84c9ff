//! Audio system using Web Audio API
//!
//! Procedurally generated feedback sounds - no external files needed!

use web_sys::{
    AudioContext, BiquadFilterNode, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Letter or space accepted
    Correct,
    /// Wrong letter
    Incorrect,
}

impl SoundEffect {
    /// Sound for a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Correct { .. } => Some(SoundEffect::Correct),
            GameEvent::Incorrect { .. } => Some(SoundEffect::Incorrect),
            GameEvent::WordCompleted { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Correct => self.play_spray(ctx, vol),
            SoundEffect::Incorrect => self.play_buzz(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        gain: &GainNode,
    ) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(gain).ok()?;
        Some(osc)
    }

    fn create_filter(
        &self,
        ctx: &AudioContext,
        filter_type: BiquadFilterType,
        freq: f32,
        t: f64,
    ) -> Option<BiquadFilterNode> {
        let filter = ctx.create_biquad_filter().ok()?;
        filter.set_type(filter_type);
        filter.frequency().set_value_at_time(freq, t).ok()?;
        Some(filter)
    }

    /// Correct - one second of filtered white noise, like a paint spray
    fn play_spray(&self, ctx: &AudioContext, vol: f32) {
        const DURATION: f64 = 1.0;
        let t = ctx.current_time();
        let rate = ctx.sample_rate();
        let frames = (rate as f64 * DURATION) as u32;

        let Ok(buffer) = ctx.create_buffer(1, frames, rate) else {
            return;
        };
        let mut noise: Vec<f32> = (0..frames)
            .map(|_| (js_sys::Math::random() * 2.0 - 1.0) as f32)
            .collect();
        if buffer.copy_to_channel(&mut noise, 0).is_err() {
            return;
        }

        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        source.set_buffer(Some(&buffer));

        let Some(hiss) = self.create_filter(ctx, BiquadFilterType::Highpass, 10_000.0, t) else {
            return;
        };
        hiss.q().set_value_at_time(2.0, t).ok();
        let Some(body) = self.create_filter(ctx, BiquadFilterType::Lowpass, 1_000.0, t) else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        let peak = vol * 2.0;
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(peak, t + 0.02).ok();
        gain.gain().set_value_at_time(peak, t + 0.08).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, t + DURATION).ok();

        let routed = source.connect_with_audio_node(&hiss).is_ok()
            && hiss.connect_with_audio_node(&body).is_ok()
            && body.connect_with_audio_node(&gain).is_ok()
            && gain.connect_with_audio_node(&ctx.destination()).is_ok();
        if !routed {
            return;
        }

        source.start_with_when(t).ok();
        source.stop_with_when(t + DURATION).ok();
    }

    /// Incorrect - harsh buzz from two detuned oscillators
    fn play_buzz(&self, ctx: &AudioContext, vol: f32) {
        let Ok(gain) = ctx.create_gain() else { return };
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.015, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.25).ok();

        for (freq, osc_type) in [
            (150.0, OscillatorType::Square),
            (160.0, OscillatorType::Sawtooth),
        ] {
            if let Some(osc) = self.create_osc(ctx, freq, osc_type, &gain) {
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }
    }
}
