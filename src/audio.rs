//! Audio output through the Web Audio API
//!
//! Every sound is synthesized from oscillators at play time - no samples to load.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Gain applied to the background pad on top of the master volume.
const MUSIC_LEVEL: f32 = 0.09;

/// One-shot sound effects triggered by match events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball returned by either paddle
    PaddleHit,
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// A point was scored on either side
    Score,
    /// Match ended with the player ahead
    MatchWon,
    /// Match ended with the AI ahead
    MatchLost,
}

/// Oscillators backing the looping background pad.
struct PadVoices {
    bass: OscillatorNode,
    pad: OscillatorNode,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    music_enabled: bool,
    music: Option<PadVoices>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Context creation can fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext, audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.7,
            music_enabled: true,
            music: None,
        }
    }

    /// Resume the audio context (browsers suspend it until a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0), applied to SFX and the live pad alike
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
            music
                .gain
                .gain()
                .set_value_at_time(self.master_volume * MUSIC_LEVEL, ctx.current_time())
                .ok();
        }
    }

    /// Enable or disable the background pad; disabling stops it immediately
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if !enabled {
            self.stop_music();
        }
    }

    /// Start the looping background pad if it is enabled and not already playing
    pub fn start_music(&mut self) {
        if !self.music_enabled || self.music.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some(voices) = self.build_pad(ctx) else {
            return;
        };
        let t = ctx.current_time();

        // Slow fade in so entering a match is not abrupt
        voices.gain.gain().set_value_at_time(0.0001, t).ok();
        voices
            .gain
            .gain()
            .linear_ramp_to_value_at_time(self.master_volume * MUSIC_LEVEL, t + 1.2)
            .ok();
        voices.bass.start().ok();
        voices.pad.start().ok();

        self.music = Some(voices);
    }

    /// Fade out and stop the background pad
    pub fn stop_music(&mut self) {
        let Some(music) = self.music.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();

        music
            .gain
            .gain()
            .set_value_at_time(self.master_volume * MUSIC_LEVEL, t)
            .ok();
        music
            .gain
            .gain()
            .linear_ramp_to_value_at_time(0.0001, t + 0.4)
            .ok();
        music.bass.stop_with_when(t + 0.5).ok();
        music.pad.stop_with_when(t + 0.5).ok();
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.master_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
            SoundEffect::WallBounce => self.play_wall_bounce(ctx, vol),
            SoundEffect::Score => self.play_score(ctx, vol),
            SoundEffect::MatchWon => self.play_match_won(ctx, vol),
            SoundEffect::MatchLost => self.play_match_lost(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Two detuned oscillators into one shared gain, left running until stopped
    fn build_pad(&self, ctx: &AudioContext) -> Option<PadVoices> {
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let bass = ctx.create_oscillator().ok()?;
        bass.set_type(OscillatorType::Sine);
        bass.frequency().set_value(55.0);
        bass.connect_with_audio_node(&gain).ok()?;

        // Slightly off the octave so the two voices beat against each other
        let pad = ctx.create_oscillator().ok()?;
        pad.set_type(OscillatorType::Triangle);
        pad.frequency().set_value(110.6);
        pad.connect_with_audio_node(&gain).ok()?;

        Some(PadVoices { bass, pad, gain })
    }

    /// Paddle return - short punchy blip
    fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.09)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.09)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Wall bounce - higher ping
    fn play_wall_bounce(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.07)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Point scored - falling two-tone
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 330.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.22).ok();
            }
        }
    }

    /// Match won - rising arpeggio
    fn play_match_won(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 494.0, 587.0, 784.0].iter().enumerate() {
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Match lost - sad descending line
    fn play_match_lost(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 311.0, 262.0, 196.0].iter().enumerate() {
            let delay = i as f64 * 0.18;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.38).ok();
            }
        }
    }
}
