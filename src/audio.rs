//! Looping hover cues, one per hotspot, behind a single global enable flag.
//!
//! The flag is sampled at the moment a cue would start, so toggling it takes
//! effect on the next hover rather than retroactively. A suspended context
//! (autoplay policy) defers playback silently; the first user gesture resumes
//! it.

use crate::constants::{HOVER_CUE_BASE_HZ, HOVER_CUE_GAIN, HOVER_CUE_RAMP_SEC};
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

struct HoverVoice {
    osc_a: web::OscillatorNode,
    osc_b: web::OscillatorNode,
    gain: web::GainNode,
}

pub struct AudioSystem {
    ctx: web::AudioContext,
    master: web::GainNode,
    enabled: bool,
    voices: Vec<Option<HoverVoice>>,
}

impl AudioSystem {
    pub fn new(hotspot_count: usize) -> Result<Self, ()> {
        let ctx = web::AudioContext::new().map_err(|e| {
            log::error!("AudioContext error: {:?}", e);
        })?;
        let master = create_gain(&ctx, 0.8, "Master")?;
        _ = master.connect_with_audio_node(&ctx.destination());
        let mut voices = Vec::with_capacity(hotspot_count);
        voices.resize_with(hotspot_count, || None);
        Ok(Self {
            ctx,
            master,
            enabled: true,
            voices,
        })
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
        log::info!("[audio] enabled={}", self.enabled);
        if !self.enabled {
            self.stop_all();
        }
    }

    /// Wired to the first pointerdown so a suspended context can start.
    pub fn resume_on_gesture(&self) {
        _ = self.ctx.resume();
    }

    /// Start the looping cue for one hotspot. Two slightly detuned sine
    /// oscillators through a ramped gain; pitch varies per hotspot.
    pub fn start_hover(&mut self, index: usize) {
        if !self.enabled || index >= self.voices.len() || self.voices[index].is_some() {
            return;
        }
        if self.ctx.state() == web::AudioContextState::Suspended {
            // Autoplay refused: stay silent, the next gesture resumes us.
            _ = self.ctx.resume();
            return;
        }
        let freq = HOVER_CUE_BASE_HZ * (1.0 + 0.07 * index as f32);
        let Ok(osc_a) = web::OscillatorNode::new(&self.ctx) else {
            return;
        };
        let Ok(osc_b) = web::OscillatorNode::new(&self.ctx) else {
            return;
        };
        osc_a.set_type(web::OscillatorType::Sine);
        osc_b.set_type(web::OscillatorType::Sine);
        osc_a.frequency().set_value(freq);
        osc_b.frequency().set_value(freq * 1.007);
        let Ok(gain) = create_gain(&self.ctx, 0.0, "Hover") else {
            return;
        };
        let t0 = self.ctx.current_time();
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(HOVER_CUE_GAIN, t0 + HOVER_CUE_RAMP_SEC);
        _ = osc_a.connect_with_audio_node(&gain);
        _ = osc_b.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.master);
        _ = osc_a.start();
        _ = osc_b.start();
        self.voices[index] = Some(HoverVoice { osc_a, osc_b, gain });
    }

    pub fn stop_hover(&mut self, index: usize) {
        let Some(voice) = self.voices.get_mut(index).and_then(|v| v.take()) else {
            return;
        };
        let t0 = self.ctx.current_time();
        let t_end = t0 + HOVER_CUE_RAMP_SEC;
        _ = voice.gain.gain().linear_ramp_to_value_at_time(0.0, t_end);
        _ = voice.osc_a.stop_with_when(t_end + 0.01);
        _ = voice.osc_b.stop_with_when(t_end + 0.01);
    }

    pub fn stop_all(&mut self) {
        for i in 0..self.voices.len() {
            self.stop_hover(i);
        }
    }
}
