/*
Effects Rack
============

Master chain applied after the voices are mixed:

    voices ─→ low-pass ─→ delay (optional) ─→ gain ─→ out

  low-pass   One-pole filter. Cheap, no resonance, gentle 6 dB/oct slope.
             Coefficient from cutoff:  a = 1 - e^(-2π fc / sr)
             Each sample:              z += a * (x - z)

  delay      Feedback delay line. The buffer is sized for the longest
             delay time up front so changing the time knob never allocates.
             Output = dry + mix * delayed; written back = dry + fb * delayed.

  gain       Final level, then hard-clamped to [-1, 1].

The rack is built on the audio thread during startup. Its parameters are
handed to the UI thread (through the startup barrier) so knobs and buttons
can drive them; the rack reads each parameter once per block.
*/

use std::f32::consts::TAU;

use crate::param::{Param, Toggle};

/// Longest delay the rack supports, in seconds.
pub const MAX_DELAY_SECONDS: f32 = 1.0;

/// Handles to every tweakable parameter of the rack.
#[derive(Clone, Debug)]
pub struct FxParams {
    pub cutoff: Param,
    pub gain: Param,
    pub delay_mix: Param,
    pub delay_time: Param,
    pub delay_feedback: Param,
    pub delay_on: Toggle,
}

impl FxParams {
    fn new() -> Self {
        Self {
            cutoff: Param::new("cutoff", 80.0, 12_000.0, 6_000.0),
            gain: Param::new("gain", 0.0, 1.5, 0.8),
            delay_mix: Param::new("mix", 0.0, 1.0, 0.3),
            delay_time: Param::new("time", 0.02, MAX_DELAY_SECONDS, 0.35),
            delay_feedback: Param::new("feedback", 0.0, 0.9, 0.4),
            delay_on: Toggle::new("delay", true),
        }
    }
}

pub struct FxRack {
    params: FxParams,
    sample_rate: f32,
    lowpass_z: f32,
    delay: Vec<f32>,
    write_pos: usize,
}

impl FxRack {
    pub fn new(sample_rate: f32) -> (Self, FxParams) {
        let params = FxParams::new();
        let delay_len = (MAX_DELAY_SECONDS * sample_rate) as usize + 1;
        let rack = Self {
            params: params.clone(),
            sample_rate,
            lowpass_z: 0.0,
            delay: vec![0.0; delay_len],
            write_pos: 0,
        };
        (rack, params)
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        let cutoff = self.params.cutoff.get().min(self.sample_rate * 0.45);
        let a = 1.0 - (-TAU * cutoff / self.sample_rate).exp();
        let gain = self.params.gain.get();
        let delay_on = self.params.delay_on.is_on();
        let mix = self.params.delay_mix.get();
        let feedback = self.params.delay_feedback.get();

        let len = self.delay.len();
        let delay_samples =
            ((self.params.delay_time.get() * self.sample_rate) as usize).clamp(1, len - 1);

        for sample in buffer.iter_mut() {
            self.lowpass_z += a * (*sample - self.lowpass_z);
            let dry = self.lowpass_z;

            let read_pos = (self.write_pos + len - delay_samples) % len;
            let delayed = self.delay[read_pos];
            let wet = if delay_on { dry + mix * delayed } else { dry };

            // Keep feeding the line while bypassed so re-enabling is seamless
            self.delay[self.write_pos] = dry + feedback * delayed;
            self.write_pos = (self.write_pos + 1) % len;

            *sample = (wet * gain).clamp(-1.0, 1.0);
        }
    }

    pub fn reset(&mut self) {
        self.delay.fill(0.0);
        self.write_pos = 0;
        self.lowpass_z = 0.0;
    }
}
