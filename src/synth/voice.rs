use std::f32::consts::TAU;

use crate::MIN_TIME;

/// How far toward the target frequency a voice moves per sample while gliding.
const GLIDE_COEFF: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Finger down, envelope rising or holding
    Releasing, // Finger lifted, envelope falling to zero
}

/// A single sine voice with a linear attack/release envelope.
///
/// Pitch and loudness follow the finger: `glide` sets new targets and the
/// voice slides toward them sample by sample instead of jumping, so moving
/// a finger never clicks.
pub struct Voice {
    state: VoiceState,
    age: u64,
    sample_rate: f32,
    phase: f32,
    frequency: f32,
    target_frequency: f32,
    amplitude: f32,
    target_amplitude: f32,
    level: f32,
    attack: f32,
    release: f32,
}

impl Voice {
    pub fn new(sample_rate: f32, attack: f32, release: f32) -> Self {
        Self {
            state: VoiceState::Free,
            age: 0,
            sample_rate,
            phase: 0.0,
            frequency: 440.0,
            target_frequency: 440.0,
            amplitude: 0.0,
            target_amplitude: 0.0,
            level: 0.0,
            attack: attack.max(MIN_TIME),
            release: release.max(MIN_TIME),
        }
    }

    pub fn start(&mut self, frequency: f32, amplitude: f32, age: u64) {
        // A stolen voice keeps its phase and level so the handover is smooth
        if self.state == VoiceState::Free {
            self.phase = 0.0;
            self.level = 0.0;
            self.frequency = frequency;
            self.amplitude = amplitude;
        }
        self.target_frequency = frequency;
        self.target_amplitude = amplitude;
        self.state = VoiceState::Active;
        self.age = age;
    }

    pub fn glide(&mut self, frequency: f32, amplitude: f32) {
        if self.state == VoiceState::Active {
            self.target_frequency = frequency;
            self.target_amplitude = amplitude;
        }
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
        }
    }

    /// Cut the voice off without a release tail.
    pub fn stop(&mut self) {
        self.state = VoiceState::Free;
        self.level = 0.0;
    }

    /// Add this voice's output into `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        if self.state == VoiceState::Free {
            return;
        }

        let attack_step = 1.0 / (self.attack * self.sample_rate);
        let release_step = 1.0 / (self.release * self.sample_rate);

        for sample in out.iter_mut() {
            match self.state {
                VoiceState::Active => self.level = (self.level + attack_step).min(1.0),
                VoiceState::Releasing => {
                    self.level -= release_step;
                    if self.level <= 0.0 {
                        self.stop();
                        return;
                    }
                }
                VoiceState::Free => return,
            }

            self.frequency += (self.target_frequency - self.frequency) * GLIDE_COEFF;
            self.amplitude += (self.target_amplitude - self.amplitude) * GLIDE_COEFF;

            *sample += (TAU * self.phase).sin() * self.level * self.amplitude;

            self.phase += self.frequency / self.sample_rate;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}
