use std::sync::Arc;

use crate::{
    touch::{ContactRegistry, EntityRef},
    MAX_BLOCK_SIZE,
};

use super::{
    fx::{FxParams, FxRack},
    message::{MessageReceiver, SynthMessage},
    slots::{SlotState, VoiceSlots},
    voice::{Voice, VoiceState},
    VoiceId,
};

/// Audio-thread half of the reference synth.
pub struct TouchSynth<R: MessageReceiver> {
    voices: Vec<Voice>,
    rx: R,
    slots: Arc<VoiceSlots>,
    registry: Arc<ContactRegistry>,
    fx: FxRack,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<R: MessageReceiver> TouchSynth<R> {
    /// Build the voices and effects rack. Call this on the audio thread; the
    /// returned parameters are what the UI side waits for.
    pub fn new(
        sample_rate: f32,
        attack: f32,
        release: f32,
        rx: R,
        slots: Arc<VoiceSlots>,
        registry: Arc<ContactRegistry>,
    ) -> (Self, FxParams) {
        let voices = (0..slots.len())
            .map(|_| Voice::new(sample_rate, attack, release))
            .collect();
        let (fx, params) = FxRack::new(sample_rate);

        let synth = Self {
            voices,
            rx,
            slots,
            registry,
            fx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        };
        (synth, params)
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn {
                    voice,
                    frequency,
                    amplitude,
                } => {
                    let age = self.frame_counter;
                    if let Some(v) = self.voices.get_mut(voice.index()) {
                        v.start(frequency, amplitude, age);
                    }
                }
                SynthMessage::Glide {
                    voice,
                    frequency,
                    amplitude,
                } => {
                    if let Some(v) = self.voices.get_mut(voice.index()) {
                        v.glide(frequency, amplitude);
                    }
                }
                SynthMessage::NoteOff { voice } => {
                    if let Some(v) = self.voices.get_mut(voice.index()) {
                        v.release();
                    }
                }
                SynthMessage::StopAll => {
                    for v in &mut self.voices {
                        v.stop();
                    }
                }
            }
        }

        self.release_orphans();

        // Mix voices
        out.fill(0.0);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            for voice in &mut self.voices {
                if voice.is_active() {
                    let temp = &mut self.temp_buffer[..chunk.len()];
                    temp.fill(0.0);
                    voice.render(temp);

                    for (o, v) in chunk.iter_mut().zip(temp.iter()) {
                        *o += v;
                    }
                }
            }
            self.fx.process(chunk);
        }

        self.publish_states();
        self.frame_counter += out.len() as u64;
    }

    /// Release held voices no contact drives any more.
    ///
    /// Covers a note-off that never arrived (full queue) and an emergency
    /// reset racing a voice start.
    fn release_orphans(&mut self) {
        for (i, voice) in self.voices.iter_mut().enumerate() {
            if voice.state() == VoiceState::Active
                && !self
                    .registry
                    .contains_value(EntityRef::Voice(VoiceId(i as u16)))
            {
                voice.release();
            }
        }
    }

    fn publish_states(&self) {
        for (i, voice) in self.voices.iter().enumerate() {
            let state = match voice.state() {
                VoiceState::Free => SlotState::Idle,
                VoiceState::Active => SlotState::Active,
                VoiceState::Releasing => SlotState::Releasing,
            };
            self.slots.set(VoiceId(i as u16), state);
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn voice_state(&self, voice: VoiceId) -> Option<VoiceState> {
        self.voices.get(voice.index()).map(Voice::state)
    }
}
