use std::sync::Arc;

use crate::touch::ContactId;

use super::{
    message::{MessageSender, SynthMessage},
    scale::PadMapping,
    slots::{SlotState, VoiceSlots},
    VoiceBank, VoiceId,
};

/// Input-side half of the reference synth.
///
/// Owns the reservation table (which contact holds which voice) and turns
/// voice requests into [`SynthMessage`]s for the audio thread. Voice
/// selection mirrors a classic poly allocator: a free voice first, else the
/// oldest voice already releasing. A held voice is never stolen.
pub struct SynthBank<T: MessageSender> {
    tx: T,
    slots: Arc<VoiceSlots>,
    mapping: PadMapping,
    owners: Vec<Option<ContactId>>,
    started: Vec<u64>,
    clock: u64,
}

impl<T: MessageSender> SynthBank<T> {
    pub fn new(tx: T, slots: Arc<VoiceSlots>, mapping: PadMapping) -> Self {
        let voices = slots.len();
        Self {
            tx,
            slots,
            mapping,
            owners: vec![None; voices],
            started: vec![0; voices],
            clock: 0,
        }
    }

    pub fn mapping(&self) -> &PadMapping {
        &self.mapping
    }

    pub fn set_mapping(&mut self, mapping: PadMapping) {
        self.mapping = mapping;
    }

    /// Voice states as last published by the audio thread.
    pub fn slots(&self) -> &Arc<VoiceSlots> {
        &self.slots
    }

    /// Contact currently holding `voice`.
    pub fn owner(&self, voice: VoiceId) -> Option<ContactId> {
        self.owners.get(voice.index()).copied().flatten()
    }

    fn send(&mut self, msg: SynthMessage) {
        if !self.tx.push(msg) {
            log::warn!("voice queue full, dropped {:?}", msg);
        }
    }

    fn find_voice(&self) -> Option<usize> {
        let unowned = |i: &usize| self.owners[*i].is_none();

        // First pass: a voice that is silent
        let free = (0..self.owners.len())
            .filter(unowned)
            .find(|&i| self.slots.state(VoiceId(i as u16)) == SlotState::Idle);
        if free.is_some() {
            return free;
        }

        // Second pass: steal the oldest releasing voice
        (0..self.owners.len())
            .filter(unowned)
            .filter(|&i| self.slots.state(VoiceId(i as u16)) == SlotState::Releasing)
            .min_by_key(|&i| self.started[i])
    }
}

impl<T: MessageSender> VoiceBank for SynthBank<T> {
    fn capacity(&self) -> usize {
        self.owners.len()
    }

    fn allocate_or_get(&mut self, contact: ContactId, _x: f32, _y: f32) -> Option<VoiceId> {
        if let Some(held) = self.owners.iter().position(|&o| o == Some(contact)) {
            return Some(VoiceId(held as u16));
        }
        let index = self.find_voice()?;
        self.owners[index] = Some(contact);
        Some(VoiceId(index as u16))
    }

    fn start(&mut self, voice: VoiceId, x: f32, y: f32) {
        if let Some(started) = self.started.get_mut(voice.index()) {
            self.clock += 1;
            *started = self.clock;
        }
        let msg = SynthMessage::NoteOn {
            voice,
            frequency: self.mapping.frequency(x),
            amplitude: self.mapping.amplitude(y),
        };
        self.send(msg);
    }

    fn update(&mut self, voice: VoiceId, x: f32, y: f32) {
        let msg = SynthMessage::Glide {
            voice,
            frequency: self.mapping.frequency(x),
            amplitude: self.mapping.amplitude(y),
        };
        self.send(msg);
    }

    fn release(&mut self, voice: VoiceId) {
        if let Some(owner) = self.owners.get_mut(voice.index()) {
            if owner.take().is_some() {
                self.send(SynthMessage::NoteOff { voice });
            }
        }
    }

    fn stop_all(&mut self) {
        self.owners.fill(None);
        self.send(SynthMessage::StopAll);
    }

    fn is_playing(&self) -> bool {
        self.owners.iter().any(Option::is_some) || self.slots.any_sounding()
    }
}
