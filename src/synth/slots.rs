//! Per-voice state published by the audio thread.
//!
//! The audio thread is the only writer; the input thread reads these to
//! find free voices and to answer "is anything still sounding".

use std::sync::atomic::{AtomicU8, Ordering};

use super::VoiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotState {
    Idle = 0,
    Active = 1,
    Releasing = 2,
}

impl SlotState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => SlotState::Active,
            2 => SlotState::Releasing,
            _ => SlotState::Idle,
        }
    }
}

pub struct VoiceSlots {
    states: Box<[AtomicU8]>,
}

impl VoiceSlots {
    pub fn new(voices: usize) -> Self {
        Self {
            states: (0..voices)
                .map(|_| AtomicU8::new(SlotState::Idle as u8))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, voice: VoiceId) -> SlotState {
        self.states
            .get(voice.index())
            .map(|s| SlotState::from_raw(s.load(Ordering::Acquire)))
            .unwrap_or(SlotState::Idle)
    }

    pub(crate) fn set(&self, voice: VoiceId, state: SlotState) {
        if let Some(slot) = self.states.get(voice.index()) {
            slot.store(state as u8, Ordering::Release);
        }
    }

    pub fn any_sounding(&self) -> bool {
        self.states
            .iter()
            .any(|s| s.load(Ordering::Acquire) != SlotState::Idle as u8)
    }
}
