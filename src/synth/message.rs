#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use super::VoiceId;

/// Commands from the input thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn {
        voice: VoiceId,
        frequency: f32,
        amplitude: f32,
    },
    Glide {
        voice: VoiceId,
        frequency: f32,
        amplitude: f32,
    },
    NoteOff {
        voice: VoiceId,
    },
    /// Silence every voice immediately, skipping release
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

pub trait MessageSender {
    /// Queue a message, returning false if it had to be dropped.
    fn push(&mut self, msg: SynthMessage) -> bool;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl MessageSender for Producer<SynthMessage> {
    fn push(&mut self, msg: SynthMessage) -> bool {
        Producer::push(self, msg).is_ok()
    }
}
