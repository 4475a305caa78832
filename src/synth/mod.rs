// Purpose: the sound-producing side of the surface
// The router only sees the VoiceBank trait; everything else here is the
// reference synth that implements it over a lock-free queue.

pub mod fx;
pub mod message;
pub mod scale;
pub mod slots;
pub mod voice;

#[cfg(feature = "rtrb")]
pub mod bank;
#[cfg(feature = "rtrb")]
pub mod poly;

use crate::touch::ContactId;

#[cfg(feature = "rtrb")]
use std::sync::Arc;

#[cfg(feature = "rtrb")]
use crate::{config::SynthConfig, touch::ContactRegistry, Result};

/// Index of a voice in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub u16);

impl VoiceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The voice pool as the router sees it.
///
/// Positions handed to a bank are pad-relative: 0.0..=1.0 on both axes,
/// origin top-left.
pub trait VoiceBank {
    /// Number of voices in the pool.
    fn capacity(&self) -> usize;

    /// Voice already held by `contact`, or a newly reserved one.
    fn allocate_or_get(&mut self, contact: ContactId, x: f32, y: f32) -> Option<VoiceId>;

    /// Begin sounding a reserved voice.
    fn start(&mut self, voice: VoiceId, x: f32, y: f32);

    /// Follow a moving contact.
    fn update(&mut self, voice: VoiceId, x: f32, y: f32);

    /// Let the voice ring out and return it to the pool.
    fn release(&mut self, voice: VoiceId);

    /// Silence everything immediately.
    fn stop_all(&mut self);

    /// Whether any voice is held or still sounding.
    fn is_playing(&self) -> bool;
}

/// Audio-thread end of a [`connect`]ed synth, ready to be turned into a
/// [`poly::TouchSynth`] once the output device is known.
#[cfg(feature = "rtrb")]
pub struct AudioLink {
    pub rx: rtrb::Consumer<message::SynthMessage>,
    pub slots: Arc<slots::VoiceSlots>,
    pub registry: Arc<ContactRegistry>,
    pub attack: f32,
    pub release: f32,
}

#[cfg(feature = "rtrb")]
impl AudioLink {
    pub fn into_synth(
        self,
        sample_rate: f32,
    ) -> (poly::TouchSynth<rtrb::Consumer<message::SynthMessage>>, fx::FxParams) {
        poly::TouchSynth::new(
            sample_rate,
            self.attack,
            self.release,
            self.rx,
            self.slots,
            self.registry,
        )
    }
}

/// Create both ends of the reference synth.
#[cfg(feature = "rtrb")]
pub fn connect(
    config: &SynthConfig,
    registry: Arc<ContactRegistry>,
) -> Result<(bank::SynthBank<rtrb::Producer<message::SynthMessage>>, AudioLink)> {
    let scale = scale::Scale::by_name(&config.scale)?;
    let mapping = scale::PadMapping::new(scale, config.base_note, config.octaves);

    let (tx, rx) = rtrb::RingBuffer::new(config.queue_capacity);
    let slots = Arc::new(slots::VoiceSlots::new(config.voices));

    let bank = bank::SynthBank::new(tx, Arc::clone(&slots), mapping);
    let link = AudioLink {
        rx,
        slots,
        registry,
        attack: config.attack_ms / 1000.0,
        release: config.release_ms / 1000.0,
    };
    Ok((bank, link))
}
