use crate::{
    control::Continuation,
    synth::{VoiceBank, VoiceId},
    touch::{Contact, ContactId, ContactRegistry, EntityRef, Phase, Rect, TouchEvent},
};

use super::Surface;

/// A voice while a contact holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingeredVoice {
    pub voice: VoiceId,
    pub contact: ContactId,
    /// Where the contact first landed, surface coordinates
    pub anchor: (f32, f32),
    /// Latest position, surface coordinates
    pub position: (f32, f32),
    started: bool,
}

impl FingeredVoice {
    fn new(voice: VoiceId, contact: ContactId, x: f32, y: f32) -> Self {
        Self {
            voice,
            contact,
            anchor: (x, y),
            position: (x, y),
            started: false,
        }
    }

    fn handle<B: VoiceBank>(&mut self, bank: &mut B, pad: &Rect, event: &TouchEvent) -> Continuation {
        let Contact { x, y, .. } = event.contact;
        self.position = (x, y);
        let (nx, ny) = (pad.normalize_x(x), pad.normalize_y(y));

        match event.phase {
            Phase::Up => Continuation::Done,
            Phase::Down | Phase::Move if !self.started => {
                self.started = true;
                bank.start(self.voice, nx, ny);
                Continuation::Continue
            }
            Phase::Down | Phase::Move => {
                bank.update(self.voice, nx, ny);
                Continuation::Continue
            }
        }
    }
}

/// Binds contacts in the pad to voices from a [`VoiceBank`].
pub struct VoiceAllocator<B: VoiceBank> {
    bank: B,
    fingered: Vec<Option<FingeredVoice>>,
    pad: Rect,
}

impl<B: VoiceBank> VoiceAllocator<B> {
    pub fn new(bank: B, pad: Rect) -> Self {
        let fingered = vec![None; bank.capacity()];
        Self {
            bank,
            fingered,
            pad,
        }
    }

    pub fn pad(&self) -> Rect {
        self.pad
    }

    pub fn set_pad(&mut self, pad: Rect) {
        self.pad = pad;
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn is_playing(&self) -> bool {
        self.bank.is_playing()
    }

    /// Voice driven by the event's contact, creating and starting one if
    /// the contact is unbound.
    ///
    /// Returns `None` without side effects when the contact drives a
    /// control, when the event is a release, when the bank has nothing to
    /// give, or when the offered voice is already held by a contact.
    pub fn get_or_create<S: Surface>(
        &mut self,
        registry: &ContactRegistry,
        surface: &mut S,
        event: &TouchEvent,
    ) -> Option<VoiceId> {
        let id = event.id();
        match registry.get(id) {
            Some(EntityRef::Voice(voice)) => return Some(voice),
            Some(EntityRef::Control(_)) => return None,
            None => {}
        }
        if event.phase == Phase::Up {
            return None;
        }

        let Contact { x, y, .. } = event.contact;
        let voice = self
            .bank
            .allocate_or_get(id, self.pad.normalize_x(x), self.pad.normalize_y(y))?;
        let entity = EntityRef::Voice(voice);

        let slot_free = self
            .fingered
            .get(voice.index())
            .is_some_and(Option::is_none);
        if !slot_free || registry.contains_value(entity) {
            log::debug!("contact {id} conflicts on voice {:?}", voice);
            return None;
        }
        // Bind before the voice starts so the audio side never sees it unowned
        if !registry.bind(id, entity) {
            return None;
        }

        let mut fingered = FingeredVoice::new(voice, id, x, y);
        fingered.handle(&mut self.bank, &self.pad, event);
        self.fingered[voice.index()] = Some(fingered);
        surface.publish(entity);
        Some(voice)
    }

    /// Deliver an event to a held voice.
    pub fn handle(&mut self, voice: VoiceId, event: &TouchEvent) -> Continuation {
        match self.fingered.get_mut(voice.index()) {
            Some(Some(fingered)) => fingered.handle(&mut self.bank, &self.pad, event),
            _ => Continuation::Done,
        }
    }

    /// Release a held voice and take it off the surface.
    ///
    /// Returns false if the voice was not held, so a voice is never
    /// released twice.
    pub fn finish<S: Surface>(&mut self, voice: VoiceId, surface: &mut S) -> bool {
        let Some(fingered) = self.fingered.get_mut(voice.index()).and_then(Option::take) else {
            return false;
        };
        self.bank.release(fingered.voice);
        surface.unpublish(EntityRef::Voice(fingered.voice));
        true
    }

    /// Forget every held voice and silence the bank.
    pub fn reset<S: Surface>(&mut self, surface: &mut S) {
        for fingered in self.fingered.iter_mut().filter_map(Option::take) {
            surface.unpublish(EntityRef::Voice(fingered.voice));
        }
        self.bank.stop_all();
    }

    pub fn fingered(&self) -> impl Iterator<Item = &FingeredVoice> {
        self.fingered.iter().flatten()
    }

    pub fn get(&self, voice: VoiceId) -> Option<&FingeredVoice> {
        self.fingered.get(voice.index()).and_then(Option::as_ref)
    }
}
