use crate::{
    config::{PadOverlap, Precedence},
    control::ControllerChain,
    synth::VoiceBank,
    touch::{ContactId, ContactRegistry, EntityRef, TouchAction, TouchBatch, TouchEvent},
    MAX_CONTACTS,
};

use super::{allocator::VoiceAllocator, Surface};

/// Per-batch routing policy.
///
/// Contacts already bound go straight to their entity. Unbound ones land on
/// the pad (a voice) or are offered to the controls. The order contacts are
/// visited in is set by [`Precedence`]; both orders settle contacts bound to
/// controls before a new pad contact from the same batch is routed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchRouter {
    pub precedence: Precedence,
    pub pad_overlap: PadOverlap,
}

impl TouchRouter {
    pub fn new(precedence: Precedence, pad_overlap: PadOverlap) -> Self {
        Self {
            precedence,
            pad_overlap,
        }
    }

    pub fn dispatch<B: VoiceBank, S: Surface>(
        &self,
        batch: &TouchBatch,
        registry: &ContactRegistry,
        voices: &mut VoiceAllocator<B>,
        chain: &mut ControllerChain,
        surface: &mut S,
    ) {
        // Last contact gone while sound is still up: hard stop, no negotiation
        if batch.action() == TouchAction::Up && voices.is_playing() {
            Self::emergency_reset(registry, voices, chain, surface);
            return;
        }

        let mut order = [0usize; MAX_CONTACTS];
        let order = self.visit_order(batch, registry, &mut order);
        for &index in order {
            let event = batch.event_at(index);
            if !registry.accepts(event.id()) {
                continue;
            }
            self.route(&event, registry, voices, chain, surface);
        }

        // Controls may not report Done on a lift, so the binding goes regardless
        if let Some(id) = batch.lifted() {
            Self::release(id, registry, voices, chain, surface);
        }
    }

    /// Batch indices in the order they should be routed.
    fn visit_order<'a>(
        &self,
        batch: &TouchBatch,
        registry: &ContactRegistry,
        order: &'a mut [usize; MAX_CONTACTS],
    ) -> &'a [usize] {
        let len = batch.len();
        match self.precedence {
            Precedence::ReverseIndex => {
                for (slot, index) in order.iter_mut().zip((0..len).rev()) {
                    *slot = index;
                }
            }
            Precedence::BoundFirst => {
                // Snapshot before anything is routed so this batch's binds
                // cannot reorder it
                let bound = batch
                    .contacts()
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| registry.get(c.id).is_some())
                    .fold(0u32, |mask, (i, _)| mask | 1 << i);
                let is_bound = |i: &usize| bound & (1 << *i) != 0;

                let bound_first = (0..len)
                    .rev()
                    .filter(is_bound)
                    .chain((0..len).rev().filter(|i| !is_bound(i)));
                for (slot, index) in order.iter_mut().zip(bound_first) {
                    *slot = index;
                }
            }
        }
        &order[..len]
    }

    fn route<B: VoiceBank, S: Surface>(
        &self,
        event: &TouchEvent,
        registry: &ContactRegistry,
        voices: &mut VoiceAllocator<B>,
        chain: &mut ControllerChain,
        surface: &mut S,
    ) {
        let id = event.id();
        match registry.get(id) {
            Some(EntityRef::Voice(voice)) => {
                if voices.handle(voice, event).is_done() {
                    voices.finish(voice, surface);
                    registry.unbind(id);
                }
            }
            Some(EntityRef::Control(control)) => {
                if chain.handle(control, event).is_done() {
                    registry.unbind(id);
                    chain.detach(control, id);
                }
            }
            None => {
                let (x, y) = (event.contact.x, event.contact.y);
                let in_pad = voices.pad().contains(x, y);
                let covered = self.pad_overlap == PadOverlap::Controls && chain.hit_test(x, y);

                if in_pad && !covered {
                    voices.get_or_create(registry, surface, event);
                } else if chain.offer(registry, event).is_none() && in_pad {
                    voices.get_or_create(registry, surface, event);
                }
            }
        }
    }

    fn release<B: VoiceBank, S: Surface>(
        id: ContactId,
        registry: &ContactRegistry,
        voices: &mut VoiceAllocator<B>,
        chain: &mut ControllerChain,
        surface: &mut S,
    ) {
        match registry.get(id) {
            // Note-off goes out before the binding disappears
            Some(EntityRef::Voice(voice)) => {
                voices.finish(voice, surface);
            }
            Some(EntityRef::Control(control)) => chain.detach(control, id),
            None => return,
        }
        registry.unbind(id);
    }

    fn emergency_reset<B: VoiceBank, S: Surface>(
        registry: &ContactRegistry,
        voices: &mut VoiceAllocator<B>,
        chain: &mut ControllerChain,
        surface: &mut S,
    ) {
        log::debug!("all contacts lifted while playing, resetting");
        registry.clear();
        voices.reset(surface);
        chain.cancel_all();
    }
}
