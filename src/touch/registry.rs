//! Which contact drives which entity.
//!
//! Contact ids are small integers handed out by the input source, so the
//! table is a fixed array of atomic slots indexed by id. Each slot holds an
//! encoded [`EntityRef`] or zero for "unbound". Every operation is a handful
//! of atomic loads or a single CAS/swap: the input thread writes, the audio
//! thread reads, and neither ever waits on the other.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{control::ControlId, synth::VoiceId, touch::ContactId};

const EMPTY: u32 = 0;
const CONTROL_TAG: u32 = 1 << 31;

/// Non-owning reference to something a contact can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Voice(VoiceId),
    Control(ControlId),
}

impl EntityRef {
    fn encode(self) -> u32 {
        match self {
            EntityRef::Voice(VoiceId(v)) => v as u32 + 1,
            EntityRef::Control(ControlId(c)) => CONTROL_TAG | (c as u32 + 1),
        }
    }

    fn decode(raw: u32) -> Option<Self> {
        if raw == EMPTY {
            None
        } else if raw & CONTROL_TAG != 0 {
            Some(EntityRef::Control(ControlId(((raw & !CONTROL_TAG) - 1) as u16)))
        } else {
            Some(EntityRef::Voice(VoiceId((raw - 1) as u16)))
        }
    }

    pub fn as_voice(self) -> Option<VoiceId> {
        match self {
            EntityRef::Voice(v) => Some(v),
            EntityRef::Control(_) => None,
        }
    }
}

pub struct ContactRegistry {
    slots: Box<[AtomicU32]>,
}

impl ContactRegistry {
    /// Registry accepting contact ids `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU32::new(EMPTY)).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether `id` addresses a slot at all.
    pub fn accepts(&self, id: ContactId) -> bool {
        self.slot(id).is_some()
    }

    fn slot(&self, id: ContactId) -> Option<&AtomicU32> {
        usize::try_from(id).ok().and_then(|i| self.slots.get(i))
    }

    pub fn get(&self, id: ContactId) -> Option<EntityRef> {
        self.slot(id)
            .and_then(|slot| EntityRef::decode(slot.load(Ordering::Acquire)))
    }

    /// Bind `id` to `entity` if the id is currently unbound.
    ///
    /// Returns false when the id is invalid or already bound; an existing
    /// binding is never overwritten.
    pub fn bind(&self, id: ContactId, entity: EntityRef) -> bool {
        match self.slot(id) {
            Some(slot) => slot
                .compare_exchange(EMPTY, entity.encode(), Ordering::AcqRel, Ordering::Acquire)
                .is_ok(),
            None => false,
        }
    }

    /// Remove the binding for `id`, returning what it was bound to.
    pub fn unbind(&self, id: ContactId) -> Option<EntityRef> {
        self.slot(id)
            .and_then(|slot| EntityRef::decode(slot.swap(EMPTY, Ordering::AcqRel)))
    }

    /// Whether any contact currently drives `entity`.
    pub fn contains_value(&self, entity: EntityRef) -> bool {
        let raw = entity.encode();
        self.slots.iter().any(|slot| slot.load(Ordering::Acquire) == raw)
    }

    /// Number of contacts currently driving `entity`.
    pub fn bound_count(&self, entity: EntityRef) -> usize {
        let raw = entity.encode();
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Acquire) == raw)
            .count()
    }

    /// Drop every binding.
    pub fn clear(&self) {
        for slot in self.slots.iter() {
            slot.store(EMPTY, Ordering::Release);
        }
    }

    /// Snapshot of current bindings, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactId, EntityRef)> + '_ {
        self.slots.iter().enumerate().filter_map(|(id, slot)| {
            EntityRef::decode(slot.load(Ordering::Acquire)).map(|e| (id as ContactId, e))
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.load(Ordering::Acquire) == EMPTY)
    }
}
