//! Contacts and the batches the input source delivers them in.
//!
//! A batch mirrors what a touch panel reports per callback: one action, the
//! contact that action is about, and every contact currently down with its
//! latest position. Batches are fixed-capacity so building one never
//! allocates.

pub mod barrier;
pub mod registry;

use serde::Deserialize;

use crate::MAX_CONTACTS;

pub use barrier::StartupBarrier;
pub use registry::{ContactRegistry, EntityRef};

/// Contact identifier as reported by the input source.
///
/// Negative values are how sources flag a missing pointer; they are skipped.
pub type ContactId = i32;

/// One touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub x: f32,
    pub y: f32,
}

impl Contact {
    pub const fn new(id: ContactId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// What happened in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First contact landed
    Down,
    /// One or more contacts moved
    Move,
    /// Last contact lifted
    Up,
    /// Another contact landed while others are held
    PointerDown,
    /// A contact lifted while others remain
    PointerUp,
}

/// The action as seen by a single contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Down,
    Move,
    Up,
}

/// A contact paired with its phase in the current batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub contact: Contact,
    pub phase: Phase,
}

impl TouchEvent {
    pub const fn new(contact: Contact, phase: Phase) -> Self {
        Self { contact, phase }
    }

    pub fn id(&self) -> ContactId {
        self.contact.id
    }
}

/// Axis-aligned region in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Position of `x` across the rect, clamped to 0.0..=1.0.
    pub fn normalize_x(&self, x: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.x) / self.width).clamp(0.0, 1.0)
    }

    /// Position of `y` down the rect, clamped to 0.0..=1.0.
    pub fn normalize_y(&self, y: f32) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        ((y - self.y) / self.height).clamp(0.0, 1.0)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// One input callback's worth of touch data.
#[derive(Debug, Clone)]
pub struct TouchBatch {
    action: TouchAction,
    subject: Option<ContactId>,
    contacts: [Contact; MAX_CONTACTS],
    len: usize,
}

impl TouchBatch {
    pub fn new(action: TouchAction) -> Self {
        Self {
            action,
            subject: None,
            contacts: [Contact::new(-1, 0.0, 0.0); MAX_CONTACTS],
            len: 0,
        }
    }

    /// First contact down at (x, y).
    pub fn down(id: ContactId, x: f32, y: f32) -> Self {
        Self::new(TouchAction::Down)
            .with_subject(id)
            .with_contact(id, x, y)
    }

    /// Last contact lifted at (x, y).
    pub fn up(id: ContactId, x: f32, y: f32) -> Self {
        Self::new(TouchAction::Up)
            .with_subject(id)
            .with_contact(id, x, y)
    }

    /// Set the contact the action refers to.
    pub fn with_subject(mut self, id: ContactId) -> Self {
        self.subject = Some(id);
        self
    }

    /// Append a contact. Contacts past `MAX_CONTACTS` are dropped.
    pub fn with_contact(mut self, id: ContactId, x: f32, y: f32) -> Self {
        self.push(Contact::new(id, x, y));
        self
    }

    /// Append a contact, returning false when the batch is full.
    pub fn push(&mut self, contact: Contact) -> bool {
        if self.len == MAX_CONTACTS {
            return false;
        }
        self.contacts[self.len] = contact;
        self.len += 1;
        true
    }

    pub fn action(&self) -> TouchAction {
        self.action
    }

    pub fn subject(&self) -> Option<ContactId> {
        self.subject
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Phase of the batch's action for the given contact.
    pub fn phase_of(&self, id: ContactId) -> Phase {
        let is_subject = self.subject == Some(id);
        match self.action {
            TouchAction::Down | TouchAction::PointerDown if is_subject => Phase::Down,
            TouchAction::Up | TouchAction::PointerUp if is_subject => Phase::Up,
            _ => Phase::Move,
        }
    }

    pub fn event_at(&self, index: usize) -> TouchEvent {
        let contact = self.contacts()[index];
        TouchEvent::new(contact, self.phase_of(contact.id))
    }

    /// The contact this batch lifts, if any.
    pub fn lifted(&self) -> Option<ContactId> {
        match self.action {
            TouchAction::Up | TouchAction::PointerUp => self.subject,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_the_subject() {
        let batch = TouchBatch::new(TouchAction::PointerDown)
            .with_subject(1)
            .with_contact(0, 10.0, 10.0)
            .with_contact(1, 20.0, 20.0);

        assert_eq!(batch.phase_of(0), Phase::Move);
        assert_eq!(batch.phase_of(1), Phase::Down);
        assert_eq!(batch.lifted(), None);
    }

    #[test]
    fn pointer_up_lifts_only_its_subject() {
        let batch = TouchBatch::new(TouchAction::PointerUp)
            .with_subject(0)
            .with_contact(0, 1.0, 1.0)
            .with_contact(2, 5.0, 5.0);

        assert_eq!(batch.phase_of(0), Phase::Up);
        assert_eq!(batch.phase_of(2), Phase::Move);
        assert_eq!(batch.lifted(), Some(0));
    }

    #[test]
    fn batch_capacity_is_bounded() {
        let mut batch = TouchBatch::new(TouchAction::Move);
        for id in 0..MAX_CONTACTS as i32 {
            assert!(batch.push(Contact::new(id, 0.0, 0.0)));
        }
        assert!(!batch.push(Contact::new(99, 0.0, 0.0)));
        assert_eq!(batch.len(), MAX_CONTACTS);
    }

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.9, 4.9));
        assert!(!rect.contains(10.0, 2.0));
        assert!(!rect.contains(2.0, 5.0));
        assert_eq!(rect.normalize_x(15.0), 1.0);
        assert_eq!(rect.normalize_y(2.5), 0.5);
    }
}
