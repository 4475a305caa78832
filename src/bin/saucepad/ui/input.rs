//! Mouse as a two-finger touch source
//!
//! Left button is contact 0, right button contact 1. Each press, drag and
//! release becomes a batch carrying every button still held, the way a
//! touch panel reports all fingers on every callback.

use crossterm::event::{MouseButton, MouseEventKind};
use sauce_pad::touch::{Contact, ContactId, TouchAction, TouchBatch};

const FINGERS: usize = 2;

#[derive(Default)]
pub struct MouseBridge {
    held: [Option<(f32, f32)>; FINGERS],
}

fn contact_for(button: MouseButton) -> Option<ContactId> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => None,
    }
}

impl MouseBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of the buttons currently down.
    pub fn held(&self) -> impl Iterator<Item = (ContactId, f32, f32)> + '_ {
        self.held
            .iter()
            .enumerate()
            .filter_map(|(id, pos)| pos.map(|(x, y)| (id as ContactId, x, y)))
    }

    fn others_held(&self, id: ContactId) -> bool {
        self.held().any(|(other, _, _)| other != id)
    }

    fn batch(&self, action: TouchAction, subject: ContactId) -> TouchBatch {
        let mut batch = TouchBatch::new(action).with_subject(subject);
        for (id, x, y) in self.held() {
            batch.push(Contact::new(id, x, y));
        }
        batch
    }

    /// Turn a mouse event at surface point (x, y) into a touch batch.
    pub fn translate(&mut self, kind: MouseEventKind, x: f32, y: f32) -> Option<TouchBatch> {
        match kind {
            MouseEventKind::Down(button) => {
                let id = contact_for(button)?;
                let slot = &mut self.held[id as usize];
                if slot.is_some() {
                    return None;
                }
                *slot = Some((x, y));
                let action = if self.others_held(id) {
                    TouchAction::PointerDown
                } else {
                    TouchAction::Down
                };
                Some(self.batch(action, id))
            }
            MouseEventKind::Drag(button) => {
                let id = contact_for(button)?;
                let slot = self.held[id as usize].as_mut()?;
                *slot = (x, y);
                Some(self.batch(TouchAction::Move, id))
            }
            MouseEventKind::Up(button) => {
                let id = contact_for(button)?;
                let slot = self.held[id as usize].as_mut()?;
                *slot = (x, y);
                let action = if self.others_held(id) {
                    TouchAction::PointerUp
                } else {
                    TouchAction::Up
                };
                // The lifted contact is still reported, at its release point
                let batch = self.batch(action, id);
                self.held[id as usize] = None;
                Some(batch)
            }
            _ => None,
        }
    }
}
