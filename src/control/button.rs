use crate::{
    param::Toggle,
    touch::{ContactId, Phase, Rect, TouchEvent},
};

use super::Continuation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMode {
    /// Each press flips the switch
    Toggle,
    /// On while held
    Momentary,
}

/// A press-only control bound to a [`Toggle`].
pub struct Button {
    label: String,
    bounds: Rect,
    toggle: Toggle,
    mode: ButtonMode,
    pressed_by: Option<ContactId>,
}

impl Button {
    pub fn new(label: impl Into<String>, bounds: Rect, toggle: Toggle, mode: ButtonMode) -> Self {
        Self {
            label: label.into(),
            bounds,
            toggle,
            mode,
            pressed_by: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_by.is_some()
    }

    /// Buttons only take fresh contacts; sliding onto one does not press it.
    pub(crate) fn claims(&self, event: &TouchEvent) -> bool {
        event.phase == Phase::Down && self.bounds.contains(event.contact.x, event.contact.y)
    }

    pub(crate) fn handle(&mut self, event: &TouchEvent) -> Continuation {
        match event.phase {
            Phase::Up => {
                self.release();
                Continuation::Done
            }
            Phase::Down | Phase::Move => {
                if self.pressed_by.is_none() {
                    self.pressed_by = Some(event.id());
                    match self.mode {
                        ButtonMode::Toggle => self.toggle.flip(),
                        ButtonMode::Momentary => self.toggle.set(true),
                    }
                }
                Continuation::Continue
            }
        }
    }

    fn release(&mut self) {
        if self.pressed_by.take().is_some() && self.mode == ButtonMode::Momentary {
            self.toggle.set(false);
        }
    }

    pub(crate) fn detach(&mut self, contact: ContactId) {
        if self.pressed_by == Some(contact) {
            self.release();
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::Contact;

    fn press(phase: Phase) -> TouchEvent {
        TouchEvent::new(Contact::new(1, 2.0, 2.0), phase)
    }

    #[test]
    fn toggle_flips_once_per_press() {
        let toggle = Toggle::new("delay", false);
        let mut button = Button::new(
            "delay",
            Rect::new(0.0, 0.0, 4.0, 4.0),
            toggle.clone(),
            ButtonMode::Toggle,
        );

        button.handle(&press(Phase::Down));
        button.handle(&press(Phase::Move));
        assert!(toggle.is_on());
        assert_eq!(button.handle(&press(Phase::Up)), Continuation::Done);
        assert!(toggle.is_on());
    }

    #[test]
    fn momentary_follows_the_finger() {
        let toggle = Toggle::new("hold", false);
        let mut button = Button::new(
            "hold",
            Rect::new(0.0, 0.0, 4.0, 4.0),
            toggle.clone(),
            ButtonMode::Momentary,
        );

        button.handle(&press(Phase::Down));
        assert!(toggle.is_on());
        button.detach(1);
        assert!(!toggle.is_on());
        assert!(!button.is_pressed());
    }

    #[test]
    fn only_fresh_contacts_are_claimed() {
        let button = Button::new(
            "b",
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Toggle::new("b", false),
            ButtonMode::Toggle,
        );
        assert!(button.claims(&press(Phase::Down)));
        assert!(!button.claims(&press(Phase::Move)));
    }
}
