use crate::{
    param::Param,
    touch::{ContactId, Phase, Rect, TouchEvent},
};

use super::Continuation;

/// Where a drag started, so movement is relative to the grab point.
#[derive(Debug, Clone, Copy)]
struct Grab {
    contact: ContactId,
    origin_y: f32,
    origin_value: f32,
}

/// Vertical-drag knob bound to a [`Param`].
///
/// Dragging up by the knob's own height sweeps the full range once; the
/// grab point never jumps the value.
pub struct Knob {
    label: String,
    bounds: Rect,
    param: Param,
    grab: Option<Grab>,
}

impl Knob {
    pub fn new(label: impl Into<String>, bounds: Rect, param: Param) -> Self {
        Self {
            label: label.into(),
            bounds,
            param,
            grab: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_some()
    }

    pub(crate) fn claims(&self, event: &TouchEvent) -> bool {
        event.phase != Phase::Up && self.bounds.contains(event.contact.x, event.contact.y)
    }

    pub(crate) fn handle(&mut self, event: &TouchEvent) -> Continuation {
        let contact = event.contact;
        match event.phase {
            Phase::Up => {
                self.grab = None;
                Continuation::Done
            }
            Phase::Down | Phase::Move => {
                match self.grab {
                    Some(grab) if grab.contact == contact.id => {
                        let span = self.bounds.height;
                        if span > 0.0 {
                            let delta = (grab.origin_y - contact.y) / span;
                            self.param.set_normalized(grab.origin_value + delta);
                        }
                    }
                    _ => {
                        self.grab = Some(Grab {
                            contact: contact.id,
                            origin_y: contact.y,
                            origin_value: self.param.normalized(),
                        });
                    }
                }
                Continuation::Continue
            }
        }
    }

    pub(crate) fn detach(&mut self, contact: ContactId) {
        if self.grab.is_some_and(|g| g.contact == contact) {
            self.grab = None;
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.grab = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::Contact;

    fn event(y: f32, phase: Phase) -> TouchEvent {
        TouchEvent::new(Contact::new(0, 5.0, y), phase)
    }

    #[test]
    fn drag_up_raises_value() {
        let param = Param::new("cutoff", 0.0, 1.0, 0.5);
        let mut knob = Knob::new("cutoff", Rect::new(0.0, 0.0, 10.0, 10.0), param.clone());

        knob.handle(&event(8.0, Phase::Down));
        assert_eq!(param.get(), 0.5, "grabbing must not jump the value");

        knob.handle(&event(6.0, Phase::Move));
        assert!((param.get() - 0.7).abs() < 1e-5);

        assert_eq!(knob.handle(&event(6.0, Phase::Up)), Continuation::Done);
        assert!(!knob.is_grabbed());
    }

    #[test]
    fn value_saturates() {
        let param = Param::new("mix", 0.0, 1.0, 0.9);
        let mut knob = Knob::new("mix", Rect::new(0.0, 0.0, 10.0, 10.0), param.clone());
        knob.handle(&event(9.0, Phase::Down));
        knob.handle(&event(-40.0, Phase::Move));
        assert_eq!(param.get(), 1.0);
    }

    #[test]
    fn releases_are_not_claimed() {
        let knob = Knob::new(
            "gain",
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Param::new("gain", 0.0, 1.0, 0.0),
        );
        assert!(knob.claims(&event(5.0, Phase::Move)));
        assert!(!knob.claims(&event(5.0, Phase::Up)));
        assert!(!knob.claims(&event(50.0, Phase::Down)));
    }
}
