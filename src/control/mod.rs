// Purpose: interface entities a contact can drive when it is not playing a voice
// The chain layers them and decides who claims an unrouted contact

pub mod button;
pub mod knob;
pub mod tabs;

use crate::touch::{ContactId, ContactRegistry, EntityRef, TouchEvent};

pub use button::{Button, ButtonMode};
pub use knob::Knob;
pub use tabs::{Tab, TabStrip};

/// Index of a control inside its [`ControllerChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u16);

impl ControlId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What an entity wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Keep sending this contact's events
    Continue,
    /// Done with this contact; drop the binding
    Done,
}

impl Continuation {
    pub fn is_done(self) -> bool {
        self == Continuation::Done
    }
}

pub enum Control {
    Knob(Knob),
    Button(Button),
    Tabs(TabStrip),
}

impl Control {
    /// Whether several contacts may drive this control at once.
    pub fn is_compound(&self) -> bool {
        matches!(self, Control::Tabs(_))
    }

    pub fn bounds(&self) -> crate::touch::Rect {
        match self {
            Control::Knob(knob) => knob.bounds(),
            Control::Button(button) => button.bounds(),
            Control::Tabs(tabs) => tabs.bounds(),
        }
    }

    fn handle(&mut self, event: &TouchEvent) -> Continuation {
        match self {
            Control::Knob(knob) => knob.handle(event),
            Control::Button(button) => button.handle(event),
            Control::Tabs(tabs) => tabs.handle(event),
        }
    }

    fn detach(&mut self, contact: ContactId) {
        match self {
            Control::Knob(knob) => knob.detach(contact),
            Control::Button(button) => button.detach(contact),
            Control::Tabs(tabs) => tabs.detach(contact),
        }
    }

    fn cancel(&mut self) {
        match self {
            Control::Knob(knob) => knob.cancel(),
            Control::Button(button) => button.cancel(),
            Control::Tabs(tabs) => tabs.cancel(),
        }
    }
}

impl From<Knob> for Control {
    fn from(knob: Knob) -> Self {
        Control::Knob(knob)
    }
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        Control::Button(button)
    }
}

impl From<TabStrip> for Control {
    fn from(tabs: TabStrip) -> Self {
        Control::Tabs(tabs)
    }
}

/// Layered set of controls.
///
/// Controls live in a flat arena addressed by [`ControlId`]. Layers are the
/// top-level entries, offered contacts in the order they were pushed; tab
/// strips pass body contacts on to their selected tab's children.
#[derive(Default)]
pub struct ControllerChain {
    controls: Vec<Control>,
    layers: Vec<ControlId>,
}

impl ControllerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a control and return its id. It receives no contacts until it
    /// is pushed as a layer or listed as a tab child.
    pub fn insert(&mut self, control: impl Into<Control>) -> ControlId {
        let id = ControlId(self.controls.len() as u16);
        self.controls.push(control.into());
        id
    }

    /// Append `id` to the layer list, below every layer pushed before it.
    pub fn push_layer(&mut self, id: ControlId) {
        if id.index() < self.controls.len() && !self.layers.contains(&id) {
            self.layers.push(id);
        }
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.index())
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id.index())
    }

    pub fn layers(&self) -> &[ControlId] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether any layer covers the point.
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.layers
            .iter()
            .filter_map(|&id| self.get(id))
            .any(|control| control.bounds().contains(x, y))
    }

    /// Deepest control under `layer` willing to take the contact.
    fn claimant(&self, id: ControlId, event: &TouchEvent) -> Option<ControlId> {
        match self.get(id)? {
            Control::Knob(knob) => knob.claims(event).then_some(id),
            Control::Button(button) => button.claims(event).then_some(id),
            Control::Tabs(tabs) => {
                if tabs.claims_header(event) {
                    return Some(id);
                }
                if !tabs.bounds().contains(event.contact.x, event.contact.y) {
                    return None;
                }
                // Children precede their strip in the arena, which rules out cycles
                tabs.active_children()
                    .iter()
                    .filter(|&&child| child < id)
                    .find_map(|&child| self.claimant(child, event))
            }
        }
    }

    /// Offer an unrouted contact to the layers.
    ///
    /// The first claimant wins. A non-compound claimant another contact
    /// already drives is a conflict: nothing is bound and the contact is
    /// retried on its next event.
    pub fn offer(&mut self, registry: &ContactRegistry, event: &TouchEvent) -> Option<ControlId> {
        let id = self
            .layers
            .iter()
            .find_map(|&layer| self.claimant(layer, event))?;
        let entity = EntityRef::Control(id);

        let compound = self.get(id).is_some_and(Control::is_compound);
        if !compound && registry.contains_value(entity) {
            log::debug!("contact {} conflicts on control {:?}", event.id(), id);
            return None;
        }
        if !registry.bind(event.id(), entity) {
            return None;
        }

        if self.handle(id, event).is_done() {
            registry.unbind(event.id());
        }
        Some(id)
    }

    /// Deliver an event to a bound control.
    pub fn handle(&mut self, id: ControlId, event: &TouchEvent) -> Continuation {
        match self.get_mut(id) {
            Some(control) => control.handle(event),
            None => Continuation::Done,
        }
    }

    /// Forget a contact the control may still be holding.
    pub fn detach(&mut self, id: ControlId, contact: ContactId) {
        if let Some(control) = self.get_mut(id) {
            control.detach(contact);
        }
    }

    /// Drop every control's transient touch state.
    pub fn cancel_all(&mut self) {
        for control in &mut self.controls {
            control.cancel();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, control)| (ControlId(i as u16), control))
    }
}
