//! Tab strip - the one compound control.
//!
//! The header row is split evenly between tabs. Fingers on the header select
//! tabs and are held by the strip itself, so several fingers can rest on it
//! at once. The body belongs to whichever tab is selected; the chain offers
//! body contacts to that tab's children.

use crate::{
    touch::{ContactId, Phase, Rect, TouchEvent},
    MAX_CONTACTS,
};

use super::{ControlId, Continuation};

pub struct Tab {
    name: String,
    children: Vec<ControlId>,
}

impl Tab {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[ControlId] {
        &self.children
    }
}

pub struct TabStrip {
    bounds: Rect,
    header_height: f32,
    tabs: Vec<Tab>,
    selected: usize,
    held: Vec<ContactId>,
}

impl TabStrip {
    pub fn new(bounds: Rect, header_height: f32) -> Self {
        Self {
            bounds,
            header_height: header_height.clamp(0.0, bounds.height),
            tabs: Vec::new(),
            selected: 0,
            held: Vec::with_capacity(MAX_CONTACTS),
        }
    }

    /// Add a tab showing `children`. Children must be inserted into the
    /// chain before the strip itself.
    pub fn with_tab(mut self, name: impl Into<String>, children: impl Into<Vec<ControlId>>) -> Self {
        self.tabs.push(Tab {
            name: name.into(),
            children: children.into(),
        });
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn header(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.header_height,
        )
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.selected = index;
        }
    }

    /// Contacts currently resting on the header.
    pub fn held(&self) -> &[ContactId] {
        &self.held
    }

    pub fn active_children(&self) -> &[ControlId] {
        self.tabs
            .get(self.selected)
            .map(|tab| tab.children.as_slice())
            .unwrap_or(&[])
    }

    fn tab_at(&self, x: f32) -> Option<usize> {
        if self.tabs.is_empty() {
            return None;
        }
        let n = self.tabs.len();
        let index = (self.bounds.normalize_x(x) * n as f32) as usize;
        Some(index.min(n - 1))
    }

    pub(crate) fn claims_header(&self, event: &TouchEvent) -> bool {
        event.phase != Phase::Up && self.header().contains(event.contact.x, event.contact.y)
    }

    pub(crate) fn handle(&mut self, event: &TouchEvent) -> Continuation {
        let contact = event.contact;
        match event.phase {
            Phase::Up => {
                self.detach(contact.id);
                Continuation::Done
            }
            Phase::Down | Phase::Move => {
                if !self.held.contains(&contact.id) && self.held.len() < MAX_CONTACTS {
                    self.held.push(contact.id);
                }
                if self.header().contains(contact.x, contact.y) {
                    if let Some(index) = self.tab_at(contact.x) {
                        self.selected = index;
                    }
                }
                Continuation::Continue
            }
        }
    }

    pub(crate) fn detach(&mut self, contact: ContactId) {
        self.held.retain(|&id| id != contact);
    }

    pub(crate) fn cancel(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::Contact;

    fn strip() -> TabStrip {
        TabStrip::new(Rect::new(0.0, 0.0, 30.0, 20.0), 3.0)
            .with_tab("filter", vec![ControlId(0)])
            .with_tab("delay", vec![ControlId(1), ControlId(2)])
            .with_tab("voice", Vec::new())
    }

    #[test]
    fn header_taps_select_tabs() {
        let mut tabs = strip();
        let tap = TouchEvent::new(Contact::new(4, 15.0, 1.0), Phase::Down);
        assert!(tabs.claims_header(&tap));

        tabs.handle(&tap);
        assert_eq!(tabs.selected(), 1);
        assert_eq!(tabs.active_children(), &[ControlId(1), ControlId(2)]);
    }

    #[test]
    fn holds_several_contacts() {
        let mut tabs = strip();
        tabs.handle(&TouchEvent::new(Contact::new(0, 1.0, 1.0), Phase::Down));
        tabs.handle(&TouchEvent::new(Contact::new(1, 29.0, 1.0), Phase::Down));
        assert_eq!(tabs.held(), &[0, 1]);
        assert_eq!(tabs.selected(), 2);

        let done = tabs.handle(&TouchEvent::new(Contact::new(0, 1.0, 1.0), Phase::Up));
        assert_eq!(done, Continuation::Done);
        assert_eq!(tabs.held(), &[1]);
    }

    #[test]
    fn body_is_not_the_header() {
        let tabs = strip();
        let body = TouchEvent::new(Contact::new(0, 5.0, 10.0), Phase::Down);
        assert!(!tabs.claims_header(&body));
    }
}
