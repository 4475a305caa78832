//! Terminal front end for the touch surface
//!
//! Draws the pad, the control panel and the output scope, and feeds mouse
//! events to the touch engine as contacts.

mod controls;
mod input;
pub mod layout;
mod pad;
mod scope;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use sauce_pad::{
    config::SynthConfig,
    synth::{
        bank::SynthBank,
        message::SynthMessage,
        scale::{PadMapping, Scale},
    },
    TouchEngine,
};

pub use pad::PadView;

use controls::render_controls;
use input::MouseBridge;
use layout::{to_cells, to_surface, PAD, SCOPE};
use pad::render_pad;
use scope::{render_scope, WINDOW};

type Engine = TouchEngine<SynthBank<Producer<SynthMessage>>, PadView>;

/// Samples kept for the scope: two windows, so there is room to trigger
const SCOPE_HISTORY: usize = WINDOW * 2;

pub struct UiApp {
    engine: Engine,
    bridge: MouseBridge,
    scope_rx: Consumer<f32>,
    scope: Vec<f32>,
    synth: SynthConfig,
    /// Terminal size as of the last draw, for mapping mouse cells
    area: Rect,
    should_quit: bool,
}

impl UiApp {
    pub fn new(engine: Engine, scope_rx: Consumer<f32>, synth: SynthConfig) -> Self {
        Self {
            engine,
            bridge: MouseBridge::new(),
            scope_rx,
            scope: Vec::with_capacity(SCOPE_HISTORY),
            synth,
            area: Rect::default(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();

            terminal.draw(|frame| {
                self.area = frame.area();
                self.render(frame);
            })?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn poll_scope(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > SCOPE_HISTORY {
            let excess = self.scope.len() - SCOPE_HISTORY;
            self.scope.drain(..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s') => self.next_scale(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = to_surface(mouse.column, mouse.row, self.area);
        if let Some(batch) = self.bridge.translate(mouse.kind, x, y) {
            self.engine.handle_batch(&batch);
        }
    }

    fn next_scale(&mut self) {
        let current = self.engine.bank().mapping().scale().name();
        let names: Vec<&str> = Scale::names().collect();
        let index = names.iter().position(|&n| n == current).unwrap_or(0);
        let next = names[(index + 1) % names.len()];

        match Scale::by_name(next) {
            Ok(scale) => {
                let mapping = PadMapping::new(scale, self.synth.base_note, self.synth.octaves);
                self.engine.bank_mut().set_mapping(mapping);
                log::info!("scale set to {next}");
            }
            Err(err) => log::warn!("{err}"),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let bank = self.engine.bank();

        render_pad(
            frame,
            to_cells(PAD, area),
            self.engine.pad(),
            bank.mapping(),
            self.engine.surface(),
            bank.slots(),
            self.engine.fingered(),
        );
        if let Some(chain) = self.engine.chain() {
            render_controls(frame, area, chain);
        }
        render_scope(frame, to_cells(SCOPE, area), &self.scope);

        let help = Paragraph::new(" [Mouse L/R] Play  [S] Next scale  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        let bottom = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        frame.render_widget(help, bottom);
    }
}
