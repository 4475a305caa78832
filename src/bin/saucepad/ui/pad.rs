//! Voice pad: the note grid and one marker per finger

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line},
        Block, Borders,
    },
    Frame,
};
use sauce_pad::{
    engine::allocator::FingeredVoice,
    synth::{scale::PadMapping, slots::{SlotState, VoiceSlots}, VoiceId},
    touch::{EntityRef, Rect as SurfaceRect},
    Surface,
};

/// Voices the engine has put on screen.
#[derive(Default)]
pub struct PadView {
    shown: Vec<VoiceId>,
}

impl PadView {
    pub fn is_shown(&self, voice: VoiceId) -> bool {
        self.shown.contains(&voice)
    }
}

impl Surface for PadView {
    fn publish(&mut self, entity: EntityRef) {
        if let Some(voice) = entity.as_voice() {
            if !self.shown.contains(&voice) {
                self.shown.push(voice);
            }
        }
    }

    fn unpublish(&mut self, entity: EntityRef) {
        if let Some(voice) = entity.as_voice() {
            self.shown.retain(|&v| v != voice);
        }
    }
}

pub fn render_pad<'a>(
    frame: &mut Frame,
    area: Rect,
    pad: SurfaceRect,
    mapping: &PadMapping,
    view: &PadView,
    slots: &VoiceSlots,
    fingers: impl Iterator<Item = &'a FingeredVoice>,
) {
    let title = format!(" Pad - {} ", mapping.scale().name());
    let steps = mapping.steps();

    // Canvas y grows upwards; the surface grows downwards
    let markers: Vec<(f64, f64, Color)> = fingers
        .filter(|f| view.is_shown(f.voice))
        .map(|f| {
            let (x, y) = f.position;
            let color = match slots.state(f.voice) {
                SlotState::Active => Color::Yellow,
                SlotState::Releasing => Color::DarkGray,
                SlotState::Idle => Color::Gray,
            };
            (
                pad.normalize_x(x) as f64,
                1.0 - pad.normalize_y(y) as f64,
                color,
            )
        })
        .collect();

    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            for step in 1..steps {
                let x = step as f64 / steps as f64;
                ctx.draw(&Line {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: 1.0,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();
            for &(x, y, color) in &markers {
                ctx.print(x, y, ratatui::text::Span::styled("●", Style::default().fg(color)));
            }
        });

    frame.render_widget(canvas, area);
}
