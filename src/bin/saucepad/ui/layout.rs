//! Where things sit on the surface
//!
//! Surface coordinates are normalised to the terminal: (0, 0) is the top-left
//! cell, (1, 1) the bottom-right. Everything touchable is declared here once
//! and scaled to cells at draw time, so a resize never moves a binding.

use ratatui::layout::Rect as CellRect;
use sauce_pad::{
    control::{Button, ButtonMode, ControllerChain, Knob, TabStrip},
    synth::fx::FxParams,
    touch::Rect,
};

/// The voice pad
pub const PAD: Rect = Rect::new(0.0, 0.0, 0.68, 0.78);
/// Control panel, right of the pad
pub const PANEL: Rect = Rect::new(0.7, 0.0, 0.3, 0.78);
/// Oscilloscope strip along the bottom, not touchable
pub const SCOPE: Rect = Rect::new(0.0, 0.8, 1.0, 0.17);

const HEADER: f32 = 0.08;
const BODY_TOP: f32 = 0.12;

/// Build the control panel around the effect parameters the audio side
/// handed over.
pub fn build_controls(params: FxParams) -> ControllerChain {
    let mut chain = ControllerChain::new();
    let col = |i: f32, n: f32| PANEL.x + 0.01 + i * (PANEL.width - 0.02) / n;
    let knob_width = |n: f32| (PANEL.width - 0.02) / n - 0.01;

    let cutoff = chain.insert(Knob::new(
        "cutoff",
        Rect::new(col(0.0, 2.0), BODY_TOP, knob_width(2.0), 0.5),
        params.cutoff,
    ));
    let gain = chain.insert(Knob::new(
        "gain",
        Rect::new(col(1.0, 2.0), BODY_TOP, knob_width(2.0), 0.5),
        params.gain,
    ));

    let delay_on = chain.insert(Button::new(
        "delay",
        Rect::new(col(0.0, 1.0), BODY_TOP, knob_width(1.0), 0.1),
        params.delay_on,
        ButtonMode::Toggle,
    ));
    let delay_knobs = [
        ("mix", params.delay_mix),
        ("time", params.delay_time),
        ("feedback", params.delay_feedback),
    ];
    let mut delay = vec![delay_on];
    for (i, (label, param)) in delay_knobs.into_iter().enumerate() {
        let bounds = Rect::new(col(i as f32, 3.0), BODY_TOP + 0.14, knob_width(3.0), 0.45);
        delay.push(chain.insert(Knob::new(label, bounds, param)));
    }

    let strip = chain.insert(
        TabStrip::new(PANEL, HEADER)
            .with_tab("filter", vec![cutoff, gain])
            .with_tab("delay", delay),
    );
    chain.push_layer(strip);
    chain
}

/// Cells covered by a surface rect inside `area`.
pub fn to_cells(rect: Rect, area: CellRect) -> CellRect {
    let scale_x = |x: f32| area.x + (x * area.width as f32).round() as u16;
    let scale_y = |y: f32| area.y + (y * area.height as f32).round() as u16;

    let left = scale_x(rect.x).min(area.right());
    let top = scale_y(rect.y).min(area.bottom());
    let right = scale_x(rect.x + rect.width).min(area.right());
    let bottom = scale_y(rect.y + rect.height).min(area.bottom());
    CellRect::new(left, top, right - left, bottom - top)
}

/// Surface point at the centre of a terminal cell.
pub fn to_surface(column: u16, row: u16, area: CellRect) -> (f32, f32) {
    let width = area.width.max(1) as f32;
    let height = area.height.max(1) as f32;
    (
        (column.saturating_sub(area.x) as f32 + 0.5) / width,
        (row.saturating_sub(area.y) as f32 + 0.5) / height,
    )
}
