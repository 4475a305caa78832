//! Triggered oscilloscope
//!
//! Shows a fixed window starting at the first rising zero crossing, so a
//! steady tone stands still instead of scrolling.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples drawn per frame
pub const WINDOW: usize = 512;

/// Index of the first rising zero crossing that leaves a full window after it.
fn trigger(samples: &[f32]) -> usize {
    let last = samples.len().saturating_sub(WINDOW);
    samples
        .windows(2)
        .take(last)
        .position(|pair| pair[0] <= 0.0 && pair[1] > 0.0)
        .map_or(last, |i| i + 1)
}

pub fn render_scope(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let start = trigger(samples);
    let data: Vec<(f64, f64)> = samples[start..]
        .iter()
        .take(WINDOW)
        .enumerate()
        .map(|(i, &s)| (i as f64, s as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Output ").borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, WINDOW as f64]))
        .y_axis(Axis::default().bounds([-1.0, 1.0]));

    frame.render_widget(chart, area);
}
