//! Control panel widgets

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};
use sauce_pad::control::{Button, Control, ControllerChain, Knob, TabStrip};

use super::layout::to_cells;

pub fn render_controls(frame: &mut Frame, area: Rect, chain: &ControllerChain) {
    for &layer in chain.layers() {
        match chain.get(layer) {
            Some(Control::Tabs(strip)) => render_strip(frame, area, chain, strip),
            Some(Control::Knob(knob)) => render_knob(frame, area, knob),
            Some(Control::Button(button)) => render_button(frame, area, button),
            None => {}
        }
    }
}

fn render_strip(frame: &mut Frame, area: Rect, chain: &ControllerChain, strip: &TabStrip) {
    let bounds = to_cells(strip.bounds(), area);
    frame.render_widget(Block::default().borders(Borders::ALL), bounds);

    let header = to_cells(strip.header(), area).inner(ratatui::layout::Margin::new(1, 1));
    let titles = strip.tabs().iter().map(|tab| tab.name().to_owned());
    let highlight = if strip.held().is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    };
    let tabs = Tabs::new(titles)
        .select(strip.selected())
        .highlight_style(highlight);
    frame.render_widget(tabs, header);

    for &child in strip.active_children() {
        match chain.get(child) {
            Some(Control::Knob(knob)) => render_knob(frame, area, knob),
            Some(Control::Button(button)) => render_button(frame, area, button),
            // Nested strips are not drawn
            Some(Control::Tabs(_)) | None => {}
        }
    }
}

fn render_knob(frame: &mut Frame, area: Rect, knob: &Knob) {
    let param = knob.param();
    let style = if knob.is_grabbed() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let gauge = Gauge::default()
        .block(Block::default().title(knob.label().to_owned()).borders(Borders::ALL))
        .gauge_style(style)
        .ratio(param.normalized().clamp(0.0, 1.0) as f64)
        .label(format!("{:.2}", param.get()));
    frame.render_widget(gauge, to_cells(knob.bounds(), area));
}

fn render_button(frame: &mut Frame, area: Rect, button: &Button) {
    let on = button.toggle().is_on();
    let mut style = if on {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    if button.is_pressed() {
        style = style.add_modifier(Modifier::BOLD);
    }
    let text = format!("{} {}", button.label(), if on { "on" } else { "off" });
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, to_cells(button.bounds(), area));
}
