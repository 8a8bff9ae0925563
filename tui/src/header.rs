//! Header bar: title, quick-add entry, mic state.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use mindsweep_engine::{App, InputMode};

use crate::theme::{Glyphs, Palette, styles};

pub fn draw(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let chunks = Layout::horizontal([
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("Mindsweep", styles::title(palette)))),
        chunks[0],
    );

    draw_quick_add(frame, app, chunks[1], palette);
    draw_mic_state(frame, app, chunks[2], palette, glyphs);
}

fn draw_quick_add(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = if app.input_mode() == InputMode::QuickAdd {
        let draft = app.quick_add();
        let before = draft.before_cursor();
        let after = &draft.text()[before.len()..];
        let (at_cursor, rest) = match after.chars().next() {
            Some(c) => (c.to_string(), &after[c.len_utf8()..]),
            None => (" ".to_string(), ""),
        };

        Line::from(vec![
            Span::styled("add: ", styles::muted(palette)),
            Span::styled(before.to_string(), Style::default().fg(palette.text_primary)),
            Span::styled(at_cursor, Style::default().add_modifier(Modifier::REVERSED)),
            Span::styled(rest.to_string(), Style::default().fg(palette.text_primary)),
        ])
    } else {
        Line::from(Span::styled(
            "(i) quick add a thought   (c) clear mind",
            styles::muted(palette),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_mic_state(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let speech = app.speech();
    let line = if !speech.available() {
        Line::from(Span::styled(
            format!("{} no mic", glyphs.mic_off),
            styles::muted(palette),
        ))
    } else if speech.listening() {
        Line::from(Span::styled(
            format!("{} listening", glyphs.mic_on),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("{} mic (m)", glyphs.mic_off),
            styles::muted(palette),
        ))
    };

    frame.render_widget(Paragraph::new(line).right_aligned(), area);
}
