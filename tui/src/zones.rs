//! The two drop zones: label, live count, highlight.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use mindsweep_engine::{App, Bounds, ZoneId};

use crate::theme::{Glyphs, Palette, styles};

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    // Keep registers first: registration order is drop priority.
    draw_zone(frame, app, ZoneId::Keep, halves[0], palette, glyphs);
    draw_zone(frame, app, ZoneId::LetGo, halves[1], palette, glyphs);
}

fn draw_zone(
    frame: &mut Frame,
    app: &mut App,
    zone: ZoneId,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    app.zones_mut()
        .publish(zone, Bounds::new(area.x, area.y, area.width, area.height));

    let (accent, tint, badge, description) = match zone {
        ZoneId::Keep => (
            palette.keep,
            palette.keep_tint,
            glyphs.hint_keep,
            "tasks and ideas to remember",
        ),
        ZoneId::LetGo => (
            palette.letgo,
            palette.letgo_tint,
            glyphs.hint_letgo,
            "worries and loops to release",
        ),
    };

    let highlighted = app.highlighted_zone() == Some(zone);
    let border_style = if highlighted {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(tint))
        .title(Span::styled(
            format!(" {} {} ", zone.label(), badge),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    // Count + description hug the bottom edge, out of the bubbles' way.
    let count = app.store().count_in(zone.category());
    let noun = if count == 1 { "thought" } else { "thoughts" };
    let footer = Rect {
        x: inner.x,
        y: inner.y + inner.height - 2,
        width: inner.width,
        height: 2,
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("{count} {noun}"),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(description, styles::muted(palette))),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), footer);
}
