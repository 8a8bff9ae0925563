//! The clear-mind ritual overlay: confirmation modal, then the particle
//! field while bubbles pop.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use mindsweep_engine::App;

use crate::theme::{Glyphs, Palette, sparkle_frame, styles};

const CONFIRM_WIDTH: u16 = 48;
const CONFIRM_HEIGHT: u16 = 9;
const TWINKLE_FRAME_MS: u128 = 250;

pub fn draw(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    if app.ritual().is_confirming() {
        draw_confirm(frame, palette, glyphs);
    } else if app.ritual().is_animating() {
        draw_animation(frame, app, palette, glyphs);
    }
}

fn draw_confirm(frame: &mut Frame, palette: &Palette, glyphs: &Glyphs) {
    let area = centered_rect(frame.area(), CONFIRM_WIDTH, CONFIRM_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg_popup))
        .title(Span::styled(
            format!(" {} clear your mind? ", glyphs.blossom),
            styles::title(palette),
        ));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ready to let go?",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This clears every thought and starts fresh.",
            styles::muted(palette),
        )),
        Line::from(Span::styled("Nothing is saved.", styles::muted(palette))),
        Line::from(""),
        Line::from(vec![
            Span::styled("(y) let go", Style::default().fg(palette.letgo)),
            Span::styled("      ", styles::muted(palette)),
            Span::styled("(n) not yet", Style::default().fg(palette.keep)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), inner);
}

fn draw_animation(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let options = app.ui_options();
    let elapsed = app.ritual().elapsed();

    // Sparkle field over the whole viewport; bubbles keep popping beneath.
    for particle in app.ritual().particles() {
        let tick = ((elapsed + particle.phase).as_millis() / TWINKLE_FRAME_MS) as usize;
        let glyph = sparkle_frame(tick, options);
        if let Some(cell) = frame
            .buffer_mut()
            .cell_mut((particle.position.x, particle.position.y))
        {
            cell.set_symbol(glyph);
            cell.set_fg(palette.sparkle);
        }
    }

    let area = centered_rect(frame.area(), 40, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg_popup));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} clearing your mind {}", glyphs.blossom, glyphs.blossom),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Breathe in... breathe out...",
            styles::muted(palette),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), inner);
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
