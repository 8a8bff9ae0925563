//! TUI rendering for Mindsweep using ratatui.
//!
//! Rendering is read-only against the engine except for the per-frame
//! geometry it republishes: the board area, zone bounds, and bubble bounds
//! the drag controller hit-tests against.

mod board;
mod effects;
mod header;
mod input;
mod ritual_view;
mod theme;
mod zones;

pub use effects::pop_rect;
pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, sparkle_frame, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use mindsweep_engine::{App, Bounds, InputMode};

use self::ritual_view::centered_rect;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let area = frame.area();
    app.set_viewport(to_bounds(area));

    // Clear with background color
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(3),  // Header
        Constraint::Min(1),     // Board
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    header::draw(frame, app, chunks[0], &palette, &glyphs);

    let board = chunks[1];
    app.set_board(to_bounds(board));
    zones::draw(frame, app, board, &palette, &glyphs);
    board::draw(frame, app, board, &palette, &glyphs);

    draw_status_bar(frame, app, chunks[2], &palette);
    draw_speech_panel(frame, app, board, &palette, &glyphs);
    draw_instructions(frame, app, board, &palette, &glyphs);

    ritual_view::draw(frame, app, &palette, &glyphs);

    if app.welcome_active() {
        draw_welcome(frame, area, &palette, &glyphs);
    }
}

fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.width, rect.height)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let hints = if app.ritual().is_confirming() {
        "y confirm · n cancel"
    } else if app.ritual().is_animating() {
        "clearing..."
    } else {
        match app.input_mode() {
            InputMode::Normal => "drag bubbles with the mouse · i add · m mic · c clear mind · q quit",
            InputMode::QuickAdd => "enter add · esc cancel",
        }
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, styles::muted(palette))))
            .style(Style::default().bg(palette.bg_panel)),
        area,
    );
}

/// Live transcript while listening, or the last speech error.
fn draw_speech_panel(
    frame: &mut Frame,
    app: &App,
    board: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let speech = app.speech();
    let (title, title_style, body) = if let Some(error) = speech.error() {
        (
            format!(" {} mic ", glyphs.mic_off),
            styles::error(palette),
            error.to_string(),
        )
    } else if speech.listening() {
        let interim = speech.interim_transcript();
        let body = if interim.is_empty() {
            "say something...".to_string()
        } else {
            interim.to_string()
        };
        (
            format!(" {} listening ", glyphs.mic_on),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
            body,
        )
    } else {
        return;
    };

    let width = 34.min(board.width);
    let height = 4.min(board.height);
    if width < 8 || height < 3 {
        return;
    }
    let area = Rect {
        x: board.right().saturating_sub(width + 1),
        y: board.y + 1,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_popup))
        .title(Span::styled(title, title_style));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(body)
            .style(Style::default().fg(palette.text_primary))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// First-run nudge shown while the board is empty.
fn draw_instructions(
    frame: &mut Frame,
    app: &App,
    board: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let idle = !app.welcome_active()
        && app.store().is_empty()
        && app.ritual().is_inactive()
        && !app.speech().listening();
    if !idle {
        return;
    }

    let text = format!(
        "{} press m to speak, or i to type your thoughts",
        glyphs.mic_off
    );
    let width = (text.chars().count() as u16 + 4).min(board.width);
    let height = 3;
    if width < 8 || board.height < 6 {
        return;
    }
    let area = Rect {
        x: board.x + (board.width - width) / 2,
        y: board.bottom().saturating_sub(height + 1),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_popup));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, styles::muted(palette)))).centered(),
        inner,
    );
}

fn draw_welcome(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        area,
    );

    let panel = centered_rect(area, 52, 7);
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Mindsweep {}", glyphs.blossom, glyphs.blossom),
            styles::title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Breathe in... breathe out... speak freely.",
            Style::default().fg(palette.text_primary),
        )),
        Line::from(""),
        Line::from(Span::styled("press any key to begin", styles::muted(palette))),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), panel);
}
