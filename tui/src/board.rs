//! The bubble board: thoughts as positioned, draggable bubbles.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use mindsweep_engine::{App, Bounds, BubbleEntry, Hint, Point, Thought};

use crate::effects;
use crate::theme::{Glyphs, Palette, styles};

const MIN_BUBBLE_WIDTH: u16 = 8;
const MAX_BUBBLE_WIDTH: u16 = 28;
const BUBBLE_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    app.bubbles_mut().clear();

    let thoughts: Vec<Thought> = app.thoughts().to_vec();
    let dragged = app.drag().dragged();
    let interactive = app.ritual().is_inactive();

    for (index, thought) in thoughts.iter().enumerate() {
        if dragged.is_some_and(|(id, _)| id == thought.id) {
            continue; // rendered last, on top
        }

        let pop = app.ritual().pop_progress(index);
        if pop.is_some_and(|progress| progress >= 1.0) {
            continue; // popped
        }

        let mut rect = bubble_rect(thought.position, &thought.text, area);
        if let Some(progress) = pop {
            rect = effects::pop_rect(rect, progress);
        }
        let publish = interactive && pop.is_none();
        render_bubble(frame, app, thought, rect, false, publish, palette, glyphs);
    }

    if let Some((id, position)) = dragged
        && let Some(thought) = thoughts.iter().find(|thought| thought.id == id)
    {
        let rect = bubble_rect(position, &thought.text, area);
        render_bubble(frame, app, thought, rect, true, interactive, palette, glyphs);
    }
}

fn bubble_rect(position: Point, text: &str, board: Rect) -> Rect {
    let width = (text.width() as u16)
        .saturating_add(4)
        .clamp(MIN_BUBBLE_WIDTH, MAX_BUBBLE_WIDTH);
    Rect::new(position.x, position.y, width, BUBBLE_HEIGHT).intersection(board)
}

fn render_bubble(
    frame: &mut Frame,
    app: &mut App,
    thought: &Thought,
    rect: Rect,
    dragged: bool,
    publish: bool,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    if rect.width < 3 || rect.height == 0 {
        return;
    }

    let style = styles::bubble(palette, thought.category);
    let border_style = if dragged {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(style);
    let inner = block.inner(rect);

    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    if inner.height > 0 {
        let text = truncate_to_width(&thought.text, inner.width);
        frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), inner);
    }

    let remove_cell = Point::new(rect.right().saturating_sub(2), rect.y);
    overlay_glyph(frame, remove_cell, glyphs.remove, palette.text_muted);

    let (badge, badge_color) = match thought.hint {
        Hint::Keep => (Some(glyphs.hint_keep), palette.keep),
        Hint::LetGo => (Some(glyphs.hint_letgo), palette.letgo),
        Hint::None => (None, palette.text_muted),
    };
    if let Some(badge) = badge {
        let cell = Point::new(rect.x.saturating_add(1), rect.bottom().saturating_sub(1));
        overlay_glyph(frame, cell, badge, badge_color);
    }

    if publish {
        app.bubbles_mut().publish(BubbleEntry {
            id: thought.id,
            bounds: Bounds::new(rect.x, rect.y, rect.width, rect.height),
            remove_cell,
        });
    }
}

/// Write a single glyph over whatever was rendered, clip-safe.
fn overlay_glyph(frame: &mut Frame, cell: Point, glyph: &str, color: ratatui::style::Color) {
    if let Some(buffer_cell) = frame.buffer_mut().cell_mut((cell.x, cell.y)) {
        buffer_cell.set_symbol(glyph);
        buffer_cell.set_fg(color);
    }
}

fn truncate_to_width(text: &str, max_width: u16) -> String {
    let max_width = max_width as usize;
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        out.push(c);
        used += char_width;
    }
    out.push('…');
    out
}
