//! Color theme and glyphs for the Mindsweep TUI.
//!
//! A dusk-pastel palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use mindsweep_engine::UiOptions;

/// Dusk-pastel color constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG: Color = Color::Rgb(30, 26, 38);
    pub const BG_PANEL: Color = Color::Rgb(42, 36, 52);
    pub const BG_POPUP: Color = Color::Rgb(56, 48, 70);
    pub const BG_BUBBLE: Color = Color::Rgb(70, 62, 88);
    pub const BORDER: Color = Color::Rgb(98, 86, 116);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(238, 232, 242);
    pub const TEXT_MUTED: Color = Color::Rgb(152, 142, 164);

    // === Zone colors ===
    pub const KEEP: Color = Color::Rgb(142, 202, 164);
    pub const KEEP_TINT: Color = Color::Rgb(38, 52, 44);
    pub const LETGO: Color = Color::Rgb(232, 152, 182);
    pub const LETGO_TINT: Color = Color::Rgb(56, 38, 48);

    // === Accents ===
    pub const LAVENDER: Color = Color::Rgb(182, 162, 222);
    pub const SPARKLE: Color = Color::Rgb(244, 222, 170);
    pub const ERROR: Color = Color::Rgb(240, 112, 112);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_popup: Color,
    pub bg_bubble: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub keep: Color,
    pub keep_tint: Color,
    pub letgo: Color,
    pub letgo_tint: Color,
    pub accent: Color,
    pub sparkle: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: colors::BG,
            bg_panel: colors::BG_PANEL,
            bg_popup: colors::BG_POPUP,
            bg_bubble: colors::BG_BUBBLE,
            border: colors::BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            keep: colors::KEEP,
            keep_tint: colors::KEEP_TINT,
            letgo: colors::LETGO,
            letgo_tint: colors::LETGO_TINT,
            accent: colors::LAVENDER,
            sparkle: colors::SPARKLE,
            error: colors::ERROR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            bg_panel: Color::Black,
            bg_popup: Color::Black,
            bg_bubble: Color::DarkGray,
            border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            keep: Color::Green,
            keep_tint: Color::Black,
            letgo: Color::Magenta,
            letgo_tint: Color::Black,
            accent: Color::Cyan,
            sparkle: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for badges and decorations.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub mic_on: &'static str,
    pub mic_off: &'static str,
    pub hint_keep: &'static str,
    pub hint_letgo: &'static str,
    pub remove: &'static str,
    pub blossom: &'static str,
    pub sparkle_frames: &'static [&'static str],
}

const SPARKLE_FRAMES: &[&str] = &["✦", "✧", "·"];
const SPARKLE_FRAMES_ASCII: &[&str] = &["*", "+", "."];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            mic_on: "((o))",
            mic_off: "(o)",
            hint_keep: "+",
            hint_letgo: "~",
            remove: "x",
            blossom: "@",
            sparkle_frames: SPARKLE_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            mic_on: "◉",
            mic_off: "○",
            hint_keep: "♥",
            hint_letgo: "≈",
            remove: "✕",
            blossom: "❀",
            sparkle_frames: SPARKLE_FRAMES,
        }
    }
}

/// A sparkle frame for the given animation tick. Static under reduced motion.
#[must_use]
pub fn sparkle_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).sparkle_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};
    use mindsweep_engine::Category;

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Bubble body style for a thought's category.
    #[must_use]
    pub fn bubble(palette: &Palette, category: Category) -> Style {
        let base = Style::default().bg(palette.bg_bubble);
        match category {
            Category::Unassigned => base.fg(palette.text_primary),
            Category::Keep => base.fg(palette.keep),
            Category::LetGo => base.fg(palette.letgo),
        }
    }
}
