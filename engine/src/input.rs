//! Input modes and the quick-add draft buffer.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    QuickAdd,
}

/// Text editing with grapheme-cluster aware cursor movement.
///
/// The cursor is a byte offset that always sits on a grapheme boundary.
#[derive(Debug, Default, Clone)]
pub struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in grapheme clusters, for rendering.
    #[must_use]
    pub fn cursor_graphemes(&self) -> usize {
        self.text[..self.cursor].graphemes(true).count()
    }

    /// Text before the cursor, for display-width cursor placement.
    #[must_use]
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn enter_char(&mut self, new_char: char) {
        self.text.insert(self.cursor, new_char);
        self.cursor += new_char.len_utf8();
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Delete the grapheme before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    /// Delete trailing whitespace, then the word, before the cursor.
    pub fn delete_word_backwards(&mut self) {
        while self.prev_grapheme().is_some_and(is_whitespace) {
            self.delete_char();
        }
        while self.prev_grapheme().is_some_and(|g| !is_whitespace(g)) {
            self.delete_char();
        }
    }

    /// Byte offset of the grapheme boundary before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(index, _)| index)
    }

    /// Byte offset just past the grapheme at the cursor.
    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }

    fn prev_grapheme(&self) -> Option<&str> {
        self.text[..self.cursor].graphemes(true).next_back()
    }
}

fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}
