//! Single-line text entry state.

/// Editable text with a cursor and a history of sent entries.
///
/// The cursor is a character index, never a byte offset, so multi-byte
/// input such as `’` or emoji edits correctly.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    /// Cursor position (character index).
    pub cursor: usize,
    history: Vec<String>,
    /// Position while browsing history, counted back from the newest entry.
    history_index: Option<usize>,
    /// Input being edited before history browsing started.
    saved_input: String,
}

impl TextInputState {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of characters.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.len_chars();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    /// Remember a sent entry for Up/Down recall. Blank entries are skipped.
    ///
    /// The content itself is left alone: it stays visible until the
    /// request it belongs to succeeds.
    pub fn push_history(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if !entry.trim().is_empty() && self.history.last() != Some(&entry) {
            self.history.push(entry);
        }
        self.history_index = None;
        self.saved_input.clear();
    }

    /// Recall the previous (older) history entry.
    pub fn history_prev(&mut self) {
        let next = match self.history_index {
            None => 0,
            Some(i) => i + 1,
        };
        if next >= self.history.len() {
            return;
        }
        if self.history_index.is_none() {
            self.saved_input = self.content.clone();
        }
        self.history_index = Some(next);
        let entry = self.history[self.history.len() - 1 - next].clone();
        self.set_content(entry);
    }

    /// Recall the next (newer) history entry, or restore the saved input.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                let saved = std::mem::take(&mut self.saved_input);
                self.set_content(saved);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                let entry = self.history[self.history.len() - i].clone();
                self.set_content(entry);
            }
        }
    }
}
