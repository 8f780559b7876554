// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Local draft for the one cell being edited. Positions count chars, not
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditableCell {
    draft: String,
    cursor: usize,
}

impl EditableCell {
    pub fn begin(committed: impl Into<String>) -> Self {
        let draft = committed.into();
        let cursor = draft.chars().count();
        Self { draft, cursor }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.draft.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.draft.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.draft.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.draft.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.draft.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.draft.chars().count();
    }

    /// Focus left the cell; the draft is reported whether or not it changed.
    pub fn blur(self) -> String {
        self.draft
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.draft
            .char_indices()
            .nth(char_index)
            .map_or(self.draft.len(), |(index, _)| index)
    }
}
