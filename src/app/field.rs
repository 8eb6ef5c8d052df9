//! Single-line editable text with a byte-offset cursor kept on char boundaries

use crate::messages::ui_events::EditOp;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldInput {
    value: String,
    cursor: usize,
}

impl FieldInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        FieldInput { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in chars, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Replace the contents and move the cursor to the end
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            EditOp::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                }
            }
            EditOp::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            EditOp::CursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            EditOp::CursorRight => {
                if let Some(c) = self.value[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            EditOp::Home => self.cursor = 0,
            EditOp::End => self.cursor = self.value.len(),
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> FieldInput {
        let mut field = FieldInput::default();
        for c in text.chars() {
            field.apply(EditOp::Insert(c));
        }
        field
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut field = typed("héllo");
        assert_eq!(field.value(), "héllo");
        assert_eq!(field.cursor_column(), 5);

        field.apply(EditOp::Backspace);
        field.apply(EditOp::Backspace);
        assert_eq!(field.value(), "hél");
    }

    #[test]
    fn test_cursor_moves_over_multibyte_chars() {
        let mut field = typed("aé");
        field.apply(EditOp::CursorLeft);
        assert_eq!(field.cursor_column(), 1);
        field.apply(EditOp::Insert('x'));
        assert_eq!(field.value(), "axé");
        field.apply(EditOp::Delete);
        assert_eq!(field.value(), "ax");
    }

    #[test]
    fn test_edges_are_noops() {
        let mut field = FieldInput::default();
        field.apply(EditOp::Backspace);
        field.apply(EditOp::CursorLeft);
        field.apply(EditOp::Delete);
        field.apply(EditOp::CursorRight);
        assert!(field.is_empty());

        let mut field = FieldInput::new("abc");
        field.apply(EditOp::Home);
        field.apply(EditOp::Insert('>'));
        field.apply(EditOp::End);
        field.apply(EditOp::Insert('<'));
        assert_eq!(field.value(), ">abc<");
    }
}
