use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Backspace,
    DeleteWord,
    Retry,
    New,
    Quit,
    Ignore,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => KeyAction::Quit,
            KeyCode::Char('w') | KeyCode::Char('h') if ctrl => KeyAction::DeleteWord,
            KeyCode::Backspace if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                KeyAction::DeleteWord
            }
            KeyCode::Char(_) if ctrl => KeyAction::Ignore,
            KeyCode::Char(c) => KeyAction::Insert(c),
            KeyCode::Enter => KeyAction::Insert('\n'),
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Left => KeyAction::Retry,
            KeyCode::Right => KeyAction::New,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::Ignore,
        }
    }
}

/// The text field the user types into. Each edit yields the new full text,
/// which is what the evaluator consumes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply an editing action. Returns true if the text changed.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Insert(c) => {
                self.text.push(c);
                true
            }
            KeyAction::Backspace => self.text.pop().is_some(),
            KeyAction::DeleteWord => self.delete_word(),
            _ => false,
        }
    }

    /// Drop trailing whitespace and then the word before it
    fn delete_word(&mut self) -> bool {
        let before = self.text.len();
        let trimmed = self.text.trim_end().len();
        self.text.truncate(trimmed);

        let cut = self
            .text
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(0);
        self.text.truncate(cut);

        self.text.len() != before
    }
}
