//! Minimal single-line text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    /// A field whose contents render as bullets.
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Text to draw: the value, or one bullet per char when masked.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::default();
        for c in "abc".chars() {
            assert!(field.handle_key(key(KeyCode::Char(c))));
        }
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "ab");
        assert!(!field.handle_key(key(KeyCode::Enter)));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = TextField::default();
        field.set("hello");
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_masked_display() {
        let mut field = TextField::masked();
        field.insert_str("pw\n1");
        assert_eq!(field.value(), "pw1");
        assert_eq!(field.display(), "•••");
    }
}
