/// Text-entry buffer the host edits and hands to `TypingSession::on_input`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    value: String,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    /// Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
