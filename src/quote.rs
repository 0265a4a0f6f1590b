use itertools::Itertools;

/// Per-word display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum WordStatus {
    Neutral,
    Active,
    Correct,
    Incorrect,
}

/// The batch of words currently being typed
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    words: Vec<String>,
    statuses: Vec<WordStatus>,
}

impl Quote {
    /// The first word starts out active.
    pub fn new(words: Vec<String>) -> Self {
        let mut statuses = vec![WordStatus::Neutral; words.len()];
        if let Some(first) = statuses.first_mut() {
            *first = WordStatus::Active;
        }
        Self { words, statuses }
    }

    pub fn word(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn status(&self, idx: usize) -> Option<WordStatus> {
        self.statuses.get(idx).copied()
    }

    pub fn mark(&mut self, idx: usize, correct: bool) {
        if let Some(status) = self.statuses.get_mut(idx) {
            *status = if correct {
                WordStatus::Correct
            } else {
                WordStatus::Incorrect
            };
        }
    }

    pub fn activate(&mut self, idx: usize) {
        if let Some(status) = self.statuses.get_mut(idx) {
            *status = WordStatus::Active;
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, WordStatus)> + '_ {
        self.words
            .iter()
            .map(String::as_str)
            .zip(self.statuses.iter().copied())
    }

    /// Words joined by single spaces, as displayed
    pub fn text(&self) -> String {
        self.words.iter().join(" ")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
