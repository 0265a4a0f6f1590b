use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static WORDS_DIR: Dir = include_dir!("src/words");

/// Word lists compiled into the binary
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum WordList {
    #[default]
    English,
    Code,
}

impl WordList {
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.to_string().to_lowercase())
    }
}

/// The candidate words a quote is drawn from. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPool {
    name: String,
    words: Vec<String>,
}

impl WordPool {
    /// Split a whitespace-separated text blob into a pool.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();

        if words.is_empty() {
            return Err(Error::EmptyWordList { name });
        }

        Ok(Self { name, words })
    }

    pub fn embedded(list: WordList) -> Result<Self> {
        let file_name = list.file_name();
        let file = WORDS_DIR
            .get_file(&file_name)
            .ok_or_else(|| Error::MissingWordList(file_name.clone()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| Error::MissingWordList(file_name.clone()))?;

        Self::parse(list.to_string().to_lowercase(), text)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::WordSource {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path.display().to_string(), &text)
    }

    /// Uniform shuffle-and-take: up to `count` distinct entries in random order.
    ///
    /// Entries are distinct by position, so a pool with repeated words may
    /// yield the same word twice. Asking for more than the pool holds returns
    /// the whole pool shuffled.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        self.words.choose_multiple(rng, count).cloned().collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
