use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::session::{SessionConfig, DEFAULT_DURATION_SECS, DEFAULT_WORDS_PER_QUOTE};
use crate::word_pool::WordList;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words_per_quote: usize,
    pub duration_secs: u32,
    pub word_list: WordList,
    pub words_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_per_quote: DEFAULT_WORDS_PER_QUOTE,
            duration_secs: DEFAULT_DURATION_SECS,
            word_list: WordList::English,
            words_file: None,
        }
    }
}

impl Config {
    /// Zero-sized quotes or sessions are bumped to one.
    pub fn sanitized(mut self) -> Self {
        self.words_per_quote = self.words_per_quote.max(1);
        self.duration_secs = self.duration_secs.max(1);
        self
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            words_per_quote: self.words_per_quote,
            duration_secs: self.duration_secs,
            ..SessionConfig::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typespeed") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typespeed_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable config falls back to defaults.
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg.sanitized(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            words_per_quote: 8,
            duration_secs: 30,
            word_list: WordList::Code,
            words_file: Some(PathBuf::from("/tmp/words.txt")),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "duration_secs": 15, "word_list": "code" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.duration_secs, 15);
        assert_eq!(cfg.word_list, WordList::Code);
        assert_eq!(cfg.words_per_quote, DEFAULT_WORDS_PER_QUOTE);
        assert_eq!(cfg.words_file, None);
    }

    #[test]
    fn zero_values_are_sanitized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "words_per_quote": 0, "duration_secs": 0 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.words_per_quote, 1);
        assert_eq!(cfg.duration_secs, 1);
    }

    #[test]
    fn session_config_carries_sizes() {
        let cfg = Config {
            words_per_quote: 7,
            duration_secs: 45,
            ..Config::default()
        };
        let sc = cfg.session_config();
        assert_eq!(sc.words_per_quote, 7);
        assert_eq!(sc.duration_secs, 45);
        assert_eq!(sc.tick_period, SessionConfig::default().tick_period);
    }
}
