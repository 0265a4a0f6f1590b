use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::display::{format_clock, DisplayUpdate, DisplayWord};
use crate::quote::Quote;
use crate::timer::{Countdown, TICK_PERIOD};
use crate::word_pool::WordPool;

pub const DEFAULT_WORDS_PER_QUOTE: usize = 5;
pub const DEFAULT_DURATION_SECS: u32 = 60;
/// Characters counted as one word for WPM
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub words_per_quote: usize,
    pub duration_secs: u32,
    pub tick_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            words_per_quote: DEFAULT_WORDS_PER_QUOTE,
            duration_secs: DEFAULT_DURATION_SECS,
            tick_period: TICK_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub seconds_remaining: u32,
    pub word_index: usize,
    pub correct_words: u32,
    pub wrong_words: u32,
    pub characters_typed: u32,
    pub correct_keystrokes: u32,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            seconds_remaining: duration_secs,
            word_index: 0,
            correct_words: 0,
            wrong_words: 0,
            characters_typed: 0,
            correct_keystrokes: 0,
            phase: Phase::Idle,
        }
    }

    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }
}

/// Final score, fixed once the clock runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    pub wpm: u32,
    pub keystrokes: u32,
    /// Percentage; 0.0 when nothing was typed
    pub accuracy: f64,
    pub correct_words: u32,
    pub wrong_words: u32,
}

impl SessionResult {
    pub fn from_state(state: &SessionState, duration_secs: u32) -> Self {
        let minutes = f64::from(duration_secs.max(1)) / 60.0;
        let chars = f64::from(state.characters_typed);

        let accuracy = if state.characters_typed == 0 {
            0.0
        } else {
            f64::from(state.correct_keystrokes) / chars * 100.0
        };

        Self {
            wpm: (chars / CHARS_PER_WORD / minutes).round() as u32,
            keystrokes: state.characters_typed,
            accuracy,
            correct_words: state.correct_words,
            wrong_words: state.wrong_words,
        }
    }
}

/// What the host should do with its input line after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Session finished; input is disabled
    Ignored,
    /// Word still in progress; `on_track` is the live prefix match
    Pending { on_track: bool },
    /// A space completed the word; clear the input line
    Committed { correct: bool, new_quote: bool },
}

/// One timed typing test: quote, counters, clock, and result
#[derive(Debug)]
pub struct TypingSession {
    pool: WordPool,
    config: SessionConfig,
    rng: StdRng,
    quote: Quote,
    state: SessionState,
    countdown: Countdown,
    active_typo: bool,
    result: Option<SessionResult>,
}

impl TypingSession {
    pub fn new(pool: WordPool, config: SessionConfig) -> Self {
        Self::with_rng(pool, config, StdRng::from_entropy())
    }

    pub fn with_rng(pool: WordPool, mut config: SessionConfig, rng: StdRng) -> Self {
        config.words_per_quote = config.words_per_quote.max(1);
        config.duration_secs = config.duration_secs.max(1);

        let mut session = Self {
            countdown: Countdown::new(config.tick_period),
            state: SessionState::new(config.duration_secs),
            quote: Quote::new(Vec::new()),
            active_typo: false,
            result: None,
            pool,
            config,
            rng,
        };
        session.start();
        session
    }

    /// Fresh state and quote. The clock stays disarmed until the first input.
    pub fn start(&mut self) {
        if self.countdown.cancel() {
            debug!("disarmed stale countdown on start");
        }
        self.state = SessionState::new(self.config.duration_secs);
        self.result = None;
        self.active_typo = false;
        self.next_quote();
    }

    pub fn reset(&mut self) {
        info!(phase = %self.state.phase, "session reset");
        self.start();
    }

    pub fn on_input(&mut self, raw: &str) -> InputOutcome {
        self.on_input_at(raw, Instant::now())
    }

    /// Handles one value-changed event of the input line.
    ///
    /// Ticks already due at `now` fire first; input arriving after the clock
    /// ran out is dropped.
    pub fn on_input_at(&mut self, raw: &str, now: Instant) -> InputOutcome {
        if self.state.phase == Phase::Finished {
            return InputOutcome::Ignored;
        }
        if self.poll(now).is_some() {
            debug!("input arrived after the deadline");
            return InputOutcome::Ignored;
        }

        let Some(target) = self.quote.word(self.state.word_index).map(str::to_owned) else {
            return InputOutcome::Ignored;
        };

        let on_track = target.starts_with(raw);
        if on_track {
            self.state.correct_keystrokes += 1;
        }
        self.state.characters_typed += 1;
        self.active_typo = !on_track;

        let outcome = if raw.ends_with(' ') {
            self.commit_word(raw.trim(), &target)
        } else {
            InputOutcome::Pending { on_track }
        };

        if self.state.phase == Phase::Idle {
            match self.countdown.start(now) {
                Ok(()) => {
                    self.state.phase = Phase::Running;
                    info!(duration_secs = self.config.duration_secs, "session started");
                }
                Err(e) => warn!(error = %e, "countdown not started"),
            }
        }

        outcome
    }

    fn commit_word(&mut self, typed: &str, target: &str) -> InputOutcome {
        let correct = typed == target;
        let idx = self.state.word_index;

        self.quote.mark(idx, correct);
        if correct {
            self.state.correct_words += 1;
        } else {
            self.state.wrong_words += 1;
        }
        debug!(word = target, typed, correct, "word committed");

        self.active_typo = false;
        self.state.word_index += 1;

        let new_quote = self.state.word_index == self.quote.len();
        if new_quote {
            self.next_quote();
        } else {
            self.quote.activate(self.state.word_index);
        }

        InputOutcome::Committed { correct, new_quote }
    }

    fn next_quote(&mut self) {
        let words = self.pool.draw(&mut self.rng, self.config.words_per_quote);
        self.quote = Quote::new(words);
        self.state.word_index = 0;
        debug!(quote = %self.quote.text(), "quote drawn");
    }

    /// One period of the session clock. Returns the result when time runs out.
    pub fn tick(&mut self) -> Option<SessionResult> {
        if !self.state.running() {
            return None;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining == 0 {
            return Some(self.finish());
        }
        None
    }

    /// Fires every tick that came due by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<SessionResult> {
        if !self.state.running() {
            return None;
        }

        for _ in 0..self.countdown.due(now) {
            if let Some(result) = self.tick() {
                return Some(result);
            }
        }
        None
    }

    fn finish(&mut self) -> SessionResult {
        self.countdown.cancel();
        self.state.phase = Phase::Finished;
        self.active_typo = false;

        let result = SessionResult::from_state(&self.state, self.config.duration_secs);
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            keystrokes = result.keystrokes,
            correct_words = result.correct_words,
            wrong_words = result.wrong_words,
            "session finished"
        );
        self.result = Some(result);
        result
    }

    pub fn display(&self) -> DisplayUpdate {
        let finished = self.state.phase == Phase::Finished;
        let words = if finished {
            Vec::new()
        } else {
            self.quote
                .entries()
                .map(|(text, status)| DisplayWord {
                    text: text.to_owned(),
                    status,
                })
                .collect()
        };

        DisplayUpdate {
            words,
            active_typo: self.active_typo,
            timer_text: format_clock(self.state.seconds_remaining),
            result: self.result,
            input_enabled: !finished,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn active_word(&self) -> Option<&str> {
        self.quote.word(self.state.word_index)
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }
}
