mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::{error, info};
use typespeed::{
    config::{Config, ConfigStore, FileConfigStore},
    input::InputLine,
    logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    InputOutcome, Phase, TypingSession, WordList, WordPool,
};

/// one-minute typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test: type the words shown, one space after each, until the clock runs out. Reports WPM, accuracy and correct/wrong word counts."
)]
pub struct Cli {
    /// number of words shown per quote
    #[clap(short = 'w', long)]
    words_per_quote: Option<usize>,

    /// length of the test in seconds
    #[clap(short = 's', long)]
    duration_secs: Option<u32>,

    /// embedded word list to draw from
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<WordList>,

    /// read whitespace-separated words from this file instead of an embedded list
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// log verbosity: -v info, -vv debug, -vvv trace
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// log file (defaults to the local state dir when -v is given)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply(&self, cfg: Config) -> Config {
        Config {
            words_per_quote: self.words_per_quote.unwrap_or(cfg.words_per_quote),
            duration_secs: self.duration_secs.unwrap_or(cfg.duration_secs),
            word_list: self.word_list.unwrap_or(cfg.word_list),
            words_file: self.words_file.clone().or(cfg.words_file),
        }
        .sanitized()
    }

    fn log_path(&self) -> Option<PathBuf> {
        match (&self.log_file, self.verbose) {
            (Some(path), _) => Some(path.clone()),
            (None, 0) => None,
            (None, _) => logging::default_log_path(),
        }
    }
}

fn load_pool(cfg: &Config) -> typespeed::Result<WordPool> {
    match &cfg.words_file {
        Some(path) => WordPool::from_file(path),
        None => WordPool::embedded(cfg.word_list),
    }
}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub input: InputLine,
}

impl App {
    pub fn new(session: TypingSession) -> Self {
        Self {
            session,
            input: InputLine::new(),
        }
    }

    pub fn type_char(&mut self, c: char) -> InputOutcome {
        if self.session.phase() == Phase::Finished {
            return InputOutcome::Ignored;
        }

        self.input.push(c);
        let outcome = self.session.on_input(self.input.value());
        if matches!(outcome, InputOutcome::Committed { .. })
            || self.session.phase() == Phase::Finished
        {
            self.input.clear();
        }
        outcome
    }

    /// Deleting is an input event too; an empty line has nothing to delete.
    pub fn backspace(&mut self) {
        if self.session.phase() == Phase::Finished {
            return;
        }
        if self.input.backspace() {
            self.session.on_input(self.input.value());
            if self.session.phase() == Phase::Finished {
                self.input.clear();
            }
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.session.poll(now).is_some() {
            self.input.clear();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_path() {
        logging::init_logging(cli.verbose, &path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "settings saved");
    }

    let pool = match load_pool(&config) {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "word list unavailable");
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, e).exit();
        }
    };
    info!(list = pool.name(), words = pool.len(), "word list loaded");

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TypingSession::new(pool, config.session_config()));
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Tab => app.reset(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char('r') if app.session.phase() == Phase::Finished => app.reset(),
        // ctrl/alt chords are commands, not text
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            app.type_char(c);
        }
        _ => {}
    }
    Flow::Continue
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
        // the clock is polled on every pass, keys included
        app.on_tick(Instant::now());
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
