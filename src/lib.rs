// Library surface for headless/integration tests and the binary.
// Terminal rendering lives in main.rs/ui.rs only.
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
pub mod quote;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod word_pool;

pub use error::{Error, Result};
pub use session::{InputOutcome, Phase, SessionResult, TypingSession};
pub use word_pool::{WordList, WordPool};
