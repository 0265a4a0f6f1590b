use crate::quote::WordStatus;
use crate::session::SessionResult;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWord {
    pub text: String,
    pub status: WordStatus,
}

/// Everything a presentation layer needs to draw the session
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate {
    /// Empty once the session has finished
    pub words: Vec<DisplayWord>,
    /// Live feedback: the input so far is not a prefix of the active word
    pub active_typo: bool,
    pub timer_text: String,
    pub result: Option<SessionResult>,
    pub input_enabled: bool,
}

/// MM:SS
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
