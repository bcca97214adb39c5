use std::fmt;
use std::io::Error;

use derive_setters::Setters;
use tracing_error::SpanTrace;

pub const HELP_NORMAL: &str = "← → / h l: Navigate | s: Toggle select | Enter: Zoom | f: Filter | c: Clear filter | o: Export | q: Quit";
pub const HELP_FILTER: &str = "Type to search | Esc: Cancel | Enter: Apply | Ctrl+O: Export";
pub const HELP_ZOOM: &str = "q: Exit zoom | o: Export";

/// Events the model reacts to. Key codes are mapped onto these by the
/// controller, the model never sees a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    Exit,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    Filter,
    ClearFilter,
    ToggleSelection,
    Enter,
    Cancel,
    Backspace,
    Input(char),
    Export,
    Resize(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Normal,
    Zoom,
    Filter,
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct TableConfig {
    /// Grow the focused column when it has truncated cells.
    pub auto_expand: bool,
    pub event_poll_time: u64,
    /// Terminal size to use when it cannot be queried.
    pub fallback_size: (usize, usize),
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            auto_expand: false,
            event_poll_time: 100,
            fallback_size: (80, 24),
        }
    }
}

#[derive(Debug)]
pub enum TVError {
    IoError(Error, SpanTrace),
    PathExpansion(String),
    LoggingSetup(String),
    NoInput,
}

impl fmt::Display for TVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TVError::IoError(err, span_trace) => write!(f, "{err}\n{span_trace}"),
            TVError::PathExpansion(msg) => write!(f, "could not expand path: {msg}"),
            TVError::LoggingSetup(msg) => write!(f, "could not set up logging: {msg}"),
            TVError::NoInput => write!(f, "no input, pipe a table into tablefy or pass a file"),
        }
    }
}

impl std::error::Error for TVError {}

impl From<Error> for TVError {
    fn from(err: Error) -> Self {
        TVError::IoError(err, SpanTrace::capture())
    }
}

impl<E: fmt::Display> From<shellexpand::LookupError<E>> for TVError {
    fn from(err: shellexpand::LookupError<E>) -> Self {
        TVError::PathExpansion(err.to_string())
    }
}
