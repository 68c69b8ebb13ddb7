use thiserror::Error;

/// All errors produced by signscribe-core.
#[derive(Debug, Error)]
pub enum SignscribeError {
    #[error("landmark set must hold exactly 21 points, got {0}")]
    LandmarkCount(usize),

    #[error("landmark {index} has a non-finite coordinate")]
    LandmarkNotFinite { index: usize },

    #[error("group score vector must hold exactly 8 probabilities, got {0}")]
    ScoreVectorLength(usize),

    #[error("coarse group index out of range: ({0}, {1})")]
    InvalidGroupIndex(usize, usize),

    #[error("dictionary error: {0}")]
    Dictionary(String),

    #[error("suggestion index {0} is out of range (0..=3)")]
    SuggestionIndex(usize),

    #[error("suggestion slot {0} is blank")]
    BlankSuggestion(usize),

    #[error("suggestion worker is gone")]
    WorkerDisconnected,

    #[error("config error: {0}")]
    Config(String),

    #[error("engine is already running")]
    AlreadyRunning,

    #[error("engine is not running")]
    NotRunning,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SignscribeError>;

/// Per-tick conditions the session recovers from locally. They shape the
/// tick's output record but never escape `Session::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickIssue {
    /// No landmarks this tick; drives the hand-loss transition.
    InputUnavailable,
    LowConfidence,
    InvalidGroupIndex,
    /// Wrong landmark count, non-finite coordinates, or a bad score vector.
    MalformedInput,
    SuggestionUnavailable,
    /// Dropped by the frame-rate governor.
    FrameSkipped,
}

impl TickIssue {
    /// Whether the output record carries a diagnostic for this issue.
    pub fn is_reported(self) -> bool {
        !matches!(self, TickIssue::InputUnavailable | TickIssue::LowConfidence)
    }
}
