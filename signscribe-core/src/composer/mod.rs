//! Committed symbols and control edges → transcript mutations.
//!
//! ## Per-tick order
//!
//! ```text
//! stabilizer commit? ──► append letter (unless already trailing)
//! control rising edge? ──► CONFIRM lookback / DOUBLE_SPACE
//! prev_symbol = token; ring.push(token)
//! ```
//!
//! Transitions read the ring *before* the current token is pushed, so a
//! CONFIRM lookback of 2 lands on the third-newest earlier tick.

pub mod ring;

pub use ring::HistoryRing;

use tracing::{debug, info};

use crate::stabilizer::StabilizerOutcome;
use crate::symbol::SymbolToken;
use crate::thresholds::CONFIRM_LOOKBACK;

/// Mutable transcript fields owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptState {
    pub sentence: String,
    /// Last displayed symbol.
    pub current_symbol: SymbolToken,
    /// Previous tick's resolved token, for edge detection.
    pub prev_symbol: SymbolToken,
}

impl TranscriptState {
    pub fn with_sentence(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            ..Self::default()
        }
    }

    /// Suffix of `sentence` after the last space.
    pub fn current_word(&self) -> &str {
        &self.sentence[self.word_start()..]
    }

    /// Replace [`current_word`](Self::current_word), leaving everything up to
    /// and including the last space untouched.
    pub fn replace_current_word(&mut self, replacement: &str) {
        let start = self.word_start();
        self.sentence.truncate(start);
        self.sentence.push_str(replacement);
    }

    fn word_start(&self) -> usize {
        self.sentence.rfind(' ').map_or(0, |i| i + 1)
    }
}

/// What one tick did to the transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    /// `sentence` changed.
    pub mutated: bool,
    pub committed: Option<char>,
    /// Control token whose rising edge fired this tick.
    pub edge: Option<SymbolToken>,
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    state: TranscriptState,
    ring: HistoryRing,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: TranscriptState) -> Self {
        Self {
            state,
            ring: HistoryRing::new(),
        }
    }

    pub fn state(&self) -> &TranscriptState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TranscriptState {
        &mut self.state
    }

    pub fn ring(&self) -> &HistoryRing {
        &self.ring
    }

    pub fn current_symbol(&self) -> SymbolToken {
        self.state.current_symbol
    }

    /// Apply one hand-present tick.
    pub fn apply(&mut self, token: SymbolToken, outcome: StabilizerOutcome) -> Composition {
        let mut out = Composition::default();

        if let StabilizerOutcome::Commit(letter) = outcome {
            self.state.current_symbol = SymbolToken::Letter(letter);
            out.committed = Some(letter);
            if !self.state.sentence.trim_end().ends_with(letter) {
                self.state.sentence.push(letter);
                out.mutated = true;
                debug!(%letter, sentence = %self.state.sentence, "letter committed");
            }
        }

        if token.is_control() && token != self.state.prev_symbol {
            self.state.current_symbol = token;
            out.edge = Some(token);
            out.mutated |= match token {
                SymbolToken::Confirm => self.confirm(),
                SymbolToken::DoubleSpace => {
                    self.state.sentence.push_str("  ");
                    true
                }
                _ => false,
            };
            debug!(%token, sentence = %self.state.sentence, "control edge");
        }

        self.state.prev_symbol = token;
        self.ring.push(token);
        out
    }

    /// Landmarks went missing. Appends one separating space if anything was
    /// on display, including a control such as CONFIRM; repeated calls are
    /// no-ops. Returns whether `sentence` changed.
    pub fn on_hand_lost(&mut self) -> bool {
        let mut mutated = false;
        if self.state.current_symbol != SymbolToken::Blank
            && !self.state.sentence.ends_with(char::is_whitespace)
        {
            self.state.sentence.push(' ');
            mutated = true;
            info!(sentence = %self.state.sentence, "hand lost, word closed");
        }
        self.state.current_symbol = SymbolToken::Blank;
        self.state.prev_symbol = SymbolToken::Blank;
        mutated
    }

    pub fn reset(&mut self) {
        self.state = TranscriptState::default();
        self.ring.reset();
    }

    /// Commit whatever the user held before the CONFIRM gesture.
    fn confirm(&mut self) -> bool {
        let mut target = self.ring.lookback(CONFIRM_LOOKBACK);
        if target == SymbolToken::Confirm {
            target = self.ring.latest();
        }
        match target {
            SymbolToken::Delete => self.state.sentence.pop().is_some(),
            SymbolToken::Letter(c) => {
                self.state.sentence.push(c);
                true
            }
            SymbolToken::Space => {
                self.state.sentence.push(' ');
                true
            }
            SymbolToken::DoubleSpace => {
                self.state.sentence.push_str("  ");
                true
            }
            SymbolToken::Confirm | SymbolToken::Blank => false,
        }
    }
}
