//! One recognition session: everything a single camera stream owns.
//!
//! ## Tick path
//!
//! ```text
//! TickInput ─► governor ─► hand present? ──no──► hand-loss transition
//!                               │yes
//!                  LandmarkSet + GroupScores ─► Disambiguator ─► token
//!                               │
//!                  Stabilizer (hold | commit | control)
//!                               │
//!                  Composer (sentence, ring, edges)
//!                               │ mutated?
//!                  SuggestionTracker.refresh ─► TickOutput
//! ```
//!
//! Every fault inside the path is recovered locally and reported through
//! `TickOutput::error`; `tick` itself cannot fail. Callers serialize ticks
//! per session, which `&mut self` enforces.

pub mod diagnostics;
pub mod governor;

pub use diagnostics::{DiagnosticsSnapshot, TickDiagnostics};
pub use governor::TickGovernor;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    composer::{Composer, TranscriptState},
    config::SessionConfig,
    disambiguate::Disambiguator,
    error::{Result, SignscribeError, TickIssue},
    ipc::events::{TickInput, TickOutput},
    landmarks::LandmarkSet,
    scores::GroupScores,
    stabilizer::{CounterTable, Stabilizer},
    suggest::{DictionaryHandle, SuggestionTracker},
    symbol::SymbolToken,
    thresholds::MIN_CONFIDENCE,
};

const FRAME_SKIPPED: &str = "frame skipped";

/// Diagnostic slot for one tick: the first reported issue wins.
type Diagnostic = Option<(TickIssue, String)>;

pub struct Session {
    config: SessionConfig,
    disambiguator: Disambiguator,
    stabilizer: Stabilizer,
    composer: Composer,
    suggestions: SuggestionTracker,
    governor: TickGovernor,
    diagnostics: Arc<TickDiagnostics>,
    seq: u64,
}

impl Session {
    /// New idle session. Without a dictionary the suggestion slots stay
    /// blank.
    ///
    /// # Errors
    /// `Io` if background suggestions are enabled and the worker thread
    /// cannot be spawned.
    pub fn new(config: SessionConfig, dictionary: Option<DictionaryHandle>) -> Result<Self> {
        Self::with_diagnostics(config, dictionary, Arc::new(TickDiagnostics::default()))
    }

    /// Like [`Session::new`] but counting into a shared diagnostics block.
    pub fn with_diagnostics(
        config: SessionConfig,
        dictionary: Option<DictionaryHandle>,
        diagnostics: Arc<TickDiagnostics>,
    ) -> Result<Self> {
        let suggestions = match dictionary {
            None => SuggestionTracker::disabled(),
            Some(d) if config.background_suggestions => SuggestionTracker::background(d)?,
            Some(d) => SuggestionTracker::inline(d),
        };
        info!(
            min_tick_interval_ms = config.min_tick_interval_ms,
            delete_gate = ?config.delete_gate,
            background_suggestions = suggestions.is_background(),
            "session created"
        );
        Ok(Self {
            disambiguator: Disambiguator::new(config.delete_gate),
            stabilizer: Stabilizer::new(),
            composer: Composer::new(),
            suggestions,
            governor: TickGovernor::new(config.min_tick_interval()),
            diagnostics,
            seq: 0,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transcript(&self) -> &TranscriptState {
        self.composer.state()
    }

    pub fn counters(&self) -> &CounterTable {
        self.stabilizer.counters()
    }

    pub fn diagnostics(&self) -> Arc<TickDiagnostics> {
        Arc::clone(&self.diagnostics)
    }

    /// Process one frame now.
    pub fn tick(&mut self, input: &TickInput) -> TickOutput {
        self.tick_at(input, Instant::now())
    }

    /// Process one frame with an explicit clock reading for the governor.
    pub fn tick_at(&mut self, input: &TickInput, now: Instant) -> TickOutput {
        self.seq += 1;
        TickDiagnostics::bump(&self.diagnostics.ticks_received);

        if !self.governor.admit(now) {
            self.diagnostics.record_issue(TickIssue::FrameSkipped);
            debug!(seq = self.seq, "frame skipped by governor");
            let mut out = self.output(Some(FRAME_SKIPPED.into()));
            out.current_symbol = SymbolToken::Blank.marker();
            return out;
        }
        TickDiagnostics::bump(&self.diagnostics.ticks_processed);

        let mut diagnostic: Diagnostic = None;
        if let Err(e) = self.suggestions.poll() {
            self.note(&mut diagnostic, TickIssue::SuggestionUnavailable, e);
        }

        let mutated = match input.landmarks.as_deref() {
            Some(points) if input.hand_present => self.hand_present(points, input, &mut diagnostic),
            _ => self.hand_absent(),
        };

        if mutated {
            self.refresh_suggestions(&mut diagnostic);
        }

        self.output(diagnostic.map(|(_, msg)| msg))
    }

    /// Clear the transcript, counters, history, suggestions and edge state.
    pub fn reset(&mut self) {
        self.composer.reset();
        self.stabilizer.reset();
        self.suggestions.reset();
        self.governor.reset();
        info!(seq = self.seq, "session reset");
    }

    /// Replace the in-progress word with suggestion `index`, uppercased.
    ///
    /// # Errors
    /// `SuggestionIndex` for `index > 3`, `BlankSuggestion` for an empty
    /// slot. The transcript is untouched on error.
    pub fn select_suggestion(&mut self, index: usize) -> Result<TickOutput> {
        let replacement = self.suggestions.selection(index)?;
        self.composer
            .state_mut()
            .replace_current_word(&replacement);
        info!(
            index,
            word = %replacement,
            sentence = %self.composer.state().sentence,
            "suggestion selected"
        );
        let mut diagnostic = None;
        self.refresh_suggestions(&mut diagnostic);
        Ok(self.output(diagnostic.map(|(_, msg)| msg)))
    }

    /// Current state without ticking.
    pub fn snapshot(&self) -> TickOutput {
        self.output(None)
    }

    fn hand_present(
        &mut self,
        points: &[[f32; 2]],
        input: &TickInput,
        diagnostic: &mut Diagnostic,
    ) -> bool {
        TickDiagnostics::bump(&self.diagnostics.hand_present_ticks);

        let (token, confidence) = match self.classify(points, &input.group_scores) {
            Ok((token, confidence)) => {
                if !(confidence >= MIN_CONFIDENCE) {
                    self.diagnostics.record_issue(TickIssue::LowConfidence);
                }
                (token, confidence)
            }
            Err(e) => {
                let issue = match e {
                    SignscribeError::InvalidGroupIndex(..) => TickIssue::InvalidGroupIndex,
                    _ => TickIssue::MalformedInput,
                };
                self.note(diagnostic, issue, e);
                (SymbolToken::Blank, 0.0)
            }
        };

        let outcome = self
            .stabilizer
            .observe(token, confidence, self.composer.current_symbol());
        let composition = self.composer.apply(token, outcome);

        if composition.committed.is_some() {
            TickDiagnostics::bump(&self.diagnostics.commits);
        }
        if composition.edge.is_some() {
            TickDiagnostics::bump(&self.diagnostics.control_edges);
        }
        composition.mutated
    }

    fn hand_absent(&mut self) -> bool {
        self.diagnostics.record_issue(TickIssue::InputUnavailable);
        let closing_word = self.composer.current_symbol() != SymbolToken::Blank;
        let mutated = self.composer.on_hand_lost();
        if closing_word {
            self.stabilizer.reset();
        }
        mutated
    }

    fn classify(&self, points: &[[f32; 2]], scores: &[f32]) -> Result<(SymbolToken, f32)> {
        let landmarks = LandmarkSet::from_pairs(points)?;
        let scores = GroupScores::from_slice(scores)?;
        let token = self.disambiguator.resolve(&scores, &landmarks)?;
        Ok((token, scores.confidence()))
    }

    fn refresh_suggestions(&mut self, diagnostic: &mut Diagnostic) {
        let word = self.composer.state().current_word().to_owned();
        if let Err(e) = self.suggestions.refresh(&word) {
            self.note(diagnostic, TickIssue::SuggestionUnavailable, e);
        }
    }

    fn note(&self, diagnostic: &mut Diagnostic, issue: TickIssue, err: SignscribeError) {
        self.diagnostics.record_issue(issue);
        warn!(seq = self.seq, ?issue, "recovered tick fault: {err}");
        if issue.is_reported() && diagnostic.is_none() {
            *diagnostic = Some((issue, err.to_string()));
        }
    }

    fn output(&self, error: Option<String>) -> TickOutput {
        let state = self.composer.state();
        TickOutput {
            seq: self.seq,
            current_symbol: state.current_symbol.marker(),
            sentence: state.sentence.clone(),
            suggestions: self.suggestions.slots().clone(),
            error,
        }
    }

    #[cfg(test)]
    fn seed(&mut self, sentence: &str, slots: crate::suggest::Slots) {
        *self.composer.state_mut() = TranscriptState::with_sentence(sentence);
        self.suggestions.set_slots(slots);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seq", &self.seq)
            .field("config", &self.config)
            .field("transcript", self.composer.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::WordListDictionary;
    use std::time::Duration;

    fn ungoverned() -> SessionConfig {
        SessionConfig {
            min_tick_interval_ms: 0,
            ..SessionConfig::default()
        }
    }

    fn words() -> DictionaryHandle {
        DictionaryHandle::new(WordListDictionary::from_entries([("world", 9), ("word", 5)]))
    }

    #[test]
    fn selecting_a_suggestion_keeps_prefix() {
        let mut s = Session::new(ungoverned(), Some(words())).expect("session");
        s.seed("HELLO WOR", ["world", "", "", ""].map(String::from));
        let out = s.select_suggestion(0).expect("select");
        assert_eq!(out.sentence, "HELLO WORLD");
        assert!(out.sentence.starts_with("HELLO "));
        // Refreshed against the new current word.
        assert_eq!(out.suggestions[0], "world");
    }

    #[test]
    fn bad_selection_leaves_sentence_alone() {
        let mut s = Session::new(ungoverned(), None).expect("session");
        s.seed("HI", Default::default());
        assert!(matches!(s.select_suggestion(7), Err(SignscribeError::SuggestionIndex(7))));
        assert!(matches!(s.select_suggestion(0), Err(SignscribeError::BlankSuggestion(0))));
        assert_eq!(s.transcript().sentence, "HI");
    }

    #[test]
    fn governor_skip_reports_and_blanks_symbol() {
        let mut s = Session::new(SessionConfig::default(), None).expect("session");
        let t0 = Instant::now();
        let first = s.tick_at(&TickInput::no_hand(), t0);
        assert!(first.error.is_none());
        let skipped = s.tick_at(&TickInput::no_hand(), t0 + Duration::from_millis(5));
        assert_eq!(skipped.error.as_deref(), Some("frame skipped"));
        assert_eq!(skipped.current_symbol, "-");
        assert_eq!(skipped.seq, 2);
        assert_eq!(s.diagnostics().snapshot().ticks_skipped, 1);
    }

    #[test]
    fn malformed_landmarks_are_recovered() {
        let mut s = Session::new(ungoverned(), None).expect("session");
        let input = TickInput::hand(vec![[0.0, 0.0]; 3], vec![0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let out = s.tick(&input);
        assert!(out.error.as_deref().is_some_and(|e| e.contains("21 points")));
        assert_eq!(out.sentence, "");
        assert_eq!(out.suggestions, <[String; 4]>::default());
        assert_eq!(s.diagnostics().snapshot().recovered_faults, 1);
        // Malformed ticks still land in history as blanks.
        assert_eq!(s.composer.ring().count(), 1);
    }

    #[test]
    fn short_score_vector_is_recovered() {
        let mut s = Session::new(ungoverned(), None).expect("session");
        let input = TickInput::hand(vec![[200.0, 200.0]; 21], vec![1.0; 5]);
        let out = s.tick(&input);
        assert!(out.error.is_some());
        assert_eq!(out.current_symbol, "-");
    }

    #[test]
    fn hand_present_flag_without_landmarks_counts_as_absent() {
        let mut s = Session::new(ungoverned(), None).expect("session");
        let input = TickInput {
            landmarks: None,
            group_scores: vec![0.0; 8],
            hand_present: true,
        };
        let out = s.tick(&input);
        assert!(out.error.is_none());
        assert_eq!(s.diagnostics().snapshot().hand_present_ticks, 0);
    }

    #[test]
    fn absent_and_weak_ticks_are_counted() {
        let mut s = Session::new(ungoverned(), None).expect("session");
        s.tick(&TickInput::no_hand());
        let weak = vec![0.45, 0.1, 0.1, 0.1, 0.1, 0.05, 0.05, 0.05];
        let out = s.tick(&TickInput::hand(vec![[200.0, 200.0]; 21], weak));
        assert!(out.error.is_none());
        let snap = s.diagnostics().snapshot();
        assert_eq!(snap.hand_absent_ticks, 1);
        assert_eq!(snap.low_confidence_ticks, 1);
        assert_eq!(snap.recovered_faults, 0);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut s = Session::new(ungoverned(), Some(words())).expect("session");
        s.seed("HELLO WOR", ["world", "word", "", ""].map(String::from));
        s.reset();
        let out = s.snapshot();
        assert_eq!(out.sentence, "");
        assert_eq!(out.current_symbol, "-");
        assert!(out.suggestions.iter().all(String::is_empty));
        assert!(s.counters().iter().all(|(_, n)| n == 0));
    }
}
