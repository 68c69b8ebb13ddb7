//! Leaky-integrator hysteresis over the per-tick candidate stream.
//!
//! ## Algorithm
//!
//! 1. Confident letter → its counter grows by `max(1, ⌊confidence × 5⌋)`.
//! 2. Threshold is 15 for a letter not on display, 8 for the displayed one.
//! 3. Counter above threshold → every other counter decays by 2; a commit is
//!    emitted only if the letter is not already displayed.
//! 4. Anything else (blank, control, low confidence) → every counter decays
//!    by 1. Counters saturate at 0.

use tracing::debug;

use crate::symbol::{letter_index, SymbolToken};
use crate::thresholds::{
    BOOST_FACTOR, COLD_COMMIT_THRESHOLD, COMMIT_DECAY, IDLE_DECAY, MIN_CONFIDENCE,
    WARM_COMMIT_THRESHOLD,
};

/// Slot index for idle evidence, after the 26 letters.
pub const IDLE_SLOT: usize = 26;
const SLOTS: usize = 27;

/// Per-letter evidence counts plus an idle slot. Never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterTable {
    counts: [u32; SLOTS],
}

impl CounterTable {
    pub fn get(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |i| self.counts[i])
    }

    pub fn idle(&self) -> u32 {
        self.counts[IDLE_SLOT]
    }

    /// Add `amount` to `letter`'s counter and return the new value.
    /// Non-letters are ignored and report 0.
    pub fn add(&mut self, letter: char, amount: u32) -> u32 {
        match letter_index(letter) {
            Some(i) => {
                self.counts[i] = self.counts[i].saturating_add(amount);
                self.counts[i]
            }
            None => 0,
        }
    }

    pub fn decay_all(&mut self, amount: u32) {
        for count in &mut self.counts {
            *count = count.saturating_sub(amount);
        }
    }

    /// Decay every slot except `letter`'s.
    pub fn decay_except(&mut self, letter: char, amount: u32) {
        let keep = letter_index(letter);
        for (i, count) in self.counts.iter_mut().enumerate() {
            if Some(i) != keep {
                *count = count.saturating_sub(amount);
            }
        }
    }

    pub fn reset(&mut self) {
        self.counts = [0; SLOTS];
    }

    /// `(letter, count)` for the 26 letter slots.
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        (b'A'..=b'Z').zip(self.counts.iter()).map(|(b, &n)| (b as char, n))
    }
}

/// What the stabilizer tells the composer for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizerOutcome {
    Hold,
    /// A letter crossed its threshold and is not yet on display.
    Commit(char),
    /// Control gestures skip the counters; edges are the composer's job.
    Control(SymbolToken),
}

/// Evidence boost for one confident tick: `max(1, trunc(confidence * 5))`.
///
/// Truncates like an integer cast rather than rounding. The usual worked
/// figures for this boost, 0.5 → +2 and 0.9 → +5 (counter 20 on tick 4),
/// fit no single rounding rule: half-up gives +3 for 0.5, half-even gives
/// +4 for 0.9. The recognizer was tuned with the integer cast, so 0.5 gives
/// +2, 0.9 gives +4, and a cold start at 0.9 commits on tick 4 at 16.
pub fn boost(confidence: f32) -> u32 {
    ((confidence * BOOST_FACTOR) as u32).max(1)
}

#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    counters: CounterTable,
}

impl Stabilizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &CounterTable {
        &self.counters
    }

    pub fn reset(&mut self) {
        self.counters.reset();
    }

    /// Feed one resolved candidate. `displayed` is the composer's current
    /// symbol, which picks the cold or warm threshold.
    pub fn observe(
        &mut self,
        candidate: SymbolToken,
        confidence: f32,
        displayed: SymbolToken,
    ) -> StabilizerOutcome {
        let letter = match candidate {
            SymbolToken::Letter(c) if confidence >= MIN_CONFIDENCE => c,
            other => {
                self.counters.decay_all(IDLE_DECAY);
                return if other.is_control() {
                    StabilizerOutcome::Control(other)
                } else {
                    StabilizerOutcome::Hold
                };
            }
        };

        let count = self.counters.add(letter, boost(confidence));
        let on_display = displayed == candidate;
        let threshold = if on_display {
            WARM_COMMIT_THRESHOLD
        } else {
            COLD_COMMIT_THRESHOLD
        };

        if count <= threshold {
            return StabilizerOutcome::Hold;
        }

        self.counters.decay_except(letter, COMMIT_DECAY);
        if on_display {
            StabilizerOutcome::Hold
        } else {
            debug!(%letter, count, threshold, "letter crossed commit threshold");
            StabilizerOutcome::Commit(letter)
        }
    }
}
