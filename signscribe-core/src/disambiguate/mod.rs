//! Coarse group + hand geometry → final symbol.
//!
//! ## Stages
//!
//! ```text
//! (top1, top2) ──► rule cascade ──► group 0..7 ──► subgroup tree ──► letter
//!                  (ordered, chained)                                  │
//!                                                     control overrides ▼
//!                                               SPACE / CONFIRM / DELETE / letter
//! ```
//!
//! The cascade is not first-match-wins. Every rule is checked in table order
//! against the pair `(current_group, top2)`, and a firing rule rewrites
//! `current_group` before the next rule is checked. Later rules therefore see
//! and may override the output of earlier ones; reordering the table changes
//! results.

pub mod overrides;
pub mod rules;
pub mod subgroup;

pub use overrides::DeleteGate;
pub use subgroup::Resolution;

use tracing::trace;

use crate::{
    error::{Result, SignscribeError},
    landmarks::LandmarkSet,
    scores::{GroupScores, GROUP_COUNT},
    symbol::SymbolToken,
    thresholds::MIN_CONFIDENCE,
};

/// One cascade entry: when `(current_group, top2)` is in `pairs` and the
/// predicate holds, the working group becomes `target`.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pairs: &'static [(usize, usize)],
    pub predicate: fn(&LandmarkSet) -> bool,
    pub target: usize,
}

impl Rule {
    pub fn applies_to(&self, pair: (usize, usize)) -> bool {
        self.pairs.contains(&pair)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Run `rules` in order over the starting pair and return the settled group.
pub fn refine_group(rules: &[Rule], pair: (usize, usize), landmarks: &LandmarkSet) -> usize {
    let (mut group, second) = pair;
    for rule in rules {
        if rule.applies_to((group, second)) && (rule.predicate)(landmarks) {
            trace!(
                rule = rule.name,
                from = group,
                to = rule.target,
                second,
                "cascade rule fired"
            );
            group = rule.target;
        }
    }
    group
}

/// Stateless recognizer from one tick's scores and landmarks to a symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disambiguator {
    delete_gate: DeleteGate,
}

impl Disambiguator {
    pub fn new(delete_gate: DeleteGate) -> Self {
        Self { delete_gate }
    }

    pub fn delete_gate(&self) -> DeleteGate {
        self.delete_gate
    }

    /// Resolve one tick.
    ///
    /// Returns [`SymbolToken::Blank`] without touching the cascade when the
    /// winning group's probability is below [`MIN_CONFIDENCE`] (or NaN).
    ///
    /// # Errors
    /// `InvalidGroupIndex` if either ranked group is outside `0..8`.
    pub fn resolve(&self, scores: &GroupScores, landmarks: &LandmarkSet) -> Result<SymbolToken> {
        if !(scores.confidence() >= MIN_CONFIDENCE) {
            return Ok(SymbolToken::Blank);
        }
        self.resolve_pair(scores.pair(), landmarks)
    }

    /// Resolve an explicit `(top1, top2)` pair, skipping the confidence gate.
    ///
    /// # Errors
    /// `InvalidGroupIndex` if either index is outside `0..8`.
    pub fn resolve_pair(&self, pair: (usize, usize), landmarks: &LandmarkSet) -> Result<SymbolToken> {
        if pair.0 >= GROUP_COUNT || pair.1 >= GROUP_COUNT {
            return Err(SignscribeError::InvalidGroupIndex(pair.0, pair.1));
        }
        let group = refine_group(rules::CASCADE, pair, landmarks);
        let resolution = subgroup::resolve(group, landmarks);
        let token = overrides::apply(resolution, landmarks, self.delete_gate);
        trace!(?pair, group, ?resolution, %token, "tick resolved");
        Ok(token)
    }
}
