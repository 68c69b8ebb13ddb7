//! Coarse classifier output.

use crate::error::{Result, SignscribeError};

/// Number of coarse hand-pose groups the classifier distinguishes.
pub const GROUP_COUNT: usize = 8;

/// Ranked view of one tick's classifier probabilities.
///
/// Ranks are produced by successive argmax with the winner zeroed out, so a
/// vector with a single non-zero entry ranks group 0 second (first index wins
/// ties). The rule cascade depends on that exact pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupScores {
    probabilities: [f32; GROUP_COUNT],
    pub top1: (usize, f32),
    pub top2: (usize, f32),
    pub top3: usize,
}

impl GroupScores {
    pub fn new(probabilities: [f32; GROUP_COUNT]) -> Self {
        let mut working = probabilities;
        let first = argmax(&working);
        let top1 = (first, working[first]);
        working[first] = 0.0;
        let second = argmax(&working);
        let top2 = (second, working[second]);
        working[second] = 0.0;
        let top3 = argmax(&working);

        Self {
            probabilities,
            top1,
            top2,
            top3,
        }
    }

    /// # Errors
    /// Fails when the slice does not hold exactly [`GROUP_COUNT`] entries.
    pub fn from_slice(probabilities: &[f32]) -> Result<Self> {
        let array: [f32; GROUP_COUNT] = probabilities
            .try_into()
            .map_err(|_| SignscribeError::ScoreVectorLength(probabilities.len()))?;
        Ok(Self::new(array))
    }

    /// `(top1_index, top2_index)`, the key every cascade rule matches on.
    pub fn pair(&self) -> (usize, usize) {
        (self.top1.0, self.top2.0)
    }

    pub fn confidence(&self) -> f32 {
        self.top1.1
    }

    pub fn probabilities(&self) -> &[f32; GROUP_COUNT] {
        &self.probabilities
    }
}

/// First index holding the maximum. NaN never wins a comparison.
fn argmax(values: &[f32; GROUP_COUNT]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ranks_top_three() {
        let scores = GroupScores::new([0.05, 0.1, 0.6, 0.0, 0.2, 0.0, 0.05, 0.0]);
        assert_eq!(scores.top1.0, 2);
        assert_relative_eq!(scores.top1.1, 0.6);
        assert_eq!(scores.top2.0, 4);
        assert_relative_eq!(scores.top2.1, 0.2);
        assert_eq!(scores.top3, 1);
        assert_eq!(scores.pair(), (2, 4));
    }

    #[test]
    fn single_peak_pairs_with_group_zero() {
        let scores = GroupScores::new([0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(scores.pair(), (5, 0));
        assert_eq!(scores.top3, 0);
    }

    #[test]
    fn all_zero_vector_collapses_to_group_zero() {
        let scores = GroupScores::new([0.0; GROUP_COUNT]);
        assert_eq!(scores.pair(), (0, 0));
        assert_relative_eq!(scores.confidence(), 0.0);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = GroupScores::from_slice(&[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, SignscribeError::ScoreVectorLength(2)));
    }
}
