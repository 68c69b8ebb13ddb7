//! Fixed-capacity history of raw resolved tokens.

use crate::symbol::SymbolToken;
use crate::thresholds::HISTORY_LEN;

/// Last [`HISTORY_LEN`] resolved tokens plus a running tick count.
///
/// `push` bumps the count first and then writes, so slot `count % 10` is
/// always the most recent token. Unwritten slots read as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRing {
    slots: [SymbolToken; HISTORY_LEN],
    count: u64,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: SymbolToken) {
        self.count += 1;
        let slot = self.head();
        self.slots[slot] = token;
    }

    /// Token `k` pushes back from the newest (`k = 0` is the newest).
    /// `k` wraps modulo the capacity.
    pub fn lookback(&self, k: usize) -> SymbolToken {
        let slot = (self.head() + HISTORY_LEN - k % HISTORY_LEN) % HISTORY_LEN;
        self.slots[slot]
    }

    pub fn latest(&self) -> SymbolToken {
        self.lookback(0)
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn head(&self) -> usize {
        (self.count % HISTORY_LEN as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_lives_at_count_mod_capacity() {
        let mut ring = HistoryRing::new();
        assert_eq!(ring.latest(), SymbolToken::Blank);
        for c in "ABCDEFGHIJKL".chars() {
            ring.push(SymbolToken::Letter(c));
        }
        assert_eq!(ring.count(), 12);
        assert_eq!(ring.latest(), SymbolToken::Letter('L'));
        assert_eq!(ring.lookback(2), SymbolToken::Letter('J'));
        assert_eq!(ring.lookback(9), SymbolToken::Letter('C'));
        // Ten back is the newest again.
        assert_eq!(ring.lookback(10), SymbolToken::Letter('L'));
    }

    #[test]
    fn lookback_past_start_reads_blank() {
        let mut ring = HistoryRing::new();
        ring.push(SymbolToken::Space);
        assert_eq!(ring.lookback(0), SymbolToken::Space);
        assert_eq!(ring.lookback(2), SymbolToken::Blank);
    }

    #[test]
    fn reset_clears_count_and_slots() {
        let mut ring = HistoryRing::new();
        ring.push(SymbolToken::Delete);
        ring.reset();
        assert_eq!(ring, HistoryRing::new());
    }
}
