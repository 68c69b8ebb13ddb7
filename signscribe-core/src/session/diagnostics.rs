use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::error::TickIssue;

/// Shared tick counters. Cheap to bump from the tick path and readable
/// from any thread without touching the session lock.
#[derive(Debug, Default)]
pub struct TickDiagnostics {
    pub ticks_received: AtomicUsize,
    pub ticks_processed: AtomicUsize,
    pub ticks_skipped: AtomicUsize,
    pub hand_present_ticks: AtomicUsize,
    pub hand_absent_ticks: AtomicUsize,
    pub low_confidence_ticks: AtomicUsize,
    pub commits: AtomicUsize,
    pub control_edges: AtomicUsize,
    pub recovered_faults: AtomicUsize,
    pub suggestion_failures: AtomicUsize,
}

impl TickDiagnostics {
    pub fn reset(&self) {
        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            ticks_received: self.ticks_received.load(Ordering::Relaxed),
            ticks_processed: self.ticks_processed.load(Ordering::Relaxed),
            ticks_skipped: self.ticks_skipped.load(Ordering::Relaxed),
            hand_present_ticks: self.hand_present_ticks.load(Ordering::Relaxed),
            hand_absent_ticks: self.hand_absent_ticks.load(Ordering::Relaxed),
            low_confidence_ticks: self.low_confidence_ticks.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            control_edges: self.control_edges.load(Ordering::Relaxed),
            recovered_faults: self.recovered_faults.load(Ordering::Relaxed),
            suggestion_failures: self.suggestion_failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_issue(&self, issue: TickIssue) {
        match issue {
            TickIssue::FrameSkipped => Self::bump(&self.ticks_skipped),
            TickIssue::SuggestionUnavailable => Self::bump(&self.suggestion_failures),
            TickIssue::InvalidGroupIndex | TickIssue::MalformedInput => {
                Self::bump(&self.recovered_faults)
            }
            TickIssue::InputUnavailable => Self::bump(&self.hand_absent_ticks),
            TickIssue::LowConfidence => Self::bump(&self.low_confidence_ticks),
        }
    }

    fn counters(&self) -> [&AtomicUsize; 10] {
        [
            &self.ticks_received,
            &self.ticks_processed,
            &self.ticks_skipped,
            &self.hand_present_ticks,
            &self.hand_absent_ticks,
            &self.low_confidence_ticks,
            &self.commits,
            &self.control_edges,
            &self.recovered_faults,
            &self.suggestion_failures,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsSnapshot {
    pub ticks_received: usize,
    pub ticks_processed: usize,
    pub ticks_skipped: usize,
    pub hand_present_ticks: usize,
    pub hand_absent_ticks: usize,
    pub low_confidence_ticks: usize,
    pub commits: usize,
    pub control_edges: usize,
    pub recovered_faults: usize,
    pub suggestion_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_land_in_their_counters() {
        let d = TickDiagnostics::default();
        d.record_issue(TickIssue::FrameSkipped);
        d.record_issue(TickIssue::MalformedInput);
        d.record_issue(TickIssue::InvalidGroupIndex);
        d.record_issue(TickIssue::LowConfidence);
        d.record_issue(TickIssue::InputUnavailable);
        let snap = d.snapshot();
        assert_eq!(snap.ticks_skipped, 1);
        assert_eq!(snap.low_confidence_ticks, 1);
        assert_eq!(snap.hand_absent_ticks, 1);
        assert_eq!(snap.recovered_faults, 2);
        assert_eq!(snap.suggestion_failures, 0);

        d.reset();
        assert_eq!(d.snapshot(), DiagnosticsSnapshot::default());
    }
}
