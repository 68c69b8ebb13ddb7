//! Word completions for the in-progress word.
//!
//! The spelling backend is a collaborator behind [`SpellDictionary`]. The
//! tracker queries it after a transcript mutation, either inline or through
//! a [`SuggestionWorker`] so a slow backend never stalls the tick path. On
//! failure the previous slots stay put.

pub mod wordlist;
pub mod worker;

pub use wordlist::WordListDictionary;
pub use worker::{Lookup, SuggestionWorker};

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, SignscribeError};
use crate::thresholds::SUGGESTION_SLOTS;

/// Contract for spelling backends.
pub trait SpellDictionary: Send + 'static {
    /// Up to `limit` ranked completions or corrections for `word`, best
    /// first. Case of `word` is not significant.
    ///
    /// # Errors
    /// Backend-specific lookup failures.
    fn suggest(&mut self, word: &str, limit: usize) -> Result<Vec<String>>;
}

/// Shared handle to any [`SpellDictionary`].
#[derive(Clone)]
pub struct DictionaryHandle(pub Arc<Mutex<dyn SpellDictionary>>);

impl DictionaryHandle {
    pub fn new<D: SpellDictionary>(dictionary: D) -> Self {
        Self(Arc::new(Mutex::new(dictionary)))
    }
}

impl std::fmt::Debug for DictionaryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryHandle").finish_non_exhaustive()
    }
}

pub type Slots = [String; SUGGESTION_SLOTS];

#[derive(Debug)]
enum Backend {
    None,
    Inline(DictionaryHandle),
    Background(SuggestionWorker),
}

/// Holds the four suggestion slots and keeps them in step with the
/// transcript's current word.
#[derive(Debug)]
pub struct SuggestionTracker {
    slots: Slots,
    backend: Backend,
    /// Bumped on every refresh and reset; background answers for older
    /// generations are dropped.
    generation: u64,
}

impl SuggestionTracker {
    /// Tracker with no dictionary: every slot stays blank.
    pub fn disabled() -> Self {
        Self::with_backend(Backend::None)
    }

    pub fn inline(dictionary: DictionaryHandle) -> Self {
        Self::with_backend(Backend::Inline(dictionary))
    }

    /// # Errors
    /// `Io` if the worker thread cannot be spawned.
    pub fn background(dictionary: DictionaryHandle) -> Result<Self> {
        Ok(Self::with_backend(Backend::Background(
            SuggestionWorker::spawn(dictionary)?,
        )))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            slots: Default::default(),
            backend,
            generation: 0,
        }
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn is_background(&self) -> bool {
        matches!(self.backend, Backend::Background(_))
    }

    /// Recompute slots for `current_word`. Blank word blanks every slot.
    ///
    /// # Errors
    /// The dictionary's error (inline) or `WorkerDisconnected` (background).
    /// Slots are left unchanged in both cases.
    pub fn refresh(&mut self, current_word: &str) -> Result<()> {
        self.generation += 1;
        if current_word.trim().is_empty() {
            self.slots = Default::default();
            return Ok(());
        }
        let ranked = match &self.backend {
            Backend::None => return Ok(()),
            Backend::Background(worker) => return worker.request(self.generation, current_word),
            Backend::Inline(dictionary) => {
                dictionary.0.lock().suggest(current_word, SUGGESTION_SLOTS)
            }
        };
        match ranked {
            Ok(ranked) => {
                self.fill(ranked);
                debug!(word = current_word, slots = ?self.slots, "suggestions refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(word = current_word, "suggestion lookup failed: {e}");
                Err(e)
            }
        }
    }

    /// Apply any finished background lookup for the current generation.
    /// Returns `Ok(true)` when the slots changed. Inline trackers never
    /// have anything pending.
    ///
    /// # Errors
    /// A failed current-generation lookup, or `WorkerDisconnected`.
    pub fn poll(&mut self) -> Result<bool> {
        let Backend::Background(worker) = &self.backend else {
            return Ok(false);
        };
        let mut latest = None;
        while let Some(lookup) = worker.try_next()? {
            if lookup.generation == self.generation {
                latest = Some(lookup);
            } else {
                debug!(
                    generation = lookup.generation,
                    current = self.generation,
                    "stale suggestion lookup dropped"
                );
            }
        }
        match latest {
            Some(Lookup { result: Ok(ranked), word, .. }) => {
                self.fill(ranked);
                debug!(word = %word, slots = ?self.slots, "background suggestions applied");
                Ok(true)
            }
            Some(Lookup { result: Err(e), .. }) => Err(e),
            None => Ok(false),
        }
    }

    /// Uppercased text of slot `index`.
    ///
    /// # Errors
    /// `SuggestionIndex` past the last slot, `BlankSuggestion` for an empty
    /// slot.
    pub fn selection(&self, index: usize) -> Result<String> {
        let slot = self
            .slots
            .get(index)
            .ok_or(SignscribeError::SuggestionIndex(index))?;
        if slot.trim().is_empty() {
            return Err(SignscribeError::BlankSuggestion(index));
        }
        Ok(slot.to_uppercase())
    }

    /// Blank every slot and orphan in-flight lookups.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.slots = Default::default();
    }

    fn fill(&mut self, ranked: Vec<String>) {
        let mut ranked = ranked.into_iter();
        for slot in &mut self.slots {
            *slot = ranked.next().unwrap_or_default();
        }
    }

    #[cfg(test)]
    pub(crate) fn set_slots(&mut self, slots: Slots) {
        self.slots = slots;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct Broken;

    impl SpellDictionary for Broken {
        fn suggest(&mut self, _word: &str, _limit: usize) -> Result<Vec<String>> {
            Err(SignscribeError::Dictionary("backend offline".into()))
        }
    }

    fn words() -> DictionaryHandle {
        DictionaryHandle::new(WordListDictionary::from_entries([
            ("world", 9),
            ("word", 5),
        ]))
    }

    #[test]
    fn inline_refresh_fills_and_blanks_unused_slots() {
        let mut t = SuggestionTracker::inline(words());
        t.refresh("WOR").expect("refresh");
        assert_eq!(t.slots(), &["world", "word", "", ""].map(String::from));
        t.refresh("").expect("refresh");
        assert!(t.slots().iter().all(String::is_empty));
    }

    #[test]
    fn failed_lookup_keeps_previous_slots() {
        let mut t = SuggestionTracker::inline(DictionaryHandle::new(Broken));
        t.set_slots(["keep", "", "", ""].map(String::from));
        assert!(t.refresh("AB").is_err());
        assert_eq!(t.slots()[0], "keep");
    }

    #[test]
    fn selection_uppercases_and_rejects_bad_slots() {
        let mut t = SuggestionTracker::disabled();
        t.set_slots(["world", "", "", ""].map(String::from));
        assert_eq!(t.selection(0).expect("slot 0"), "WORLD");
        assert!(matches!(t.selection(1), Err(SignscribeError::BlankSuggestion(1))));
        assert!(matches!(t.selection(4), Err(SignscribeError::SuggestionIndex(4))));
    }

    #[test]
    fn disabled_tracker_stays_blank() {
        let mut t = SuggestionTracker::disabled();
        t.refresh("HEL").expect("refresh");
        assert!(t.slots().iter().all(String::is_empty));
    }

    fn poll_until_applied(t: &mut SuggestionTracker) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if t.poll().expect("poll") {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn background_results_land_on_poll() {
        let mut t = SuggestionTracker::background(words()).expect("spawn worker");
        t.refresh("WOR").expect("queue");
        assert!(t.slots().iter().all(String::is_empty));
        assert!(poll_until_applied(&mut t));
        assert_eq!(t.slots()[0], "world");
    }

    #[test]
    fn reset_orphans_inflight_lookup() {
        let mut t = SuggestionTracker::background(words()).expect("spawn worker");
        t.refresh("WOR").expect("queue");
        t.reset();
        std::thread::sleep(Duration::from_millis(50));
        assert!(!t.poll().expect("poll"));
        assert!(t.slots().iter().all(String::is_empty));
    }
}
