//! Background suggestion lookups.
//!
//! Requests carry a generation id. The worker only answers the newest
//! request waiting in its queue, and the tracker drops any answer whose
//! generation is no longer current.

use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use super::DictionaryHandle;
use crate::error::{Result, SignscribeError};
use crate::thresholds::SUGGESTION_SLOTS;

#[derive(Debug)]
struct Request {
    generation: u64,
    word: String,
}

/// One finished lookup.
#[derive(Debug)]
pub struct Lookup {
    pub generation: u64,
    pub word: String,
    pub result: Result<Vec<String>>,
}

/// Owns the lookup thread. Dropping it closes the request queue and the
/// thread exits after its current lookup.
#[derive(Debug)]
pub struct SuggestionWorker {
    requests: Sender<Request>,
    results: Receiver<Lookup>,
}

impl SuggestionWorker {
    /// # Errors
    /// `Io` if the OS refuses to spawn the thread.
    pub fn spawn(dictionary: DictionaryHandle) -> Result<Self> {
        let (req_tx, req_rx) = unbounded::<Request>();
        let (res_tx, res_rx) = unbounded::<Lookup>();

        thread::Builder::new()
            .name("signscribe-suggest".into())
            .spawn(move || run(dictionary, req_rx, res_tx))?;

        Ok(Self {
            requests: req_tx,
            results: res_rx,
        })
    }

    /// Queue a lookup.
    ///
    /// # Errors
    /// `WorkerDisconnected` if the thread has exited.
    pub fn request(&self, generation: u64, word: &str) -> Result<()> {
        self.requests
            .send(Request {
                generation,
                word: word.to_owned(),
            })
            .map_err(|_| SignscribeError::WorkerDisconnected)
    }

    /// Next finished lookup, without blocking.
    ///
    /// # Errors
    /// `WorkerDisconnected` if the thread has exited and nothing is pending.
    pub fn try_next(&self) -> Result<Option<Lookup>> {
        match self.results.try_recv() {
            Ok(lookup) => Ok(Some(lookup)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SignscribeError::WorkerDisconnected),
        }
    }

    /// Block until the next lookup finishes. Test helper for deterministic
    /// ordering.
    #[cfg(test)]
    pub(crate) fn wait_next(&self, timeout: std::time::Duration) -> Option<Lookup> {
        self.results.recv_timeout(timeout).ok()
    }
}

fn run(dictionary: DictionaryHandle, requests: Receiver<Request>, results: Sender<Lookup>) {
    while let Ok(mut req) = requests.recv() {
        // Only the newest queued word matters.
        while let Ok(newer) = requests.try_recv() {
            req = newer;
        }
        let result = dictionary.0.lock().suggest(&req.word, SUGGESTION_SLOTS);
        if let Err(e) = &result {
            warn!(word = %req.word, "background suggestion lookup failed: {e}");
        }
        debug!(generation = req.generation, word = %req.word, "suggestion lookup done");
        let lookup = Lookup {
            generation: req.generation,
            word: req.word,
            result,
        };
        if results.send(lookup).is_err() {
            break;
        }
    }
    debug!("suggestion worker exiting");
}
