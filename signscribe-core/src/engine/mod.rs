//! `SignEngine`: host-side lifecycle controller around one [`Session`].
//!
//! ## Lifecycle
//!
//! ```text
//! SignEngine::new()
//!     └─► start()   → frame queue opened, pipeline spawned, status = Running
//!         └─► stop() → run flag cleared, pipeline drains out, status = Stopped
//! ```
//!
//! `start()`/`stop()` in the wrong state return an error rather than
//! panicking. Dropping every [`FrameSender`] also stops the pipeline.
//!
//! Each `start()` hands its pipeline a fresh run flag. A pipeline left over
//! from an earlier run can only ever clear its own flag, so a quick
//! `stop()`/`start()` followed by dropping the old sender never touches the
//! new run.
//!
//! ## Threading
//!
//! The session sits behind a `parking_lot::Mutex`; the pipeline holds it for
//! exactly one tick, and `reset`/`select_suggestion`/`snapshot` take it
//! between ticks, so ticks stay serialized per session.

pub mod pipeline;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::info;

use crate::{
    config::{pipeline_poll_ms, EngineConfig},
    error::{Result, SignscribeError},
    ipc::events::{EngineStatus, EngineStatusEvent, TickInput, TickOutput},
    session::{DiagnosticsSnapshot, Session, TickDiagnostics},
    suggest::DictionaryHandle,
};

/// Broadcast channel capacity: 256 events buffered for slow consumers.
const BROADCAST_CAP: usize = 256;

/// Producer side of the engine's bounded frame queue.
pub type FrameSender = crossbeam_channel::Sender<TickInput>;

/// The top-level engine handle.
///
/// `SignEngine` is `Send + Sync`; all fields use interior mutability.
pub struct SignEngine {
    config: EngineConfig,
    session: Arc<Mutex<Session>>,
    /// Run flag of the most recent `start()`; `true` while that pipeline is
    /// consuming frames.
    run_flag: Mutex<Arc<AtomicBool>>,
    status: Arc<Mutex<EngineStatus>>,
    output_tx: broadcast::Sender<TickOutput>,
    status_tx: broadcast::Sender<EngineStatusEvent>,
    diagnostics: Arc<TickDiagnostics>,
}

impl SignEngine {
    /// Create an engine with a fresh session. Does not start consuming
    /// frames; call `start()`.
    ///
    /// # Errors
    /// Session construction errors (worker thread spawn).
    pub fn new(mut config: EngineConfig, dictionary: Option<DictionaryHandle>) -> Result<Self> {
        config.normalize();
        let diagnostics = Arc::new(TickDiagnostics::default());
        let session = Session::with_diagnostics(
            config.session.clone(),
            dictionary,
            Arc::clone(&diagnostics),
        )?;
        let (output_tx, _) = broadcast::channel(BROADCAST_CAP);
        let (status_tx, _) = broadcast::channel(BROADCAST_CAP);

        Ok(Self {
            config,
            session: Arc::new(Mutex::new(session)),
            run_flag: Mutex::new(Arc::new(AtomicBool::new(false))),
            status: Arc::new(Mutex::new(EngineStatus::Idle)),
            output_tx,
            status_tx,
            diagnostics,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open the frame queue and spawn the pipeline on the blocking pool.
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// `AlreadyRunning` if already started.
    pub fn start(&self) -> Result<FrameSender> {
        let mut slot = self.run_flag.lock();
        if slot.load(Ordering::SeqCst) {
            return Err(SignscribeError::AlreadyRunning);
        }
        let running = Arc::new(AtomicBool::new(true));
        *slot = Arc::clone(&running);
        drop(slot);

        self.diagnostics.reset();
        let (frame_tx, frame_rx) = crossbeam_channel::bounded(self.config.frame_queue_capacity);

        let ctx = pipeline::PipelineContext {
            session: Arc::clone(&self.session),
            frames: frame_rx,
            running: Arc::clone(&running),
            output_tx: self.output_tx.clone(),
            status_tx: self.status_tx.clone(),
            status: Arc::clone(&self.status),
            diagnostics: Arc::clone(&self.diagnostics),
            poll: Duration::from_millis(pipeline_poll_ms()),
        };
        self.set_status(
            EngineStatus::Running,
            Some(format!("frame queue {}", self.config.frame_queue_capacity)),
        );

        let status = Arc::clone(&self.status);
        let status_tx = self.status_tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                pipeline::run(ctx)
            }));
            // Only a panic in the current run may flag the engine as failed.
            if outcome.is_err() && running.swap(false, Ordering::SeqCst) {
                *status.lock() = EngineStatus::Error;
                let _ = status_tx.send(EngineStatusEvent {
                    status: EngineStatus::Error,
                    detail: Some("pipeline task died unexpectedly".into()),
                });
            }
        });

        info!("engine started");
        Ok(frame_tx)
    }

    /// Stop the pipeline. Queued frames not yet ticked are dropped.
    ///
    /// # Errors
    /// `NotRunning` if not currently running.
    pub fn stop(&self) -> Result<()> {
        if !self.run_flag.lock().swap(false, Ordering::SeqCst) {
            return Err(SignscribeError::NotRunning);
        }
        self.set_status(EngineStatus::Stopped, None);
        info!("engine stop requested");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.run_flag.lock().load(Ordering::SeqCst)
    }

    /// Current engine status (snapshot).
    pub fn status(&self) -> EngineStatus {
        *self.status.lock()
    }

    /// Clear the session and broadcast the blank state.
    pub fn reset(&self) -> TickOutput {
        let output = {
            let mut session = self.session.lock();
            session.reset();
            session.snapshot()
        };
        let _ = self.output_tx.send(output.clone());
        output
    }

    /// Apply suggestion `index` and broadcast the new state.
    ///
    /// # Errors
    /// See [`Session::select_suggestion`].
    pub fn select_suggestion(&self, index: usize) -> Result<TickOutput> {
        let output = self.session.lock().select_suggestion(index)?;
        let _ = self.output_tx.send(output.clone());
        Ok(output)
    }

    /// Current session state without ticking.
    pub fn snapshot(&self) -> TickOutput {
        self.session.lock().snapshot()
    }

    /// Subscribe to every tick's output.
    pub fn subscribe_outputs(&self) -> broadcast::Receiver<TickOutput> {
        self.output_tx.subscribe()
    }

    /// Subscribe to live status change events.
    pub fn subscribe_status(&self) -> broadcast::Receiver<EngineStatusEvent> {
        self.status_tx.subscribe()
    }

    /// Snapshot of tick counters for observability.
    pub fn diagnostics_snapshot(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn set_status(&self, new_status: EngineStatus, detail: Option<String>) {
        *self.status.lock() = new_status;
        let _ = self.status_tx.send(EngineStatusEvent {
            status: new_status,
            detail,
        });
    }
}

impl std::fmt::Debug for SignEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignEngine")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
