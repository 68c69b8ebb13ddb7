//! Blocking pipeline loop.
//!
//! ## Per iteration
//!
//! ```text
//! 1. Wait up to poll_ms for a TickInput on the frame queue
//! 2. Lock the session, run one tick, unlock
//! 3. Broadcast the TickOutput
//! ```
//!
//! The loop exits when the running flag drops or every frame sender is gone.
//! It runs in `spawn_blocking`, keeping the Tokio executor free.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    ipc::events::{EngineStatus, EngineStatusEvent, TickInput, TickOutput},
    session::{Session, TickDiagnostics},
};

/// All context the pipeline needs, passed as one struct so the closure stays tidy.
pub struct PipelineContext {
    pub session: Arc<Mutex<Session>>,
    pub frames: Receiver<TickInput>,
    pub running: Arc<AtomicBool>,
    pub output_tx: broadcast::Sender<TickOutput>,
    pub status_tx: broadcast::Sender<EngineStatusEvent>,
    pub status: Arc<Mutex<EngineStatus>>,
    pub diagnostics: Arc<TickDiagnostics>,
    pub poll: Duration,
}

/// Run the blocking pipeline until `ctx.running` becomes false or the frame
/// queue disconnects. `ctx.running` belongs to this run alone; the status is
/// only marked stopped if this run was still the live one.
pub fn run(ctx: PipelineContext) {
    info!(poll_ms = ctx.poll.as_millis() as u64, "pipeline started");

    loop {
        if !ctx.running.load(Ordering::Relaxed) {
            break;
        }

        let input = match ctx.frames.recv_timeout(ctx.poll) {
            Ok(input) => input,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("frame queue disconnected");
                if ctx.running.swap(false, Ordering::SeqCst) {
                    *ctx.status.lock() = EngineStatus::Stopped;
                    let _ = ctx.status_tx.send(EngineStatusEvent {
                        status: EngineStatus::Stopped,
                        detail: Some("frame source closed".into()),
                    });
                }
                break;
            }
        };

        let output = ctx.session.lock().tick(&input);
        // No subscribers is fine.
        let _ = ctx.output_tx.send(output);
    }

    let snap = ctx.diagnostics.snapshot();
    info!(
        ticks_received = snap.ticks_received,
        ticks_processed = snap.ticks_processed,
        ticks_skipped = snap.ticks_skipped,
        hand_present_ticks = snap.hand_present_ticks,
        hand_absent_ticks = snap.hand_absent_ticks,
        low_confidence_ticks = snap.low_confidence_ticks,
        commits = snap.commits,
        control_edges = snap.control_edges,
        recovered_faults = snap.recovered_faults,
        suggestion_failures = snap.suggestion_failures,
        "pipeline stopped, diagnostics"
    );
}
