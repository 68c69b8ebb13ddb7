//! Wire records exchanged with the host.
//!
//! | Record | Direction |
//! |--------|-----------|
//! | `TickInput` | host → session, one per camera frame |
//! | `TickOutput` | session → host, one per tick |
//! | `EngineStatusEvent` | engine → subscribers, on lifecycle changes |

use serde::{Deserialize, Serialize};

use crate::thresholds::SUGGESTION_SLOTS;

// ---------------------------------------------------------------------------
// Tick records
// ---------------------------------------------------------------------------

/// One frame's worth of collaborator output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickInput {
    /// 21 `(x, y)` canvas points, or absent when no hand was tracked.
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 2]>>,
    /// Classifier probabilities over the 8 coarse groups.
    #[serde(default)]
    pub group_scores: Vec<f32>,
    pub hand_present: bool,
}

impl TickInput {
    pub fn hand(landmarks: Vec<[f32; 2]>, group_scores: Vec<f32>) -> Self {
        Self {
            landmarks: Some(landmarks),
            group_scores,
            hand_present: true,
        }
    }

    pub fn no_hand() -> Self {
        Self::default()
    }
}

/// Session state after one tick. Every field is always populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutput {
    /// Monotonically increasing per-session tick sequence number.
    pub seq: u64,
    /// Displayed symbol: a letter, a control marker, or `"-"`.
    pub current_symbol: String,
    pub sentence: String,
    pub suggestions: [String; SUGGESTION_SLOTS],
    /// Diagnostic for a recovered fault or a skipped frame.
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Engine status events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatusEvent {
    pub status: EngineStatus,
    /// Optional human-readable detail (e.g. error message).
    pub detail: Option<String>,
}

/// Current state of the sign engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    /// Engine created but `start()` not yet called.
    Idle,
    /// Pipeline is consuming frames.
    Running,
    /// Pipeline stopped; engine may be restarted.
    Stopped,
    /// Pipeline died unexpectedly.
    Error,
}
