//! Calibrated constants for recognition and stabilization.
//!
//! Every value here was tuned empirically against live camera input. Pixel
//! distances are measured in the 400×400 canvas the tracker normalizes hands
//! into. Changing any of them changes which letters come out for a given pose.

// ---------------------------------------------------------------------------
// Stabilizer
// ---------------------------------------------------------------------------

/// Minimum top-group probability for a tick to count as evidence.
pub const MIN_CONFIDENCE: f32 = 0.5;

/// Evidence added per confident tick is `max(1, trunc(confidence * BOOST_FACTOR))`.
pub const BOOST_FACTOR: f32 = 5.0;

/// Per-counter decay on a tick without letter evidence.
pub const IDLE_DECAY: u32 = 1;

/// Decay applied to every other counter when one letter crosses its threshold.
pub const COMMIT_DECAY: u32 = 2;

/// Evidence needed to move the display to a different letter.
pub const COLD_COMMIT_THRESHOLD: u32 = 15;

/// Evidence needed to re-assert the letter already on display.
pub const WARM_COMMIT_THRESHOLD: u32 = 8;

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Number of resolved tokens kept for CONFIRM lookback.
pub const HISTORY_LEN: usize = 10;

/// How many ticks back CONFIRM looks for the symbol to commit.
pub const CONFIRM_LOOKBACK: usize = 2;

/// Number of word-completion slots shown to the user.
pub const SUGGESTION_SLOTS: usize = 4;

// ---------------------------------------------------------------------------
// Group cascade (pixels)
// ---------------------------------------------------------------------------

/// Index and ring fingertips pinched together: C/O rather than X.
pub const INDEX_RING_TIPS_CLOSED: f32 = 52.0;

/// Index and ring fingertips spread: X rather than C/O.
pub const INDEX_RING_TIPS_SPREAD: f32 = 50.0;

/// Thumb tip clear of the middle knuckle: L rather than X.
pub const THUMB_CLEAR_OF_MIDDLE_FAR: f32 = 55.0;

/// Thumb tip clear of the middle knuckle when the index alone is raised.
pub const THUMB_CLEAR_OF_MIDDLE: f32 = 50.0;

/// Thumb tip tucked against the middle knuckle.
pub const THUMB_TUCKED_TO_MIDDLE: f32 = 50.0;

/// Thumb tip near the middle knuckle: X rather than L.
pub const THUMB_NEAR_MIDDLE: f32 = 60.0;

/// Thumb base must sit this far above the ring fingertip for G/H over P/Q/Z.
pub const THUMB_BASE_ABOVE_RING_TIP: f32 = 15.0;

/// Thumb tip tolerance below the fingertips for P/Q.
pub const THUMB_TIP_BELOW_TIPS_SLACK: f32 = 17.0;

/// Horizontal gap between index knuckle and thumb tip.
pub const THUMB_KNUCKLE_GAP: f32 = 15.0;

/// Horizontal margin of the wrist against the fingertips for W.
pub const WRIST_TIP_MARGIN: f32 = 13.0;

// ---------------------------------------------------------------------------
// Subgroup resolution (pixels)
// ---------------------------------------------------------------------------

/// Middle fingertip to thumb tip: C when wider, O otherwise.
pub const C_OPENING: f32 = 42.0;

/// Index to middle fingertip: G when wider, H otherwise.
pub const G_SPREAD: f32 = 72.0;

/// Index fingertip to thumb tip: Y when wider, J otherwise.
pub const Y_SPREAD: f32 = 42.0;

/// Fingertip spread gained over knuckle spread: V at or above, U below.
pub const V_SPREAD_GAIN: f32 = 8.0;
