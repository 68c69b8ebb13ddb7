//! # signscribe-core
//!
//! Fingerspelling-to-text engine SDK: per-frame hand geometry and coarse
//! classifier scores in, a stable transcript out.
//!
//! ## Architecture
//!
//! ```text
//! TickInput (21 landmarks + 8 group scores)
//!     │
//! Disambiguator ── rule cascade → subgroup letter → control overrides
//!     │
//! Stabilizer ── per-letter leaky counters, asymmetric commit thresholds
//!     │
//! Composer ── sentence, history ring, CONFIRM/DELETE edges, hand-loss space
//!     │
//! SuggestionTracker ── SpellDictionary (inline or worker thread)
//!     │
//! TickOutput
//! ```
//!
//! A [`Session`] owns one such chain. [`SignEngine`] hosts a session behind
//! a frame queue and broadcasts every output.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod composer;
pub mod config;
pub mod disambiguate;
pub mod engine;
pub mod error;
pub mod ipc;
pub mod landmarks;
pub mod scores;
pub mod session;
pub mod stabilizer;
pub mod suggest;
pub mod symbol;
pub mod thresholds;

// Convenience re-exports for downstream crates
pub use config::{load_config, EngineConfig, SessionConfig};
pub use disambiguate::{DeleteGate, Disambiguator};
pub use engine::{FrameSender, SignEngine};
pub use error::{SignscribeError, TickIssue};
pub use ipc::events::{EngineStatus, EngineStatusEvent, TickInput, TickOutput};
pub use landmarks::LandmarkSet;
pub use scores::GroupScores;
pub use session::{DiagnosticsSnapshot, Session};
pub use suggest::{DictionaryHandle, SpellDictionary, WordListDictionary};
pub use symbol::SymbolToken;
