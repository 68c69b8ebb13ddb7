//! Wire types exchanged with whatever hosts the session.
//!
//! All types derive `serde::Serialize` + `serde::Deserialize`; the `replay`
//! binary reads and writes them as JSON lines.

pub mod events;
