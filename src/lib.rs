//! # match-pairs
//!
//! A memory pair-matching game engine: a deck of paired cards is shuffled
//! and dealt face-down, the player reveals two at a time, and the engine
//! decides matches, tracks progress, and detects completion.
//!
//! ## Design Principles
//!
//! 1. **Core only**: No rendering, sound, or asset loading. The engine
//!    exposes commands and immutable snapshots; presentation adapters
//!    observe and render.
//!
//! 2. **Explicit session**: All state lives in a `GameSession` owned by
//!    the host. No ambient globals.
//!
//! 3. **Host-scheduled timing**: The engine never blocks. A mismatch
//!    hands the host a `FlipTicket`; the host waits out the flip delay
//!    and fires it back. Generation stamps make superseded tickets
//!    silent no-ops.
//!
//! ## Modules
//!
//! - `core`: Cards, deck generation, RNG, configuration, the session
//!   state machine, and snapshots
//! - `store`: Best-score persistence collaborator

pub mod core;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardIdAllocator, FaceKey,
    GameRng, GameRngState,
    GameConfig, BEST_SCORE_KEY, DEFAULT_FLIP_DELAY_MS,
    Deck,
    FlipTicket, GameSession, RejectReason, SelectOutcome,
    ScoreView, Snapshot,
};

pub use crate::store::{MemoryStore, ScoreStore, StoreError};
