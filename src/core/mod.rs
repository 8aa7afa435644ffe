//! Core engine types: cards, deck, RNG, configuration, session, snapshots.
//!
//! This module contains the whole selection/match state machine. Hosts
//! construct a `GameSession` and drive it with `select`, `flip_back`,
//! and `restart`; everything else observes via `Snapshot`.

pub mod card;
pub mod rng;
pub mod config;
pub mod deck;
pub mod session;
pub mod snapshot;

pub use card::{Card, CardId, CardIdAllocator, FaceKey};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, BEST_SCORE_KEY, DEFAULT_FLIP_DELAY_MS};
pub use deck::Deck;
pub use session::{FlipTicket, GameSession, RejectReason, SelectOutcome};
pub use snapshot::{ScoreView, Snapshot};
