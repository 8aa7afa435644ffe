//! Immutable observer views of a session.
//!
//! A `Snapshot` is handed to presentation adapters after every command.
//! The deck rides on `im::Vector`, so taking a snapshot clones it in
//! O(1) and the adapter can keep it as long as it likes without
//! aliasing live session state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};

/// Everything a presentation adapter needs to render a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The deck in display order.
    pub deck: Vector<Card>,

    /// Completed pair comparisons.
    pub moves: u32,

    /// Confirmed matches.
    pub matches_found: u32,

    /// Minimum moves across all won sessions, if any.
    pub best_score: Option<u32>,

    /// Is a pending pair being resolved?
    pub locked: bool,

    /// Number of pairs in the deck.
    pub total_pairs: usize,

    /// Has every pair been matched?
    pub won: bool,
}

impl Snapshot {
    /// Find a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.iter().find(|c| c.id == id)
    }

    /// Score tracker view over this snapshot.
    #[must_use]
    pub fn scores(&self) -> ScoreView {
        ScoreView {
            moves: self.moves,
            matches_found: self.matches_found,
            best_score: self.best_score,
        }
    }
}

/// Read-only score façade: `{moves, matchesFound, bestScore}`.
///
/// Derived from the session's counters, not an independent source of
/// truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    /// Completed pair comparisons.
    pub moves: u32,

    /// Confirmed matches.
    pub matches_found: u32,

    /// Minimum moves across all won sessions, if any.
    pub best_score: Option<u32>,
}
