//! Card identity and per-card state.
//!
//! Every card has a unique `CardId` and a `FaceKey` shared with exactly
//! one other card in the deck. Ids are allocated by `CardIdAllocator`
//! and are never reused within a session, so a deferred callback can
//! never confuse a card from a superseded deck with a current one.
//!
//! ## Usage
//!
//! ```
//! use match_pairs::core::{Card, CardIdAllocator, FaceKey};
//!
//! let mut ids = CardIdAllocator::new();
//! let card = Card::face_down(ids.alloc(), FaceKey::new(0));
//!
//! assert!(!card.matched);
//! assert!(!card.revealed);
//! assert!(card.selectable());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a session.
///
/// Ids stay unique across deck regenerations: `restart` allocates fresh
/// ids for the new deck instead of reusing old ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Face identifier shared by exactly two cards in a deck.
///
/// The engine doesn't interpret face keys - they're opaque indices into
/// `GameConfig::faces`, where the asset reference lives. Presentation
/// adapters resolve them via `GameConfig::face_asset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceKey(pub u16);

impl FaceKey {
    /// Create a new face key.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the index into `GameConfig::faces`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// A single card in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the session.
    pub id: CardId,

    /// Face shared with this card's pair partner.
    pub face: FaceKey,

    /// Has this card been matched with its partner?
    pub matched: bool,

    /// Is this card currently face-up?
    pub revealed: bool,
}

impl Card {
    /// Create a fresh face-down, unmatched card.
    #[must_use]
    pub const fn face_down(id: CardId, face: FaceKey) -> Self {
        Self {
            id,
            face,
            matched: false,
            revealed: false,
        }
    }

    /// Can this card become the active selection?
    ///
    /// A card is selectable only while it is neither matched nor
    /// already revealed. The revealed check also blocks re-selecting
    /// the pending first pick as its own second pick.
    #[must_use]
    pub const fn selectable(&self) -> bool {
        !self.matched && !self.revealed
    }
}

/// Monotonic card id allocator.
///
/// Shared by all deck generations within a session so ids are globally
/// unique per session lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next card id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}
